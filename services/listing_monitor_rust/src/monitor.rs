//! Poll loop for a single event.
//!
//! Each cycle fetches listings, filters them against the criteria and the
//! ledger, and sends one SMS when anything new qualifies. Cycles run one at
//! a time with a fixed sleep in between.
//!
//! Failure handling:
//! - transport errors are counted; once the count exceeds the limit a final
//!   shutdown SMS is sent and the loop stops
//! - delivery provider errors stop the loop immediately
//! - malformed provider responses stop the loop immediately

use seatwatch_rust_core::filter::filter_listings;
use seatwatch_rust_core::ledger::DedupLedger;
use seatwatch_rust_core::models::Criteria;
use seatwatch_rust_core::providers::{
    truncate_body, EventMetadataProvider, ListingsProvider, NotificationSender,
};
use seatwatch_rust_core::{MonitorError, MonitorResult};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::formatters::{format_listings, format_shutdown};

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub event_id: String,
    /// Destination phone number (E.164)
    pub send_to: String,
    pub poll_interval: Duration,
    /// Transport errors tolerated before shutting down
    pub max_transport_errors: u32,
    pub reset_errors_on_success: bool,
    pub web_base_url: String,
}

/// What a successful cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Nothing new qualified
    Idle,
    /// An alert covering `count` listings was sent
    Notified { count: usize },
}

/// Why the loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    TooManyTransportErrors { count: u32, last_error: String },
    DeliveryFailed(String),
    Unexpected(String),
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::TooManyTransportErrors { count, last_error } => {
                write!(f, "too many http errors ({count}), most recent: {last_error}")
            }
            ShutdownReason::DeliveryFailed(e) => write!(f, "notification delivery failed: {e}"),
            ShutdownReason::Unexpected(e) => write!(f, "unexpected error: {e}"),
        }
    }
}

pub struct ListingMonitor {
    listings: Arc<dyn ListingsProvider>,
    events: Arc<dyn EventMetadataProvider>,
    notifier: Arc<dyn NotificationSender>,
    criteria: Criteria,
    settings: MonitorSettings,
    ledger: DedupLedger,
    /// Transport errors since start, or since the last good cycle when
    /// `reset_errors_on_success` is set
    transport_errors: u32,
}

impl ListingMonitor {
    pub fn new(
        listings: Arc<dyn ListingsProvider>,
        events: Arc<dyn EventMetadataProvider>,
        notifier: Arc<dyn NotificationSender>,
        criteria: Criteria,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            listings,
            events,
            notifier,
            criteria,
            settings,
            ledger: DedupLedger::new(),
            transport_errors: 0,
        }
    }

    /// Start from an existing ledger instead of an empty one
    pub fn with_ledger(mut self, ledger: DedupLedger) -> Self {
        self.ledger = ledger;
        self
    }

    pub fn ledger(&self) -> &DedupLedger {
        &self.ledger
    }

    pub fn transport_errors(&self) -> u32 {
        self.transport_errors
    }

    /// Run until a shutdown condition is hit.
    pub async fn run(&mut self) -> ShutdownReason {
        info!(
            "Monitoring event {} via {} (max {}, qty {}, every {}s)",
            self.settings.event_id,
            self.listings.provider_name(),
            self.criteria.max_price(),
            self.criteria.quantity,
            self.settings.poll_interval.as_secs()
        );

        loop {
            let result = self.poll_once().await;
            if let Some(reason) = self.handle_cycle_result(result).await {
                return reason;
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    /// One fetch → filter → format → notify pass.
    pub async fn poll_once(&mut self) -> MonitorResult<CycleOutcome> {
        let listings = self
            .listings
            .fetch_listings(&self.settings.event_id, self.criteria.quantity)
            .await?;
        let fetched = listings.len();

        let accepted = filter_listings(listings, &self.criteria, &self.ledger);
        if accepted.is_empty() {
            debug!("No new qualifying listings out of {}", fetched);
            return Ok(CycleOutcome::Idle);
        }

        info!(
            "{} new qualifying listings out of {}",
            accepted.len(),
            fetched
        );

        let event = self.events.fetch_event(&self.settings.event_id).await?;
        let message = format_listings(
            &event,
            &self.settings.web_base_url,
            &accepted,
            &mut self.ledger,
        );
        self.deliver(&message).await?;

        Ok(CycleOutcome::Notified {
            count: accepted.len(),
        })
    }

    /// Apply the error policy to a cycle result. `Some` means stop.
    pub async fn handle_cycle_result(
        &mut self,
        result: MonitorResult<CycleOutcome>,
    ) -> Option<ShutdownReason> {
        match result {
            Ok(_) => {
                if self.settings.reset_errors_on_success && self.transport_errors > 0 {
                    info!(
                        "Recovered after {} transport errors, resetting counter",
                        self.transport_errors
                    );
                    self.transport_errors = 0;
                }
                None
            }
            Err(err @ MonitorError::Transport(_)) => {
                error!("{}", err);
                self.transport_errors += 1;
                if self.transport_errors <= self.settings.max_transport_errors {
                    return None;
                }

                let shutdown = format_shutdown(self.transport_errors, &err);
                if let Err(send_err) = self.deliver(&shutdown).await {
                    error!("Failed to send shutdown notification: {}", send_err);
                }
                Some(ShutdownReason::TooManyTransportErrors {
                    count: self.transport_errors,
                    last_error: err.to_string(),
                })
            }
            Err(err @ MonitorError::Delivery(_)) => {
                error!("A delivery provider error occurred: {}", err);
                Some(ShutdownReason::DeliveryFailed(err.to_string()))
            }
            Err(err @ MonitorError::Decode(_)) => {
                error!("An error occurred: {}", err);
                Some(ShutdownReason::Unexpected(err.to_string()))
            }
        }
    }

    async fn deliver(&self, message: &str) -> MonitorResult<()> {
        let body = truncate_body(message, self.notifier.max_body_chars());
        self.notifier.send(&self.settings.send_to, &body).await
    }
}
