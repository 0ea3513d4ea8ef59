//! Collaborator abstractions for the listing monitor
//!
//! The monitor talks to three outside services through these traits:
//! - a listings source (Gametime mobile API)
//! - an event metadata source (same API, different endpoint)
//! - a notification sender (Twilio SMS)
//!
//! Concrete implementations live in `crate::clients`; tests plug in fakes.

use crate::error::MonitorResult;
use crate::models::{EventContext, Listing};
use async_trait::async_trait;
use std::borrow::Cow;
use tracing::warn;

/// Longest SMS body the delivery provider accepts.
pub const SMS_MAX_BODY_CHARS: usize = 1600;

#[async_trait]
pub trait ListingsProvider: Send + Sync {
    /// Current listings for an event, priced for `quantity` tickets
    async fn fetch_listings(&self, event_id: &str, quantity: u32) -> MonitorResult<Vec<Listing>>;

    /// Provider name for logging and debugging
    fn provider_name(&self) -> &str;
}

#[async_trait]
pub trait EventMetadataProvider: Send + Sync {
    /// Resolve teams, venue and date for an event
    async fn fetch_event(&self, event_id: &str) -> MonitorResult<EventContext>;
}

#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver `body` to `to`. Bodies are already capped to `max_body_chars`.
    async fn send(&self, to: &str, body: &str) -> MonitorResult<()>;

    fn max_body_chars(&self) -> usize {
        SMS_MAX_BODY_CHARS
    }
}

/// Cap a message body to `max_chars` characters, warning when it had to cut.
pub fn truncate_body(body: &str, max_chars: usize) -> Cow<'_, str> {
    match body.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            warn!(
                "Long message of length {}, trimming to {} characters",
                body.chars().count(),
                max_chars
            );
            Cow::Owned(body[..cut].to_string())
        }
        None => Cow::Borrowed(body),
    }
}
