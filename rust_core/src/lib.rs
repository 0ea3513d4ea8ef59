//! Seatwatch Core - listing filtering and provider plumbing for the
//! resale ticket monitor.
//!
//! This module provides:
//! - Alphanumeric row ordering for "row X or better" bounds
//! - Listing acceptance against price, section and row criteria
//! - A notified-price ledger for deduplicating alerts
//! - Provider traits for listings, event metadata and SMS delivery
//! - Gametime and Twilio HTTP clients

pub mod clients;
pub mod error;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod providers;
pub mod utils;

pub use error::{MonitorError, MonitorResult};
pub use filter::{filter_listings, RejectionReason};
pub use ledger::DedupLedger;
pub use models::{AcceptedListing, Criteria, EventContext, Listing};
