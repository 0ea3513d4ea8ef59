//! Listing Monitor Service Library
//!
//! Exposes the poll loop, formatting and configuration so they can be driven
//! from integration tests with fake providers.

pub mod cli;
pub mod config;
pub mod formatters;
pub mod monitor;

// Re-export commonly used types
pub use cli::Cli;
pub use config::Config;
pub use monitor::{CycleOutcome, ListingMonitor, MonitorSettings, ShutdownReason};
