//! Error taxonomy for the monitor's collaborator seams.
//!
//! The poll loop treats each variant differently:
//! - `Transport` is recoverable and counted
//! - `Delivery` stops the monitor immediately
//! - `Decode` also stops the monitor; retrying a malformed payload won't help

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// Listings or event metadata could not be fetched (non-2xx or network).
    #[error("HTTP error occurred: {0}")]
    Transport(String),

    /// The notification provider rejected or never received the message.
    #[error("delivery provider error: {0}")]
    Delivery(String),

    /// A provider answered 2xx but the payload was not what we expect.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl MonitorError {
    /// Classify a reqwest failure raised while fetching from a data provider.
    ///
    /// Body decoding failures are not transport problems and stay fatal.
    pub fn from_fetch(context: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            MonitorError::Decode(format!("{context}: {err}"))
        } else {
            MonitorError::Transport(format!("{context}: {err}"))
        }
    }
}

pub type MonitorResult<T> = Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_detail() {
        let err = MonitorError::Transport(
            "listings for event abc: HTTP status server error (503 Service Unavailable)".into(),
        );
        let text = err.to_string();
        assert!(text.starts_with("HTTP error occurred: "));
        assert!(text.contains("503 Service Unavailable"));
    }
}
