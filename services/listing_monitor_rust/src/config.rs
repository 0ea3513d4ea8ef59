use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use seatwatch_rust_core::clients::{gametime, twilio};

use crate::monitor::MonitorSettings;

pub const DEFAULT_WEB_BASE_URL: &str = "https://gametime.co";

#[derive(Debug, Clone)]
pub struct Config {
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_phone_number: String,
    pub twilio_api_base_url: String,

    pub gametime_api_base_url: String,
    pub gametime_web_base_url: String,
    pub http_timeout: Duration,

    pub poll_interval: Duration,
    pub max_transport_errors: u32,
    pub reset_errors_on_success: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let twilio_account_sid = required(&lookup, "TWILIO_ACCOUNT_SID")?;
        let twilio_auth_token = required(&lookup, "TWILIO_AUTH_TOKEN")?;
        let twilio_phone_number = required(&lookup, "TWILIO_PHONE_NUMBER")
            .context("sender number in international format, e.g. +15551234567")?;
        let twilio_api_base_url = lookup("TWILIO_API_BASE_URL")
            .unwrap_or_else(|| twilio::DEFAULT_API_BASE_URL.to_string());

        let gametime_api_base_url = lookup("GAMETIME_API_BASE_URL")
            .unwrap_or_else(|| gametime::DEFAULT_API_BASE_URL.to_string());
        let gametime_web_base_url =
            lookup("GAMETIME_WEB_BASE_URL").unwrap_or_else(|| DEFAULT_WEB_BASE_URL.to_string());

        let http_timeout =
            Duration::from_secs(parse_u64(&lookup, "HTTP_TIMEOUT_SECS", 10)?);
        let poll_interval = Duration::from_secs(parse_u64(&lookup, "SLEEP_DURATION", 300)?);

        let max_transport_errors = parse_u64(&lookup, "MAX_TRANSPORT_ERRORS", 10)?;
        let max_transport_errors = u32::try_from(max_transport_errors)
            .map_err(|_| anyhow!("Invalid MAX_TRANSPORT_ERRORS: {max_transport_errors} (too large)"))?;

        let reset_errors_on_success = parse_bool(&lookup, "RESET_ERRORS_ON_SUCCESS", true)?;

        Ok(Self {
            twilio_account_sid,
            twilio_auth_token,
            twilio_phone_number,
            twilio_api_base_url,
            gametime_api_base_url,
            gametime_web_base_url,
            http_timeout,
            poll_interval,
            max_transport_errors,
            reset_errors_on_success,
        })
    }

    /// Loop settings for one monitored event
    pub fn monitor_settings(&self, event_id: &str, send_to: &str) -> MonitorSettings {
        MonitorSettings {
            event_id: event_id.to_string(),
            send_to: send_to.to_string(),
            poll_interval: self.poll_interval,
            max_transport_errors: self.max_transport_errors,
            reset_errors_on_success: self.reset_errors_on_success,
            web_base_url: self.gametime_web_base_url.clone(),
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("{key} must be set"))
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(anyhow!("Invalid {key}: {raw} (expected true or false)")),
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid {key}: {raw} (expected integer)"))
}
