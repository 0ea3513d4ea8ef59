use crate::error::{MonitorError, MonitorResult};
use crate::providers::NotificationSender;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// SMS delivery through the Twilio Messages API
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("base_url", &self.base_url)
            .field("account_sid", &self.account_sid)
            .field("from_number", &self.from_number)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct SendForm<'a> {
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

impl TwilioClient {
    pub fn new(account_sid: String, auth_token: String, from_number: String) -> Self {
        Self::with_base_url(
            DEFAULT_API_BASE_URL,
            account_sid,
            auth_token,
            from_number,
            Duration::from_secs(10),
        )
    }

    pub fn with_base_url(
        base_url: &str,
        account_sid: String,
        auth_token: String,
        from_number: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
            from_number,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl NotificationSender for TwilioClient {
    async fn send(&self, to: &str, body: &str) -> MonitorResult<()> {
        let url = self.messages_url();
        let form = SendForm {
            to,
            from: &self.from_number,
            body,
        };

        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| MonitorError::Delivery(format!("Twilio request failed: {e}")))?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(MonitorError::Delivery(format!(
                "Twilio API non-2xx: {status} body={text}"
            )));
        }

        let sid = serde_json::from_str::<MessageResource>(&text)
            .map(|m| m.sid)
            .unwrap_or_else(|_| "unknown".to_string());
        info!("Message sent to {}. SID: {}", to, sid);
        Ok(())
    }
}
