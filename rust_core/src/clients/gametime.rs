use crate::error::{MonitorError, MonitorResult};
use crate::models::{EventContext, Listing};
use crate::providers::{EventMetadataProvider, ListingsProvider};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://mobile.gametime.co";

/// Client for the Gametime mobile API (listings + event metadata)
#[derive(Debug, Clone)]
pub struct GametimeClient {
    client: Client,
    base_url: String,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    #[serde(default)]
    listings: HashMap<String, RawListing>,
}

#[derive(Debug, Deserialize)]
struct RawListing {
    price: RawPrice,
    spot: RawSpot,
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    total: i64,
}

#[derive(Debug, Deserialize)]
struct RawSpot {
    section: String,
    #[serde(default)]
    row: Option<String>,
    #[serde(default)]
    section_group: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    events: Vec<EventEnvelope>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: RawEvent,
    #[serde(default)]
    performers: Vec<RawPerformer>,
    venue: RawVenue,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    category: String,
    datetime_local: String,
    #[serde(default)]
    performers: Vec<PerformerRef>,
}

#[derive(Debug, Deserialize)]
struct PerformerRef {
    id: String,
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct RawPerformer {
    id: String,
    short_name: String,
}

#[derive(Debug, Deserialize)]
struct RawVenue {
    city: String,
    state: String,
    name: String,
}

impl GametimeClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, Duration::from_secs(10))
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> MonitorResult<T> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| MonitorError::from_fetch(context, e))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| MonitorError::Transport(format!("{context}: {e}")))?;

        resp.json::<T>()
            .await
            .map_err(|e| MonitorError::from_fetch(context, e))
    }
}

impl Default for GametimeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingsProvider for GametimeClient {
    async fn fetch_listings(&self, event_id: &str, quantity: u32) -> MonitorResult<Vec<Listing>> {
        let url = format!("{}/v2/listings/{}", self.base_url, event_id);
        let query = [
            ("sort_order", "low_to_high".to_string()),
            ("all_in_pricing", "true".to_string()),
            ("quantity", quantity.to_string()),
        ];
        let context = format!("listings for event {event_id}");

        let body: ListingsResponse = self.get_json(&url, &query, &context).await?;
        let listings = listings_from_response(body);
        debug!("Fetched {} listings for event {}", listings.len(), event_id);
        Ok(listings)
    }

    fn provider_name(&self) -> &str {
        "gametime"
    }
}

#[async_trait]
impl EventMetadataProvider for GametimeClient {
    async fn fetch_event(&self, event_id: &str) -> MonitorResult<EventContext> {
        let url = format!("{}/v1/events", self.base_url);
        let query = [("id", event_id.to_string())];
        let context = format!("event metadata for {event_id}");

        let body: EventsResponse = self.get_json(&url, &query, &context).await?;
        event_from_response(body)
    }
}

/// Flatten the id-keyed listings map, cheapest first.
fn listings_from_response(body: ListingsResponse) -> Vec<Listing> {
    let mut listings: Vec<Listing> = body
        .listings
        .into_iter()
        .map(|(id, raw)| Listing {
            id,
            section: raw.spot.section,
            row: raw.spot.row.unwrap_or_default(),
            price_cents: raw.price.total,
            section_group: raw.spot.section_group.unwrap_or_default(),
        })
        .collect();

    listings.sort_by(|a, b| a.price_cents.cmp(&b.price_cents).then_with(|| a.id.cmp(&b.id)));
    listings
}

fn event_from_response(body: EventsResponse) -> MonitorResult<EventContext> {
    let envelope = body
        .events
        .into_iter()
        .next()
        .ok_or_else(|| MonitorError::Decode("event lookup returned no events".to_string()))?;

    let short_name_for = |primary: bool| -> MonitorResult<String> {
        let side = if primary { "home" } else { "away" };
        let performer_id = envelope
            .event
            .performers
            .iter()
            .find(|p| p.primary == primary)
            .map(|p| p.id.as_str())
            .ok_or_else(|| MonitorError::Decode(format!("event has no {side} performer")))?;

        envelope
            .performers
            .iter()
            .find(|p| p.id == performer_id)
            .map(|p| p.short_name.clone())
            .ok_or_else(|| {
                MonitorError::Decode(format!("{side} performer {performer_id} not in performers"))
            })
    };

    let away_team = short_name_for(false)?;
    let home_team = short_name_for(true)?;
    let date = parse_local_date(&envelope.event.datetime_local)?;

    Ok(EventContext {
        event_id: envelope.event.id,
        category: envelope.event.category,
        away_team,
        home_team,
        date,
        city: envelope.venue.city,
        state: envelope.venue.state,
        venue_name: envelope.venue.name,
    })
}

/// Take the date part of `2025-03-07T19:30:00`
fn parse_local_date(datetime_local: &str) -> MonitorResult<NaiveDate> {
    let date_part = datetime_local.split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
        MonitorError::Decode(format!("invalid datetime_local {datetime_local:?}: {e}"))
    })
}
