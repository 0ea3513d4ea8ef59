// Shared models for Seatwatch services
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Deref;

use crate::utils::money::Money;

// ============================================================================
// Listings
// ============================================================================

/// One resale offer as returned by a single poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub section: String,
    pub row: String,
    /// All-in total price in cents
    pub price_cents: i64,
    pub section_group: String,
}

impl Listing {
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A listing that passed the criteria and beat any previously notified price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedListing(Listing);

impl AcceptedListing {
    pub fn new(listing: Listing) -> Self {
        Self(listing)
    }
}

impl Deref for AcceptedListing {
    type Target = Listing;

    fn deref(&self) -> &Listing {
        &self.0
    }
}

// ============================================================================
// Acceptance criteria
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    pub max_price_cents: i64,
    /// Passed through to the listings query; not used for filtering
    pub quantity: u32,
    /// Empty means every section is acceptable
    pub sections: HashSet<String>,
    pub max_row: Option<String>,
}

impl Criteria {
    pub fn new(max_price: Money, quantity: u32) -> Self {
        Self {
            max_price_cents: max_price.cents(),
            quantity,
            sections: HashSet::new(),
            max_row: None,
        }
    }

    pub fn with_sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = sections.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_row(mut self, max_row: impl Into<String>) -> Self {
        self.max_row = Some(max_row.into());
        self
    }

    pub fn max_price(&self) -> Money {
        Money::from_cents(self.max_price_cents)
    }
}

// ============================================================================
// Event metadata
// ============================================================================

/// Human-readable event details used to build the public event page URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    pub event_id: String,
    pub category: String,
    pub away_team: String,
    pub home_team: String,
    /// Local calendar date of the event
    pub date: NaiveDate,
    pub city: String,
    pub state: String,
    pub venue_name: String,
}

impl EventContext {
    /// Canonical event page, e.g.
    /// `https://gametime.co/nba/nyk-at-bos-tickets/3-7-2025-boston-ma-td-garden/events/abc123`
    pub fn canonical_url(&self, web_base_url: &str) -> String {
        format!(
            "{}/{}/{}-at-{}-tickets/{}-{}-{}-{}/events/{}",
            web_base_url.trim_end_matches('/'),
            self.category,
            self.away_team,
            self.home_team,
            self.date.format("%-m-%-d-%Y"),
            self.city,
            self.state,
            self.venue_name.replace(' ', "-"),
            self.event_id
        )
        .to_lowercase()
    }
}
