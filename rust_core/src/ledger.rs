//! Notified-price ledger used to suppress repeat notifications.
//!
//! Maps a listing id to the lowest price (cents) it has been notified at.
//! Entries are never pruned: a single event has a bounded number of
//! listings and the ledger lives only as long as the monitoring session.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DedupLedger {
    notified: HashMap<String, i64>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowest price this listing was notified at, if any
    pub fn get(&self, listing_id: &str) -> Option<i64> {
        self.notified.get(listing_id).copied()
    }

    /// True if a listing at `price_cents` would be a repeat (no improvement)
    pub fn is_notified_at_or_below(&self, listing_id: &str, price_cents: i64) -> bool {
        self.get(listing_id)
            .map_or(false, |recorded| recorded <= price_cents)
    }

    /// Insert, or overwrite only when the new price is lower.
    /// Returns true if the ledger changed.
    pub fn record_or_lower(&mut self, listing_id: &str, price_cents: i64) -> bool {
        match self.notified.get_mut(listing_id) {
            Some(recorded) if *recorded <= price_cents => false,
            Some(recorded) => {
                *recorded = price_cents;
                true
            }
            None => {
                self.notified.insert(listing_id.to_string(), price_cents);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.notified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }
}
