//! Listing acceptance.
//!
//! A listing is accepted when it passes every check below, evaluated in
//! order and short-circuiting on the first failure:
//! 1. price at or under the max price
//! 2. not already notified at the same or a lower price
//! 3. in an allowed section (when a section list is given)
//! 4. at or before the max row (when a row bound is given)
//!
//! Filtering never writes to the ledger. The formatter commits accepted
//! listings once the outbound message has been built.

use crate::ledger::DedupLedger;
use crate::models::{AcceptedListing, Criteria, Listing};
use crate::utils::row_order::is_at_or_before;
use tracing::debug;

/// Why a listing was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    OverMaxPrice,
    AlreadyNotified,
    SectionNotAllowed,
    BeyondMaxRow,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OverMaxPrice => "over_max_price",
            Self::AlreadyNotified => "already_notified",
            Self::SectionNotAllowed => "section_not_allowed",
            Self::BeyondMaxRow => "beyond_max_row",
        }
    }
}

/// Check a single listing against the criteria and ledger.
pub fn check_listing(
    listing: &Listing,
    criteria: &Criteria,
    ledger: &DedupLedger,
) -> Result<(), RejectionReason> {
    if listing.price_cents > criteria.max_price_cents {
        return Err(RejectionReason::OverMaxPrice);
    }

    if ledger.is_notified_at_or_below(&listing.id, listing.price_cents) {
        return Err(RejectionReason::AlreadyNotified);
    }

    if !criteria.sections.is_empty() && !criteria.sections.contains(&listing.section) {
        return Err(RejectionReason::SectionNotAllowed);
    }

    if let Some(max_row) = &criteria.max_row {
        if !is_at_or_before(&listing.row, max_row) {
            return Err(RejectionReason::BeyondMaxRow);
        }
    }

    Ok(())
}

/// Keep the listings worth notifying about, in provider order.
pub fn filter_listings(
    listings: Vec<Listing>,
    criteria: &Criteria,
    ledger: &DedupLedger,
) -> Vec<AcceptedListing> {
    listings
        .into_iter()
        .filter_map(|listing| match check_listing(&listing, criteria, ledger) {
            Ok(()) => Some(AcceptedListing::new(listing)),
            Err(reason) => {
                debug!(
                    "Skipping listing {} (sec {}, row {}, {}): {}",
                    listing.id,
                    listing.section,
                    listing.row,
                    listing.price(),
                    reason.as_str()
                );
                None
            }
        })
        .collect()
}
