use seatwatch_rust_core::ledger::DedupLedger;
use seatwatch_rust_core::models::{AcceptedListing, EventContext};
use seatwatch_rust_core::MonitorError;

pub const INTRO_LINE: &str = "I've found gametime tickets:";

/// Deep link to one listing on the event page
pub fn listing_url(event_url: &str, listing_id: &str) -> String {
    format!("{event_url}/listings/{listing_id}/?zoom=10")
}

fn format_listing_block(event_url: &str, listing: &AcceptedListing) -> String {
    format!(
        "{}, sec {}, row {}\n{}",
        listing.price(),
        listing.section,
        listing.row,
        listing_url(event_url, &listing.id)
    )
}

/// Build the alert text for newly accepted listings, cheapest first, and
/// commit every included listing to the ledger.
///
/// The ledger is written here rather than in the filter, so a listing only
/// counts as notified once it made it into an outbound message.
pub fn format_listings(
    event: &EventContext,
    web_base_url: &str,
    accepted: &[AcceptedListing],
    ledger: &mut DedupLedger,
) -> String {
    let event_url = event.canonical_url(web_base_url);

    let mut sorted: Vec<&AcceptedListing> = accepted.iter().collect();
    sorted.sort_by_key(|listing| listing.price_cents);

    let mut out = String::from(INTRO_LINE);
    for listing in sorted {
        out.push_str("\n\n\n");
        out.push_str(&format_listing_block(&event_url, listing));
        ledger.record_or_lower(&listing.id, listing.price_cents);
    }
    out
}

/// Final message sent when transport errors exhaust the retry budget
pub fn format_shutdown(error_count: u32, last_error: &MonitorError) -> String {
    format!(
        "Shutting down listing monitor, too many http errors ({error_count})\nMost recent is {last_error}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use seatwatch_rust_core::models::Listing;

    fn event() -> EventContext {
        EventContext {
            event_id: "evt-1".to_string(),
            category: "nba".to_string(),
            away_team: "Celtics".to_string(),
            home_team: "Knicks".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            city: "Newark".to_string(),
            state: "NJ".to_string(),
            venue_name: "Prudential Center".to_string(),
        }
    }

    fn accepted(id: &str, price_cents: i64) -> AcceptedListing {
        AcceptedListing::new(Listing {
            id: id.to_string(),
            section: "A101".to_string(),
            row: "12".to_string(),
            price_cents,
            section_group: "Lower Level".to_string(),
        })
    }

    #[test]
    fn test_blocks_sorted_by_price() {
        let mut ledger = DedupLedger::new();
        let listings = vec![accepted("mid", 500), accepted("high", 1200), accepted("low", 300)];

        let msg = format_listings(&event(), "https://gametime.co", &listings, &mut ledger);

        let low = msg.find("$3.00").unwrap();
        let mid = msg.find("$5.00").unwrap();
        let high = msg.find("$12.00").unwrap();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_message_layout() {
        let mut ledger = DedupLedger::new();
        let msg = format_listings(
            &event(),
            "https://gametime.co",
            &[accepted("L45", 4500)],
            &mut ledger,
        );

        assert_eq!(
            msg,
            "I've found gametime tickets:\n\n\n$45.00, sec A101, row 12\n\
             https://gametime.co/nba/celtics-at-knicks-tickets/3-7-2025-newark-nj-prudential-center/events/evt-1/listings/L45/?zoom=10"
        );
    }

    #[test]
    fn test_listing_url_keeps_id_case() {
        assert_eq!(
            listing_url("https://gametime.co/nba/x/events/e1", "AbC9"),
            "https://gametime.co/nba/x/events/e1/listings/AbC9/?zoom=10"
        );
    }

    #[test]
    fn test_thousands_in_price() {
        let mut ledger = DedupLedger::new();
        let msg = format_listings(
            &event(),
            "https://gametime.co",
            &[accepted("lux", 1_234_567)],
            &mut ledger,
        );
        assert!(msg.contains("$12,345.67, sec A101, row 12"));
    }

    #[test]
    fn test_commits_ledger() {
        let mut ledger = DedupLedger::new();
        ledger.record_or_lower("L1", 900);

        format_listings(
            &event(),
            "https://gametime.co",
            &[accepted("L1", 800), accepted("L2", 1500)],
            &mut ledger,
        );

        assert_eq!(ledger.get("L1"), Some(800));
        assert_eq!(ledger.get("L2"), Some(1500));
    }

    #[test]
    fn test_shutdown_message() {
        let err = MonitorError::Transport("listings for event evt-1: 503 Service Unavailable".into());
        let msg = format_shutdown(11, &err);
        assert!(msg.contains("(11)"));
        assert!(msg.ends_with("Most recent is HTTP error occurred: listings for event evt-1: 503 Service Unavailable"));
    }
}
