use anyhow::{bail, Result};
use clap::Parser;
use seatwatch_rust_core::models::Criteria;
use seatwatch_rust_core::utils::money::Money;

/// Watch a Gametime event and text when cheap enough tickets show up.
#[derive(Debug, Parser)]
#[command(name = "listing_monitor", version, about)]
pub struct Cli {
    /// ID of the event
    pub event_id: String,

    /// Maximum all-in price in dollars
    pub max_price: f64,

    /// Number of tickets wanted together
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub quantity: u32,

    /// Phone number to text, formatted like +16789998212
    pub send_to: String,

    /// Comma-separated list of acceptable sections
    #[arg(long)]
    pub sections: Option<String>,

    /// Worst acceptable row (e.g. 20, or AA)
    #[arg(long)]
    pub max_row: Option<String>,
}

impl Cli {
    pub fn criteria(&self) -> Result<Criteria> {
        if !self.max_price.is_finite() || self.max_price < 0.0 {
            bail!("max_price must be a non-negative amount, got {}", self.max_price);
        }

        let mut criteria = Criteria::new(Money::from_dollars(self.max_price), self.quantity)
            .with_sections(self.section_list());

        if let Some(max_row) = self.max_row.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            criteria = criteria.with_max_row(max_row);
        }

        Ok(criteria)
    }

    fn section_list(&self) -> Vec<String> {
        self.sections
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
