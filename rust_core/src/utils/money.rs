//! Minor-unit money handling for listing prices.
//!
//! Listing prices arrive from the provider as integer cents and every
//! comparison in the filter happens in that scale. The only f64 dollar
//! amount is the user's max price, converted once at the CLI edge.
//!
//! # Usage
//!
//! ```rust
//! use seatwatch_rust_core::utils::money::Money;
//!
//! let max = Money::from_dollars(45.0);
//! assert_eq!(max.cents(), 4500);
//! assert_eq!(Money::from_cents(1_234_567).to_string(), "$12,345.67");
//! ```

use std::fmt;

/// Money value stored as cents (i64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Create from cents directly (no conversion)
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create from dollars, dropping any fraction of a cent.
    ///
    /// Rounding down keeps a limit like `45.999` from admitting `$46.00`.
    #[inline]
    pub fn from_dollars(dollars: f64) -> Self {
        Self {
            cents: to_cents(dollars),
        }
    }

    /// Get value in cents
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.cents
    }
}

/// Renders as `$1,234.50`, grouping whole dollars in thousands.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.cents.unsigned_abs();
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}${}.{:02}",
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Convert dollars to whole cents, never rounding up.
///
/// The small nudge absorbs f64 representation error (19.99 * 100 is
/// 1998.9999...) before flooring.
#[inline]
pub fn to_cents(dollars: f64) -> i64 {
    (dollars * 100.0 + 1e-6).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_dollars() {
        assert_eq!(Money::from_dollars(45.0).cents(), 4500);
        assert_eq!(Money::from_dollars(0.01).cents(), 1);
        assert_eq!(Money::from_dollars(-5.50).cents(), -550);
    }

    #[test]
    fn test_money_from_dollars_never_rounds_up() {
        // 19.99 * 100 is 1998.9999... in f64
        assert_eq!(Money::from_dollars(19.99).cents(), 1999);
        assert_eq!(Money::from_dollars(0.29).cents(), 29);
        assert_eq!(Money::from_dollars(1.234).cents(), 123);
        assert_eq!(Money::from_dollars(1.236).cents(), 123);
        assert_eq!(Money::from_dollars(45.999).cents(), 4599);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4500).to_string(), "$45.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-456).to_string(), "-$4.56");
    }

    #[test]
    fn test_money_display_groups_thousands() {
        assert_eq!(Money::from_cents(100_000).to_string(), "$1,000.00");
        assert_eq!(Money::from_cents(1_234_567).to_string(), "$12,345.67");
        assert_eq!(Money::from_cents(99_999_999).to_string(), "$999,999.99");
        assert_eq!(Money::from_cents(123_456_789_00).to_string(), "$123,456,789.00");
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(12.5), 1250);
        assert_eq!(to_cents(0.0), 0);
        assert_eq!(to_cents(120.50), 12050);
    }
}
