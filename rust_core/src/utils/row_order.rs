//! Row label ordering.
//!
//! Venue rows mix digits and letters ("12", "AA", "12A", "GA1"). Labels are
//! split into maximal digit and non-digit runs and compared run by run:
//! - digit runs compare numerically
//! - a digit run always sorts before a non-digit run
//! - non-digit runs compare ordinally
//!
//! When every compared run is equal the label with fewer runs wins, so "1"
//! sorts before "1A" but "1A" does not sort before "1".

use std::cmp::Ordering;

/// One maximal run of a row label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowToken<'a> {
    Digits(&'a str),
    Text(&'a str),
}

impl<'a> RowToken<'a> {
    fn compare(&self, other: &RowToken<'a>) -> Ordering {
        match (self, other) {
            (RowToken::Digits(a), RowToken::Digits(b)) => compare_numeric(a, b),
            (RowToken::Digits(_), RowToken::Text(_)) => Ordering::Less,
            (RowToken::Text(_), RowToken::Digits(_)) => Ordering::Greater,
            (RowToken::Text(a), RowToken::Text(b)) => a.cmp(b),
        }
    }
}

/// Split a label into maximal runs of ASCII digits / everything else
fn tokenize(label: &str) -> Vec<RowToken<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (idx, ch) in label.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                tokens.push(make_token(&label[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(prev) = in_digits {
        tokens.push(make_token(&label[start..], prev));
    }

    tokens
}

fn make_token(run: &str, digits: bool) -> RowToken<'_> {
    if digits {
        RowToken::Digits(run)
    } else {
        RowToken::Text(run)
    }
}

/// Compare two digit runs by value without parsing, so arbitrarily long runs
/// cannot overflow.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Returns true if row `a` is at or before row `b`.
///
/// ```rust
/// use seatwatch_rust_core::utils::row_order::is_at_or_before;
///
/// assert!(is_at_or_before("9", "10"));
/// assert!(is_at_or_before("3", "A"));
/// assert!(!is_at_or_before("A", "3"));
/// ```
pub fn is_at_or_before(a: &str, b: &str) -> bool {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    for (ta, tb) in tokens_a.iter().zip(tokens_b.iter()) {
        match ta.compare(tb) {
            Ordering::Equal => continue,
            ord => return ord != Ordering::Greater,
        }
    }

    tokens_a.len() <= tokens_b.len()
}
