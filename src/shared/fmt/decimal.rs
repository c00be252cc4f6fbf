//! Compact (SI-suffix) formatting for volumes, trade counts and market caps.
//!
//! Values are converted to `rust_decimal::Decimal` before scaling so that
//! `1_500_000.0` prints as `1.5M` rather than carrying binary float noise.

use rust_decimal::prelude::*;

const SUFFIXES: [(u64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

/// Round to `digits` places and drop trailing zeros.
fn trimmed(value: Decimal, digits: u32) -> String {
    let rounded = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
    super::num::display_formatted_string(rounded.to_string())
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes, trimming trailing zeros.
pub fn abbr_number(amount: &Decimal, digits: Option<u32>, show_sign: Option<bool>) -> String {
    let digits = digits.unwrap_or(2);
    let show_sign = show_sign.unwrap_or(true);
    let sign = if show_sign && amount < &Decimal::ZERO {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    for (threshold, suffix) in SUFFIXES {
        let threshold = Decimal::from(threshold);
        if abs_amount >= threshold {
            return format!("{}{}{}", sign, trimmed(abs_amount / threshold, digits), suffix);
        }
    }

    format!("{}{}", sign, trimmed(abs_amount, digits))
}

/// Compact notation for an `f64`: `1234` → `1.23K`, `2.5e9` → `2.5B`.
///
/// Returns `None` for values `Decimal` cannot represent (non-finite or out of range).
pub fn compact(amount: f64) -> Option<String> {
    Decimal::from_f64(amount).map(|d| abbr_number(&d, None, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_abbr_number_below_thousand() {
        assert_eq!(abbr_number(&dec("0"), None, None), "0");
        assert_eq!(abbr_number(&dec("999"), None, None), "999");
        assert_eq!(abbr_number(&dec("12.345"), None, None), "12.35");
    }

    #[test]
    fn test_abbr_number_thousands() {
        assert_eq!(abbr_number(&dec("1000"), None, None), "1K");
        assert_eq!(abbr_number(&dec("1500"), None, None), "1.5K");
        assert_eq!(abbr_number(&dec("12345"), None, None), "12.35K");
    }

    #[test]
    fn test_abbr_number_large() {
        assert_eq!(abbr_number(&dec("1500000"), None, None), "1.5M");
        assert_eq!(abbr_number(&dec("2500000000"), None, None), "2.5B");
        assert_eq!(abbr_number(&dec("3000000000000"), None, None), "3T");
    }

    #[test]
    fn test_abbr_number_negative() {
        assert_eq!(abbr_number(&dec("-1500000"), None, None), "-1.5M");
        assert_eq!(abbr_number(&dec("-1500000"), None, Some(false)), "1.5M");
    }

    #[test]
    fn test_compact_f64() {
        assert_eq!(compact(1_500_000.0).as_deref(), Some("1.5M"));
        assert_eq!(compact(42.0).as_deref(), Some("42"));
        assert_eq!(compact(f64::INFINITY), None);
    }
}
