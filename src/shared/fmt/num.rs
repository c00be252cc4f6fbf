//! Number formatting utilities for human-readable display.
//!
//! Comma separators and trailing-zero trimming, plus the fixed-precision
//! currency and percent forms used by display metrics.
//! For compact (K/M/B/T) notation, use the `decimal` sibling module.

/// Split a formatted number into sign and magnitude, dropping the sign when
/// the rounded magnitude is zero (`-0.00` displays as `0.00`).
fn split_sign(formatted: &str) -> (bool, &str) {
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().any(|c| matches!(c, '1'..='9')) => (true, rest),
        Some(rest) => (false, rest),
        None => (false, formatted),
    }
}

/// Insert thousands separators into the integer part of an unsigned number.
fn group_thousands(unsigned: &str) -> String {
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 + 8);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}

/// Adds thousands separators without touching the fractional digits.
pub fn with_separators(formatted: &str) -> String {
    let (negative, unsigned) = split_sign(formatted);
    let grouped = group_thousands(unsigned);
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Trims trailing zeros, adds thousands separators.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    with_separators(trimmed)
}

/// US-dollar currency with a fixed number of decimals: `-$1,234.50`.
pub fn currency(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", amount, decimals);
    let (negative, unsigned) = split_sign(&formatted);
    let grouped = group_thousands(unsigned);
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// A fraction rendered as a percentage: `0.0512` → `5.12%`.
pub fn percent(fraction: f64, decimals: usize) -> String {
    let formatted = format!("{:.1$}", fraction * 100.0, decimals);
    format!("{}%", with_separators(&formatted))
}
