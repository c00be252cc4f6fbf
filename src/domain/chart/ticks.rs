//! Axis tick placement and time-label policy.

use crate::domain::bar::Bar;
use crate::shared::Timeframe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// `count` evenly spaced values from `max` down to `min`, both included.
///
/// Fewer than two ticks degenerates to a single tick at `max`.
pub fn y_tick_values(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![max];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| max - step * i as f64).collect()
}

/// Most decimals a price-axis label carries.
pub const MAX_LABEL_DECIMALS: usize = 8;

/// Decimals for Y-tick labels: enough that one tick step moves the last
/// shown digit, so neighbouring labels never collapse into the same text.
///
/// A flat range (no step) falls back to 2 decimals at or above 100, else 4.
pub fn y_label_decimals(min: f64, max: f64, count: usize) -> usize {
    let step = if count < 2 {
        0.0
    } else {
        (max - min).abs() / (count - 1) as f64
    };
    if !step.is_finite() || step <= 0.0 {
        return if max.abs() >= 100.0 { 2 } else { 4 };
    }
    let needed = (-step.log10()).ceil();
    if needed <= 0.0 {
        0
    } else {
        (needed as usize).min(MAX_LABEL_DECIMALS)
    }
}

/// Up to `desired` bar indices spread evenly over `0..n`, always including
/// the first and last index, sorted ascending.
///
/// When `n < desired` every index is returned.
pub fn x_tick_indices(n: usize, desired: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }

    let last = n - 1;
    let mut indices = BTreeSet::new();
    if desired >= 2 {
        let span = last as f64 / (desired - 1) as f64;
        indices.extend((0..desired).map(|i| (i as f64 * span).round() as usize));
    }
    indices.insert(0);
    indices.insert(last);
    indices.into_iter().collect()
}

/// Which components a time-axis label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabelPolicy {
    pub show_date: bool,
    pub show_time: bool,
}

impl AxisLabelPolicy {
    /// Dates appear on daily charts or when the first and last drawn bars
    /// fall on different calendar days (UTC). Times appear unless daily.
    pub fn for_bars(bars: &[Bar], timeframe: Timeframe) -> Self {
        let mut stamps = bars
            .iter()
            .filter(|bar| bar.is_renderable())
            .filter_map(|bar| bar.timestamp);
        let first = stamps.next();
        let last = stamps.last().or(first);

        let spans_days = match (first, last) {
            (Some(a), Some(b)) => a.date_naive() != b.date_naive(),
            _ => false,
        };

        Self {
            show_date: timeframe.is_daily() || spans_days,
            show_time: !timeframe.is_daily(),
        }
    }

    pub fn format(&self, at: DateTime<Utc>) -> String {
        let pattern = match (self.show_date, self.show_time) {
            (true, true) => "%b %d %H:%M",
            (true, false) => "%b %d",
            (false, true) => "%H:%M",
            (false, false) => return String::new(),
        };
        at.format(pattern).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar_at(ts: DateTime<Utc>) -> Bar {
        Bar {
            open: Some(1.0),
            high: Some(2.0),
            low: Some(0.5),
            close: Some(1.5),
            volume: None,
            timestamp: Some(ts),
        }
    }

    #[test]
    fn test_y_ticks_inclusive_descending() {
        assert_eq!(y_tick_values(0.0, 100.0, 5), vec![100.0, 75.0, 50.0, 25.0, 0.0]);
    }

    #[test]
    fn test_y_ticks_degenerate() {
        assert_eq!(y_tick_values(0.0, 100.0, 1), vec![100.0]);
        assert_eq!(y_tick_values(0.0, 100.0, 0), vec![100.0]);
    }

    #[test]
    fn test_y_label_decimals_follow_step() {
        assert_eq!(y_label_decimals(0.0, 100.0, 5), 0);
        assert_eq!(y_label_decimals(187.2, 187.8, 5), 1);
        assert_eq!(y_label_decimals(0.010, 0.012, 5), 4);
        assert_eq!(y_label_decimals(0.0, 1e-12, 5), MAX_LABEL_DECIMALS);
    }

    #[test]
    fn test_y_label_decimals_flat_range() {
        assert_eq!(y_label_decimals(187.5, 187.5, 5), 2);
        assert_eq!(y_label_decimals(0.5, 0.5, 5), 4);
        assert_eq!(y_label_decimals(0.0, 100.0, 1), 2);
    }

    #[test]
    fn test_x_ticks_hundred_bars() {
        let ticks = x_tick_indices(100, 6);
        assert_eq!(ticks, vec![0, 20, 40, 59, 79, 99]);
    }

    #[test]
    fn test_x_ticks_always_six_unique_sorted_when_enough_bars() {
        for n in 6..300 {
            let ticks = x_tick_indices(n, 6);
            assert_eq!(ticks.len(), 6, "n = {n}");
            assert_eq!(ticks[0], 0);
            assert_eq!(*ticks.last().unwrap(), n - 1);
            assert!(ticks.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_x_ticks_fewer_bars_than_desired() {
        for n in 1..6 {
            assert_eq!(x_tick_indices(n, 6), (0..n).collect::<Vec<_>>());
        }
        assert!(x_tick_indices(0, 6).is_empty());
    }

    #[test]
    fn test_x_ticks_tiny_desired() {
        assert_eq!(x_tick_indices(10, 1), vec![0, 9]);
        assert_eq!(x_tick_indices(10, 0), vec![0, 9]);
    }

    #[test]
    fn test_label_policy_intraday_same_day() {
        let bars = [
            bar_at(Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap()),
            bar_at(Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap()),
        ];
        let policy = AxisLabelPolicy::for_bars(&bars, Timeframe::Minute5);
        assert!(!policy.show_date);
        assert!(policy.show_time);
        assert_eq!(policy.format(bars[0].timestamp.unwrap()), "14:00");
    }

    #[test]
    fn test_label_policy_intraday_spanning_days() {
        let bars = [
            bar_at(Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap()),
            Bar::default(),
            bar_at(Utc.with_ymd_and_hms(2024, 3, 2, 1, 0, 0).unwrap()),
        ];
        let policy = AxisLabelPolicy::for_bars(&bars, Timeframe::Hour1);
        assert!(policy.show_date && policy.show_time);
        assert_eq!(policy.format(bars[2].timestamp.unwrap()), "Mar 02 01:00");
    }

    #[test]
    fn test_label_policy_daily() {
        let bars = [bar_at(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())];
        let policy = AxisLabelPolicy::for_bars(&bars, Timeframe::Day1);
        assert!(policy.show_date);
        assert!(!policy.show_time);
        assert_eq!(policy.format(bars[0].timestamp.unwrap()), "Mar 01");
    }

    #[test]
    fn test_label_policy_ignores_undrawn_bars() {
        let mut undrawn = bar_at(Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap());
        undrawn.close = None;
        let bars = [
            undrawn,
            bar_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        ];
        let policy = AxisLabelPolicy::for_bars(&bars, Timeframe::Minute1);
        assert!(!policy.show_date);
    }
}
