//! Display metrics derived from a `CanonicalAsset`.
//!
//! At most three metrics per asset, in this order:
//! 1. price (currency)
//! 2. change (percent if a percent field resolved, otherwise absolute currency)
//! 3. the first of volume / trades / market cap that resolved (compact)

use super::CanonicalAsset;
use crate::shared::fmt::{compact, currency, percent};
use crate::shared::Tone;
use serde::{Deserialize, Serialize};

/// Percent-change magnitudes above this are taken as percentage points
/// (`5` meaning 5%) rather than fractions (`0.05`). The upstream schema does
/// not say which it sends.
pub const PERCENT_POINTS_THRESHOLD: f64 = 1.5;

/// Prices at or above this get 2 decimals, below it 4.
pub const PRICE_PRECISION_THRESHOLD: f64 = 100.0;

pub const MAX_METRICS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMetric {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl DisplayMetric {
    fn new(label: &str, value: String, tone: Tone) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone,
        }
    }
}

/// Normalize a raw percent change to a fraction.
pub fn normalize_percent_change(raw: f64) -> f64 {
    if raw.abs() > PERCENT_POINTS_THRESHOLD {
        raw / 100.0
    } else {
        raw
    }
}

fn price_decimals(value: f64) -> usize {
    if value >= PRICE_PRECISION_THRESHOLD {
        2
    } else {
        4
    }
}

fn change_metric(asset: &CanonicalAsset) -> Option<DisplayMetric> {
    let formatted = match (asset.percent_change, asset.absolute_change) {
        (Some(raw), _) => percent(normalize_percent_change(raw), 2),
        (None, Some(change)) => currency(change, price_decimals(change.abs())),
        (None, None) => return None,
    };
    // Toned from the text so a change that rounds to zero is not red.
    let tone = Tone::of_formatted(&formatted);
    Some(DisplayMetric::new("Change", formatted, tone))
}

fn activity_metric(asset: &CanonicalAsset) -> Option<DisplayMetric> {
    [
        ("Volume", asset.volume),
        ("Trades", asset.trades),
        ("Market Cap", asset.market_cap),
    ]
    .into_iter()
    .find_map(|(label, value)| {
        value
            .and_then(compact)
            .map(|formatted| DisplayMetric::new(label, formatted, Tone::None))
    })
}

/// Build the display metrics for one asset.
pub fn build_metrics(asset: &CanonicalAsset) -> Vec<DisplayMetric> {
    let price = asset
        .price
        .map(|p| DisplayMetric::new("Price", currency(p, price_decimals(p)), Tone::None));

    let mut metrics: Vec<DisplayMetric> = [price, change_metric(asset), activity_metric(asset)]
        .into_iter()
        .flatten()
        .collect();
    metrics.truncate(MAX_METRICS);
    metrics
}
