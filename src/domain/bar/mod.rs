//! Bar domain — OHLC samples for the chart.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod timestamp;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use convert::{bar_items, normalize_bars, try_bar_items};
pub use timestamp::{parse_timestamp, try_parse_timestamp};
pub use wire::BarRequest;

// ─── Field priority lists ────────────────────────────────────────────────────

pub const OPEN_KEYS: &[&str] = &["o", "open"];
pub const HIGH_KEYS: &[&str] = &["h", "high"];
pub const LOW_KEYS: &[&str] = &["l", "low"];
pub const CLOSE_KEYS: &[&str] = &["c", "close"];
pub const BAR_VOLUME_KEYS: &[&str] = &["v", "volume"];
pub const TIMESTAMP_KEYS: &[&str] = &["t", "timestamp", "time", "date"];

/// One OHLC sample as delivered. Any field may be missing.
///
/// A bar missing any of open/high/low/close is not drawn, but it keeps its
/// slot in the sequence so axis indices stay aligned with the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The resolved prices of a drawable bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    /// Ties count as up.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

impl Bar {
    pub fn ohlc(&self) -> Option<Ohlc> {
        Some(Ohlc {
            open: self.open?,
            high: self.high?,
            low: self.low?,
            close: self.close?,
        })
    }

    pub fn is_renderable(&self) -> bool {
        self.ohlc().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ohlc_requires_all_four_prices() {
        let bar = Bar {
            open: Some(1.0),
            high: Some(2.0),
            low: Some(0.5),
            close: None,
            ..Bar::default()
        };
        assert!(bar.ohlc().is_none());
        assert!(!bar.is_renderable());
    }

    #[test]
    fn test_flat_bar_is_up() {
        let ohlc = Ohlc {
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.0,
        };
        assert!(ohlc.is_up());
    }
}
