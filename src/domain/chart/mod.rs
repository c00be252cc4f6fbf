//! Chart domain — query, polling state machine, layout engine.

pub mod layout;
#[cfg(feature = "http")]
pub mod session;
pub mod state;
pub mod ticks;

use crate::domain::bar::{Bar, BarRequest};
use crate::shared::{Symbol, Timeframe};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use layout::{ChartDimensions, ChartGeometry, ChartLayout};
pub use state::{FetchTicket, LoadState, PollingController};
pub use ticks::AxisLabelPolicy;

pub const DEFAULT_WINDOW_MINUTES: u32 = 60;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_LIVE_BAR_LIMIT: usize = 60;

/// Live charts follow "now"; historical charts show a fixed range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Live,
    Historical,
}

/// Every user-controlled chart parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartQuery {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub mode: ChartMode,
    pub window_minutes: u32,
    /// Anchor of the historical range; ignored in live mode.
    pub range_start: Option<DateTime<Utc>>,
}

impl ChartQuery {
    pub fn live(symbol: impl Into<Symbol>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            mode: ChartMode::Live,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            range_start: None,
        }
    }

    pub fn historical(
        symbol: impl Into<Symbol>,
        timeframe: Timeframe,
        range_start: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            mode: ChartMode::Historical,
            window_minutes: DEFAULT_WINDOW_MINUTES,
            range_start,
        }
    }

    pub fn with_window_minutes(mut self, minutes: u32) -> Self {
        self.window_minutes = minutes;
        self
    }

    /// `[now - window, now]` live, `[start, start + window]` historical.
    ///
    /// `None` for a historical query without an anchor.
    pub fn window(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let span = ChronoDuration::minutes(i64::from(self.window_minutes));
        match self.mode {
            ChartMode::Live => Some((now - span, now)),
            ChartMode::Historical => self.range_start.map(|start| (start, start + span)),
        }
    }

    pub fn bar_request(&self, now: DateTime<Utc>) -> Option<BarRequest> {
        self.window(now).map(|(start, end)| BarRequest {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe,
            start,
            end,
        })
    }
}

/// Refresh cadence and live windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub live_bar_limit: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            live_bar_limit: DEFAULT_LIVE_BAR_LIMIT,
        }
    }
}

/// The bars to lay out: the most recent `live_limit` in live mode, all of
/// them in historical mode.
pub fn window_bars(bars: &[Bar], mode: ChartMode, live_limit: usize) -> &[Bar] {
    match mode {
        ChartMode::Live => &bars[bars.len().saturating_sub(live_limit)..],
        ChartMode::Historical => bars,
    }
}

/// Point-in-time copy of the polling state, handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub query: ChartQuery,
    pub state: LoadState,
    pub bars: Vec<Bar>,
    pub live_bar_limit: usize,
}

impl ChartSnapshot {
    pub fn visible_bars(&self) -> &[Bar] {
        window_bars(&self.bars, self.query.mode, self.live_bar_limit)
    }

    pub fn geometry(&self, layout: &ChartLayout) -> ChartGeometry {
        layout.compute(self.visible_bars(), self.query.timeframe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_live_window_ends_now() {
        let q = ChartQuery::live("AAPL", Timeframe::Minute1).with_window_minutes(30);
        let (start, end) = q.window(now()).unwrap();
        assert_eq!(end, now());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_historical_window_is_anchored() {
        let anchor = Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
        let q = ChartQuery::historical("AAPL", Timeframe::Minute5, Some(anchor)).with_window_minutes(90);
        let (start, end) = q.window(now()).unwrap();
        assert_eq!(start, anchor);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_historical_without_anchor_has_no_window() {
        let q = ChartQuery::historical("AAPL", Timeframe::Minute5, None);
        assert!(q.window(now()).is_none());
        assert!(q.bar_request(now()).is_none());
    }

    #[test]
    fn test_window_bars() {
        let bars = vec![Bar::default(); 100];
        assert_eq!(window_bars(&bars, ChartMode::Live, 60).len(), 60);
        assert_eq!(window_bars(&bars, ChartMode::Historical, 60).len(), 100);
        assert_eq!(window_bars(&bars[..10], ChartMode::Live, 60).len(), 10);
    }

    #[test]
    fn test_live_window_keeps_most_recent() {
        let bars: Vec<Bar> = (0..5)
            .map(|i| Bar {
                open: Some(i as f64),
                ..Bar::default()
            })
            .collect();
        let visible = window_bars(&bars, ChartMode::Live, 2);
        assert_eq!(visible[0].open, Some(3.0));
        assert_eq!(visible[1].open, Some(4.0));
    }
}
