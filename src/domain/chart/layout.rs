//! Candlestick layout: bars and a price range → SVG-space geometry.
//!
//! Coordinates follow SVG conventions: origin top-left, y grows downward.
//! Bars occupy uniform slots left to right; a bar that cannot be drawn still
//! holds its slot so tick indices line up with the input sequence.

use super::ticks::{x_tick_indices, y_label_decimals, y_tick_values, AxisLabelPolicy};
use crate::domain::bar::Bar;
use crate::shared::fmt::num;
use crate::shared::Timeframe;
use serde::{Deserialize, Serialize};

pub const MIN_BODY_WIDTH: f64 = 4.0;
pub const BODY_WIDTH_RATIO: f64 = 0.6;
pub const MIN_BODY_HEIGHT: f64 = 1.0;
/// Floor for the price range so flat series do not divide by zero.
pub const RANGE_EPSILON: f64 = 1e-9;
pub const Y_TICK_COUNT: usize = 5;
pub const X_TICK_COUNT: usize = 6;

// ─── Dimensions ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 16.0,
            right: 16.0,
            bottom: 28.0,
            left: 64.0,
        }
    }
}

/// Overall SVG size and the padding reserved for axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 320.0,
            padding: Padding::default(),
        }
    }
}

impl ChartDimensions {
    pub fn plot_area(&self) -> PlotArea {
        PlotArea {
            left: self.padding.left,
            top: self.padding.top,
            width: (self.width - self.padding.left - self.padding.right).max(0.0),
            height: (self.height - self.padding.top - self.padding.bottom).max(0.0),
        }
    }
}

/// The rectangle candles are drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

// ─── Scales ──────────────────────────────────────────────────────────────────

/// Vertical price extent of a bar set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceExtent {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl PriceExtent {
    /// Lowest resolvable low to highest resolvable high; `[0, 1]` when the
    /// bars have no resolvable low or no resolvable high.
    pub fn from_bars(bars: &[Bar]) -> Self {
        let min = bars.iter().filter_map(|b| b.low).reduce(f64::min);
        let max = bars.iter().filter_map(|b| b.high).reduce(f64::max);
        match (min, max) {
            (Some(min), Some(max)) => Self { min, max },
            _ => Self::default(),
        }
    }

    pub fn range(&self) -> f64 {
        (self.max - self.min).max(RANGE_EPSILON)
    }
}

/// Linear price → y mapping over a plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    top: f64,
    height: f64,
    extent: PriceExtent,
}

impl PriceScale {
    pub fn new(plot: &PlotArea, extent: PriceExtent) -> Self {
        Self {
            top: plot.top,
            height: plot.height,
            extent,
        }
    }

    pub fn y(&self, value: f64) -> f64 {
        self.top + (self.extent.max - value) / self.extent.range() * self.height
    }
}

/// Uniform slot mapping from bar index to x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexScale {
    left: f64,
    spacing: f64,
}

impl IndexScale {
    pub fn new(plot: &PlotArea, count: usize) -> Self {
        Self {
            left: plot.left,
            spacing: plot.width / count.max(1) as f64,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Center of the slot at `index`.
    pub fn x(&self, index: usize) -> f64 {
        self.left + self.spacing * (index as f64 + 0.5)
    }

    pub fn body_width(&self) -> f64 {
        (self.spacing * BODY_WIDTH_RATIO).max(MIN_BODY_WIDTH)
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleTone {
    Up,
    Down,
}

/// One drawable candle: a wick from high to low and a body from open to close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    /// Slot center; the wick is drawn here.
    pub x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub body_x: f64,
    pub body_top: f64,
    pub body_width: f64,
    pub body_height: f64,
    pub tone: CandleTone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YTick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XTick {
    pub index: usize,
    pub x: f64,
    /// `None` when the bar at this index has no timestamp.
    pub label: Option<String>,
}

/// Everything needed to draw one chart frame. Recomputed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub extent: PriceExtent,
    pub y_ticks: Vec<YTick>,
    pub x_ticks: Vec<XTick>,
    pub candles: Vec<CandleGeometry>,
    pub labels: AxisLabelPolicy,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub dimensions: ChartDimensions,
    pub y_tick_count: usize,
    pub x_tick_count: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::new(ChartDimensions::default())
    }
}

impl ChartLayout {
    pub fn new(dimensions: ChartDimensions) -> Self {
        Self {
            dimensions,
            y_tick_count: Y_TICK_COUNT,
            x_tick_count: X_TICK_COUNT,
        }
    }

    /// Lay out an already-windowed bar sequence.
    pub fn compute(&self, bars: &[Bar], timeframe: Timeframe) -> ChartGeometry {
        let plot = self.dimensions.plot_area();
        let extent = PriceExtent::from_bars(bars);
        let prices = PriceScale::new(&plot, extent);
        let slots = IndexScale::new(&plot, bars.len());
        let labels = AxisLabelPolicy::for_bars(bars, timeframe);

        let decimals = y_label_decimals(extent.min, extent.max, self.y_tick_count);
        let y_ticks = y_tick_values(extent.min, extent.max, self.y_tick_count)
            .into_iter()
            .map(|value| YTick {
                value,
                y: prices.y(value),
                label: num::with_separators(&format!("{:.1$}", value, decimals)),
            })
            .collect();

        let x_ticks = x_tick_indices(bars.len(), self.x_tick_count)
            .into_iter()
            .map(|index| XTick {
                index,
                x: slots.x(index),
                label: bars[index].timestamp.map(|ts| labels.format(ts)),
            })
            .collect();

        let candles = bars
            .iter()
            .enumerate()
            .filter_map(|(index, bar)| candle(index, bar, &prices, &slots))
            .collect();

        ChartGeometry {
            width: self.dimensions.width,
            height: self.dimensions.height,
            plot,
            extent,
            y_ticks,
            x_ticks,
            candles,
            labels,
        }
    }
}

fn candle(index: usize, bar: &Bar, prices: &PriceScale, slots: &IndexScale) -> Option<CandleGeometry> {
    let ohlc = bar.ohlc()?;
    let x = slots.x(index);
    let body_width = slots.body_width();
    let open_y = prices.y(ohlc.open);
    let close_y = prices.y(ohlc.close);

    Some(CandleGeometry {
        index,
        x,
        wick_top: prices.y(ohlc.high),
        wick_bottom: prices.y(ohlc.low),
        body_x: x - body_width / 2.0,
        body_top: open_y.min(close_y),
        body_width,
        body_height: (open_y - close_y).abs().max(MIN_BODY_HEIGHT),
        tone: if ohlc.is_up() {
            CandleTone::Up
        } else {
            CandleTone::Down
        },
    })
}
