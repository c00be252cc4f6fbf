//! # marketview
//!
//! Schema-tolerant market data for dashboards: normalizes loosely shaped
//! snapshot feeds into canonical assets, builds display metrics, and lays out
//! candlestick charts fed by a polling state machine.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Field resolution, normalizers, display formatting, chart
//!    layout and the polling state machine (always available, no I/O)
//! 2. **HTTP API** — `MarketHttp` with an opt-in retry policy
//! 3. **High-Level Client** — `MarketClient` with nested sub-clients, a symbol
//!    cache and `ChartSession` for driving a live chart
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketview::prelude::*;
//!
//! let client = MarketClient::builder().from_env().build()?;
//!
//! for asset in client.assets().most_active().await? {
//!     for metric in asset.metrics() {
//!         println!("{} {}: {}", asset.symbol, metric.label, metric.value);
//!     }
//! }
//!
//! let chart = client.chart(ChartQuery::live("AAPL", Timeframe::Minute5), PollConfig::default());
//! chart.start().await;
//! let geometry = chart.geometry(&ChartLayout::default()).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, field resolution and formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Crate error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `MarketClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetClass, RawRecord, Symbol, Timeframe, Tone};

    // Domain types — assets and movers
    pub use crate::domain::asset::{
        build_metrics, normalize_list, CanonicalAsset, DashboardState, DisplayMetric,
    };
    pub use crate::domain::mover::{normalize_movers, MoverSet};

    // Domain types — bars
    pub use crate::domain::bar::{normalize_bars, Bar, BarRequest, Ohlc};

    // Chart
    pub use crate::domain::chart::layout::{CandleGeometry, CandleTone, XTick, YTick};
    pub use crate::domain::chart::{
        AxisLabelPolicy, ChartDimensions, ChartGeometry, ChartLayout, ChartMode, ChartQuery,
        ChartSnapshot, FetchTicket, LoadState, PollConfig, PollingController,
    };

    // Errors
    pub use crate::error::{HttpError, MarketError, NormalizeError};

    // Network
    pub use crate::network::{API_URL_ENV, DEFAULT_API_URL};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AssetsClient, BarsClient, MarketClient, MarketClientBuilder, MoversClient};
    #[cfg(feature = "http")]
    pub use crate::domain::chart::session::{BarSource, ChartSession};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
