//! Asset domain — canonical asset records from snapshot feeds.

#[cfg(feature = "http")]
pub mod client;
pub mod convert;
pub mod metrics;
pub mod state;
pub mod wire;

use crate::shared::Symbol;
use serde::{Deserialize, Serialize};

pub use convert::{list_items, normalize_list, symbols_from_list, try_list_items};
pub use metrics::{build_metrics, normalize_percent_change, DisplayMetric};
pub use state::DashboardState;

// ─── Field priority lists ────────────────────────────────────────────────────

pub const SYMBOL_KEYS: &[&str] = &["symbol", "ticker", "S"];
pub const NAME_KEYS: &[&str] = &["name", "company_name", "display_name"];
pub const PRICE_KEYS: &[&str] = &["price", "last_price", "current_price", "close", "last"];
pub const PERCENT_CHANGE_KEYS: &[&str] = &[
    "percent_change",
    "change_percent",
    "changePercent",
    "percentage_change",
    "pct_change",
];
pub const CHANGE_KEYS: &[&str] = &["change", "price_change", "net_change"];
pub const VOLUME_KEYS: &[&str] = &["volume", "v"];
pub const TRADES_KEYS: &[&str] = &["trade_count", "trades", "n"];
pub const MARKET_CAP_KEYS: &[&str] = &["market_cap", "marketCap", "market_capitalization"];

/// Keys probed, in order, when a list payload arrives wrapped in an object.
pub const LIST_WRAPPER_KEYS: &[&str] = &["most_actives", "most_active_stocks", "items", "data", "list"];

/// One asset as the UI sees it, whatever the upstream record looked like.
///
/// `percent_change` holds the raw upstream figure; whether it is a fraction
/// or percentage points is decided when metrics are built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalAsset {
    pub symbol: Symbol,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub percent_change: Option<f64>,
    pub absolute_change: Option<f64>,
    pub volume: Option<f64>,
    pub trades: Option<f64>,
    pub market_cap: Option<f64>,
}

impl CanonicalAsset {
    /// An asset known only by its symbol (e.g. from a bare string list).
    pub fn from_symbol(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn metrics(&self) -> Vec<DisplayMetric> {
        build_metrics(self)
    }
}
