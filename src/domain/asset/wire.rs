//! Wire envelopes for the snapshot endpoints (REST).
//!
//! The backend wraps every payload under an endpoint-specific key. The inner
//! value has no fixed schema and is kept as raw JSON for the normalizers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET /get-most-active-stocks`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MostActiveStocksResponse {
    #[serde(default)]
    pub most_active_stocks: Value,
}

/// `GET /get-stock-market-movers` and `GET /get-crypto-market-movers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoversResponse {
    #[serde(rename = "stock_market_movers", alias = "crypto_market_movers", default)]
    pub movers: Value,
}

/// `GET /get-stock-list` and `GET /get-crypto-list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolListResponse {
    #[serde(rename = "stock_list", alias = "crypto_list", default)]
    pub symbols: Value,
}
