//! Network URL constants for the market data backend.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable consulted by `MarketClientBuilder::from_env`.
pub const API_URL_ENV: &str = "MARKETVIEW_API_URL";
