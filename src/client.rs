//! High-level client — `MarketClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::asset::client::Assets;
use crate::domain::asset::DashboardState;
use crate::domain::bar::client::Bars;
use crate::domain::bar::{Bar, BarRequest};
use crate::domain::chart::session::{BarSource, ChartSession};
use crate::domain::chart::{ChartQuery, PollConfig};
use crate::domain::mover::client::Movers;
use crate::error::MarketError;
use crate::http::{MarketHttp, RetryPolicy, DEFAULT_TIMEOUT};
use crate::shared::{AssetClass, Symbol};

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::bar::client::Bars as BarsClient;
pub use crate::domain::mover::client::Movers as MoversClient;

/// Default lifetime of a cached symbol list.
pub const DEFAULT_SYMBOL_CACHE_TTL: Duration = Duration::from_secs(300);

/// The primary entry point.
///
/// Provides nested sub-client accessors for each feed:
/// `client.assets()`, `client.movers()`, `client.bars()`.
pub struct MarketClient {
    pub(crate) http: MarketHttp,
    /// Symbol list cache: asset class → (symbols, fetched_at)
    pub(crate) symbol_cache: Arc<RwLock<HashMap<AssetClass, (Vec<Symbol>, Instant)>>>,
    pub(crate) symbol_cache_ttl: Duration,
}

impl MarketClient {
    pub fn builder() -> MarketClientBuilder {
        MarketClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn movers(&self) -> Movers<'_> {
        Movers { client: self }
    }

    pub fn bars(&self) -> Bars<'_> {
        Bars { client: self }
    }

    /// Health probe against `GET /`. Returns the backend's greeting.
    pub async fn ping(&self) -> Result<Option<String>, MarketError> {
        Ok(self.http.get_root().await?.message)
    }

    /// Fetch every snapshot feed once and apply what arrived.
    ///
    /// A failed feed is logged and leaves its slice of `state` untouched.
    /// Returns the number of feeds that failed.
    pub async fn refresh_dashboard(&self, state: &mut DashboardState) -> usize {
        let mut failed = 0;

        match self.assets().most_active().await {
            Ok(assets) => state.apply_most_active(assets),
            Err(e) => {
                failed += 1;
                tracing::warn!(feed = "most_active", error = %e, "feed refresh failed");
            }
        }

        for class in [AssetClass::UsEquity, AssetClass::Crypto] {
            match self.movers().get(class).await {
                Ok(movers) => state.apply_movers(class, movers),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(feed = "movers", ?class, error = %e, "feed refresh failed");
                }
            }
            match self.assets().symbols(class).await {
                Ok(symbols) => state.apply_symbols(class, symbols),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(feed = "symbols", ?class, error = %e, "feed refresh failed");
                }
            }
        }

        failed
    }

    /// A chart session fetching through a clone of this client.
    pub fn chart(&self, query: ChartQuery, config: PollConfig) -> ChartSession<MarketClient> {
        ChartSession::new(self.clone(), query, config)
    }

    /// Drop every cached symbol list.
    pub async fn clear_symbol_cache(&self) {
        self.symbol_cache.write().await.clear();
    }
}

impl BarSource for MarketClient {
    async fn fetch_bars(&self, request: &BarRequest) -> Result<Vec<Bar>, MarketError> {
        self.bars().get(request).await
    }
}

impl Clone for MarketClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            symbol_cache: self.symbol_cache.clone(),
            symbol_cache_ttl: self.symbol_cache_ttl,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct MarketClientBuilder {
    base_url: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    symbol_cache_ttl: Duration,
}

impl Default for MarketClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_policy: RetryPolicy::None,
            symbol_cache_ttl: DEFAULT_SYMBOL_CACHE_TTL,
        }
    }
}

impl MarketClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Take the base URL from `MARKETVIEW_API_URL` when set and non-empty.
    pub fn from_env(self) -> Self {
        match std::env::var(crate::network::API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.base_url(url.trim()),
            _ => self,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn symbol_cache_ttl(mut self, ttl: Duration) -> Self {
        self.symbol_cache_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<MarketClient, MarketError> {
        if self.base_url.trim().is_empty() {
            return Err(MarketError::Validation("base URL is empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(MarketError::Validation("timeout must be non-zero".to_string()));
        }

        tracing::debug!(
            base_url = %self.base_url,
            retries = self.retry_policy.is_enabled(),
            "building market client"
        );

        Ok(MarketClient {
            http: MarketHttp::with_options(&self.base_url, self.timeout, self.retry_policy),
            symbol_cache: Arc::new(RwLock::new(HashMap::new())),
            symbol_cache_ttl: self.symbol_cache_ttl,
        })
    }
}
