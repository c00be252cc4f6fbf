//! Assets sub-client — most actives and symbol lists.

use crate::client::MarketClient;
use crate::domain::asset::{normalize_list, symbols_from_list, CanonicalAsset};
use crate::error::MarketError;
use crate::shared::{AssetClass, Symbol};
use std::time::Instant;

/// Sub-client for asset feeds.
pub struct Assets<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Assets<'a> {
    /// The most-actives feed, normalized.
    pub async fn most_active(&self) -> Result<Vec<CanonicalAsset>, MarketError> {
        let resp = self.client.http.get_most_active_stocks().await?;
        Ok(normalize_list(&resp.most_active_stocks))
    }

    /// Tradable US equity symbols. Uses TTL cache.
    pub async fn stock_list(&self) -> Result<Vec<Symbol>, MarketError> {
        self.symbols(AssetClass::UsEquity).await
    }

    /// Tradable crypto pairs. Uses TTL cache.
    pub async fn crypto_list(&self) -> Result<Vec<Symbol>, MarketError> {
        self.symbols(AssetClass::Crypto).await
    }

    /// Symbol list for `class`. Uses TTL cache.
    pub async fn symbols(&self, class: AssetClass) -> Result<Vec<Symbol>, MarketError> {
        {
            let cache = self.client.symbol_cache.read().await;
            if let Some((symbols, fetched_at)) = cache.get(&class) {
                if fetched_at.elapsed() < self.client.symbol_cache_ttl {
                    return Ok(symbols.clone());
                }
            }
        }

        let resp = match class {
            AssetClass::UsEquity => self.client.http.get_stock_list().await?,
            AssetClass::Crypto => self.client.http.get_crypto_list().await?,
        };
        let symbols = symbols_from_list(&resp.symbols);

        self.client
            .symbol_cache
            .write()
            .await
            .insert(class, (symbols.clone(), Instant::now()));
        Ok(symbols)
    }

    /// Invalidate the cached list for one asset class.
    pub async fn invalidate(&self, class: AssetClass) {
        self.client.symbol_cache.write().await.remove(&class);
    }
}
