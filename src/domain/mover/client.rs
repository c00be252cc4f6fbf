//! Movers sub-client.

use crate::client::MarketClient;
use crate::domain::mover::{normalize_movers, MoverSet};
use crate::error::MarketError;
use crate::shared::AssetClass;

/// Sub-client for the gainers/losers feeds.
pub struct Movers<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Movers<'a> {
    pub async fn stocks(&self) -> Result<MoverSet, MarketError> {
        let resp = self.client.http.get_stock_market_movers().await?;
        Ok(normalize_movers(&resp.movers))
    }

    pub async fn crypto(&self) -> Result<MoverSet, MarketError> {
        let resp = self.client.http.get_crypto_market_movers().await?;
        Ok(normalize_movers(&resp.movers))
    }

    pub async fn get(&self, class: AssetClass) -> Result<MoverSet, MarketError> {
        match class {
            AssetClass::UsEquity => self.stocks().await,
            AssetClass::Crypto => self.crypto().await,
        }
    }
}
