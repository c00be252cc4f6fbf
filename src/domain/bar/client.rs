//! Bars sub-client.

use crate::client::MarketClient;
use crate::domain::bar::{normalize_bars, Bar, BarRequest};
use crate::error::MarketError;

/// Sub-client for OHLC bars.
pub struct Bars<'a> {
    pub(crate) client: &'a MarketClient,
}

impl<'a> Bars<'a> {
    /// Bars for `request`, in payload order. Unrecognized payload shapes
    /// yield an empty list rather than an error.
    pub async fn get(&self, request: &BarRequest) -> Result<Vec<Bar>, MarketError> {
        let payload = self.client.http.get_stock_bars(request).await?;
        Ok(normalize_bars(&payload, request.symbol.as_str()))
    }
}
