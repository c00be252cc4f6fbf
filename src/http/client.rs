//! Low-level HTTP client — `MarketHttp`.
//!
//! One method per backend endpoint. Returns wire envelopes or raw JSON;
//! normalization into domain types happens at the client boundary.

use crate::domain::asset::wire::{
    MostActiveStocksResponse, MoversResponse, RootResponse, SymbolListResponse,
};
use crate::domain::bar::BarRequest;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the market data backend.
pub struct MarketHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl MarketHttp {
    pub fn new(base_url: &str) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT, RetryPolicy::None)
    }

    pub fn with_options(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Self {
        let builder = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            retry,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Health ───────────────────────────────────────────────────────────

    pub async fn get_root(&self) -> Result<RootResponse, HttpError> {
        let url = format!("{}/", self.base_url);
        self.get(&url).await
    }

    // ── Snapshot feeds ───────────────────────────────────────────────────

    pub async fn get_most_active_stocks(&self) -> Result<MostActiveStocksResponse, HttpError> {
        let url = format!("{}/get-most-active-stocks", self.base_url);
        self.get(&url).await
    }

    pub async fn get_stock_market_movers(&self) -> Result<MoversResponse, HttpError> {
        let url = format!("{}/get-stock-market-movers", self.base_url);
        self.get(&url).await
    }

    pub async fn get_crypto_market_movers(&self) -> Result<MoversResponse, HttpError> {
        let url = format!("{}/get-crypto-market-movers", self.base_url);
        self.get(&url).await
    }

    // ── Symbol lists ─────────────────────────────────────────────────────

    pub async fn get_stock_list(&self) -> Result<SymbolListResponse, HttpError> {
        let url = format!("{}/get-stock-list", self.base_url);
        self.get(&url).await
    }

    pub async fn get_crypto_list(&self) -> Result<SymbolListResponse, HttpError> {
        let url = format!("{}/get-crypto-list", self.base_url);
        self.get(&url).await
    }

    // ── Bars ─────────────────────────────────────────────────────────────

    /// Raw bar payload; its shape varies, see `domain::bar::convert`.
    pub async fn get_stock_bars(
        &self,
        request: &BarRequest,
    ) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}/get-stock-bars?{}", self.base_url, request.query_string());
        self.get(&url).await
    }

    // ── Transport ────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.get_once(url).await;
        };

        let mut attempt = 0;
        loop {
            let err = match self.get_once::<T>(url).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !config.is_retryable(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            let delay = match err {
                HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                } => Duration::from_millis(ms),
                _ => config.delay_for_attempt(attempt),
            };
            attempt += 1;
            tracing::debug!(
                attempt,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "retrying {}",
                url
            );
            futures_timer::Delay::new(delay).await;
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), body))
    }
}

fn status_error(status: u16, body: String) -> HttpError {
    match status {
        401 => HttpError::Unauthorized,
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited {
            retry_after_ms: None,
        },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

impl Clone for MarketHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            retry: self.retry.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let http = MarketHttp::new("http://localhost:8000/");
        assert_eq!(http.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(status_error(401, String::new()), HttpError::Unauthorized));
        assert!(matches!(status_error(404, "x".into()), HttpError::NotFound(b) if b == "x"));
        assert!(matches!(status_error(429, String::new()), HttpError::RateLimited { .. }));
        assert!(matches!(status_error(422, String::new()), HttpError::BadRequest(_)));
        assert!(matches!(
            status_error(503, "down".into()),
            HttpError::ServerError { status: 503, .. }
        ));
    }
}
