//! Retry policies for backend requests.
//!
//! Every endpoint defaults to [`RetryPolicy::None`]: the live chart timer is
//! the only automatic retry. Callers opt in per client.

use crate::error::HttpError;
use std::time::Duration;

/// How a client retries failed GETs.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt; failures surface immediately.
    #[default]
    None,
    /// [`RetryConfig::idempotent`].
    Idempotent,
    Custom(RetryConfig),
}

impl RetryPolicy {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RetryPolicy::None)
    }

    /// The effective config, `None` when retries are off.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(config) => Some(config.clone()),
        }
    }
}

/// Exponential backoff parameters.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Ceiling applied before jitter.
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    /// Server statuses worth another attempt.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Transport failures, timeouts, 429 and gateway errors.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    /// Whether `err` is worth another attempt under this config.
    pub fn is_retryable(&self, err: &HttpError) -> bool {
        match err {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } | HttpError::Timeout => true,
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Backoff before retry number `attempt + 1` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let scaled = self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(exponent);
        let capped = scaled.min(self.max_delay.as_millis() as f64);

        let ms = if self.jitter {
            let spread = capped * 0.25 * (rand::random::<f64>() * 2.0 - 1.0);
            (capped + spread).max(0.0)
        } else {
            capped
        };
        Duration::from_millis(ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(initial_ms: u64, max_ms: u64, factor: f64) -> RetryConfig {
        RetryConfig {
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_factor: factor,
            jitter: false,
            ..RetryConfig::default()
        }
    }

    #[test]
    fn test_default_policy_never_retries() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
        assert!(!RetryPolicy::default().is_enabled());
        assert!(RetryPolicy::default().config().is_none());
    }

    #[test]
    fn test_idempotent_statuses() {
        let config = RetryPolicy::Idempotent.config().unwrap();
        assert_eq!(config.retryable_statuses, vec![429, 502, 503, 504]);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_classification() {
        let config = RetryConfig::default();
        let gateway = HttpError::ServerError {
            status: 503,
            body: String::new(),
        };
        let internal = HttpError::ServerError {
            status: 500,
            body: String::new(),
        };
        assert!(config.is_retryable(&gateway));
        assert!(!config.is_retryable(&internal));
        assert!(config.is_retryable(&HttpError::Timeout));
        assert!(!config.is_retryable(&HttpError::NotFound("x".into())));
        assert!(!config.is_retryable(&HttpError::Unauthorized));
    }

    #[test]
    fn test_backoff_doubles() {
        let config = fixed(100, 10_000, 2.0);
        let delays: Vec<u128> = (0..3).map(|a| config.delay_for_attempt(a).as_millis()).collect();
        assert_eq!(delays, [100, 200, 400]);
    }

    #[test]
    fn test_backoff_capped() {
        assert_eq!(fixed(1000, 2000, 10.0).delay_for_attempt(3).as_millis(), 2000);
    }

    #[test]
    fn test_jitter_within_quarter() {
        let config = RetryConfig::idempotent();
        for _ in 0..50 {
            let ms = config.delay_for_attempt(1).as_millis();
            assert!((300..=500).contains(&ms), "{ms}");
        }
    }
}
