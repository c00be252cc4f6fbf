//! HTTP client layer — `MarketHttp` with an opt-in retry policy.

pub mod client;
pub mod retry;

pub use client::{MarketHttp, DEFAULT_TIMEOUT};
pub use retry::{RetryConfig, RetryPolicy};
