//! Unified error types.

use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum MarketError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors. Any of these counts as a network failure for the feed
/// that raised it.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Shape and scalar failures met while normalizing upstream payloads.
///
/// The public normalizers never return these: they degrade to `None` or an
/// empty collection. The strict `try_*` helpers expose them for callers that
/// want to know why a field went missing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(&'static str),

    #[error("Unparsable numeric value: {0}")]
    UnparsableNumeric(String),

    #[error("Unparsable timestamp: {0}")]
    UnparsableTimestamp(String),
}
