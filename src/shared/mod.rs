//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod resolve;

pub use resolve::{coerce, resolve, resolve_number, resolve_string, try_coerce, RawRecord};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── Symbol ──────────────────────────────────────────────────────────────────

/// Newtype for ticker symbols (e.g. `"AAPL"`, `"BTC/USD"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Symbol(s.to_string()))
    }
}

impl Serialize for Symbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Symbol(s))
    }
}

// ─── AssetClass ──────────────────────────────────────────────────────────────

/// Asset universe an upstream feed covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    UsEquity,
    Crypto,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AssetClass::UsEquity => write!(f, "stocks"),
            AssetClass::Crypto => write!(f, "crypto"),
        }
    }
}

// ─── Tone ────────────────────────────────────────────────────────────────────

/// Display tone of a metric value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    #[default]
    None,
}

impl Tone {
    /// Tone of an already formatted signed value. Zero, including a value
    /// that rounded to zero, counts as positive.
    pub fn of_formatted(formatted: &str) -> Self {
        if !formatted.starts_with('-') {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

// ─── Timeframe ───────────────────────────────────────────────────────────────

/// Bar bucket granularity accepted by the bars endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1Min")]
    Minute1,
    #[serde(rename = "5Min")]
    Minute5,
    #[serde(rename = "15Min")]
    Minute15,
    #[serde(rename = "1Hour")]
    Hour1,
    #[serde(rename = "1Day")]
    Day1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute1 => "1Min",
            Self::Minute5 => "5Min",
            Self::Minute15 => "15Min",
            Self::Hour1 => "1Hour",
            Self::Day1 => "1Day",
        }
    }

    /// Duration of one bar in seconds.
    pub fn seconds(&self) -> u64 {
        match self {
            Self::Minute1 => 60,
            Self::Minute5 => 300,
            Self::Minute15 => 900,
            Self::Hour1 => 3600,
            Self::Day1 => 86400,
        }
    }

    /// The coarsest granularity: axis labels show dates only.
    pub fn is_daily(&self) -> bool {
        matches!(self, Self::Day1)
    }

    pub fn all() -> &'static [Timeframe] {
        &[
            Self::Minute1,
            Self::Minute5,
            Self::Minute15,
            Self::Hour1,
            Self::Day1,
        ]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| format!("unknown timeframe: {s}"))
    }
}
