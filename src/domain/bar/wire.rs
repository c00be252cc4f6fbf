//! Wire types for the bars endpoint (REST).

use crate::shared::{Symbol, Timeframe};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Query for `GET /get-stock-bars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRequest {
    pub symbol: Symbol,
    pub timeframe: Timeframe,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BarRequest {
    /// Query string with ISO-8601 `start`/`end`.
    pub fn query_string(&self) -> String {
        format!(
            "symbol={}&timeframe={}&start={}&end={}",
            urlencoding::encode(self.symbol.as_str()),
            self.timeframe.as_str(),
            urlencoding::encode(&self.start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            urlencoding::encode(&self.end.to_rfc3339_opts(SecondsFormat::Secs, true)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_query_string_encodes_symbol_and_instants() {
        let req = BarRequest {
            symbol: Symbol::from("BTC/USD"),
            timeframe: Timeframe::Minute5,
            start: Utc.with_ymd_and_hms(2024, 3, 1, 14, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 1, 15, 0, 0).unwrap(),
        };
        assert_eq!(
            req.query_string(),
            "symbol=BTC%2FUSD&timeframe=5Min&start=2024-03-01T14%3A00%3A00Z&end=2024-03-01T15%3A00%3A00Z"
        );
    }
}
