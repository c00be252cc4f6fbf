//! Conversion: raw bar payloads → `Bar` sequences.

use super::{
    parse_timestamp, Bar, BAR_VOLUME_KEYS, CLOSE_KEYS, HIGH_KEYS, LOW_KEYS, OPEN_KEYS,
    TIMESTAMP_KEYS,
};
use crate::error::NormalizeError;
use crate::shared::{resolve, resolve_number, RawRecord};
use serde_json::Value;

pub const BARS_KEY: &str = "bars";

impl From<&RawRecord> for Bar {
    fn from(record: &RawRecord) -> Self {
        Self {
            open: resolve_number(record, OPEN_KEYS),
            high: resolve_number(record, HIGH_KEYS),
            low: resolve_number(record, LOW_KEYS),
            close: resolve_number(record, CLOSE_KEYS),
            volume: resolve_number(record, BAR_VOLUME_KEYS),
            timestamp: resolve(record, TIMESTAMP_KEYS).and_then(parse_timestamp),
        }
    }
}

/// Locate the bar sequence for `symbol`.
///
/// Probes, in order: the payload itself as an array, `payload.bars`,
/// `payload.bars[symbol]`, `payload[symbol]`.
pub fn try_bar_items<'a>(payload: &'a Value, symbol: &str) -> Result<&'a [Value], NormalizeError> {
    if let Value::Array(items) = payload {
        return Ok(items.as_slice());
    }

    let object = payload
        .as_object()
        .ok_or(NormalizeError::MalformedPayload(
            "bar payload is neither an array nor an object",
        ))?;
    let bars = object.get(BARS_KEY);

    bars.and_then(Value::as_array)
        .or_else(|| bars.and_then(|b| b.get(symbol)).and_then(Value::as_array))
        .or_else(|| object.get(symbol).and_then(Value::as_array))
        .map(Vec::as_slice)
        .ok_or(NormalizeError::MalformedPayload(
            "no bar array for the requested symbol",
        ))
}

/// [`try_bar_items`], degrading to an empty slice.
pub fn bar_items<'a>(payload: &'a Value, symbol: &str) -> &'a [Value] {
    match try_bar_items(payload, symbol) {
        Ok(items) => items,
        Err(err) => {
            tracing::trace!(%err, symbol, "bar payload not recognized");
            &[]
        }
    }
}

/// Extract the ordered bar sequence for `symbol` from a payload of unknown shape.
///
/// Items that are not records become empty bars: they are never drawn but
/// keep their index.
pub fn normalize_bars(payload: &Value, symbol: &str) -> Vec<Bar> {
    bar_items(payload, symbol)
        .iter()
        .map(|item| item.as_object().map(Bar::from).unwrap_or_default())
        .collect()
}
