//! Conversion: raw list payloads → `CanonicalAsset`.

use super::{
    CanonicalAsset, CHANGE_KEYS, LIST_WRAPPER_KEYS, MARKET_CAP_KEYS, NAME_KEYS,
    PERCENT_CHANGE_KEYS, PRICE_KEYS, SYMBOL_KEYS, TRADES_KEYS, VOLUME_KEYS,
};
use crate::error::NormalizeError;
use crate::shared::{resolve_number, resolve_string, RawRecord, Symbol};
use serde_json::Value;

impl From<&RawRecord> for CanonicalAsset {
    fn from(record: &RawRecord) -> Self {
        Self {
            symbol: resolve_string(record, SYMBOL_KEYS)
                .map(Symbol::from)
                .unwrap_or_default(),
            name: resolve_string(record, NAME_KEYS),
            price: resolve_number(record, PRICE_KEYS),
            percent_change: resolve_number(record, PERCENT_CHANGE_KEYS),
            absolute_change: resolve_number(record, CHANGE_KEYS),
            volume: resolve_number(record, VOLUME_KEYS),
            trades: resolve_number(record, TRADES_KEYS),
            market_cap: resolve_number(record, MARKET_CAP_KEYS),
        }
    }
}

/// Locate the item sequence of a list payload.
///
/// A top-level array is used as-is. An object is probed with
/// [`LIST_WRAPPER_KEYS`] in order; the first key holding an array wins.
pub fn try_list_items(payload: &Value) -> Result<&[Value], NormalizeError> {
    match payload {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Object(object) => LIST_WRAPPER_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .ok_or(NormalizeError::MalformedPayload(
                "object has no array under a known wrapper key",
            )),
        _ => Err(NormalizeError::MalformedPayload(
            "list payload is neither an array nor an object",
        )),
    }
}

/// [`try_list_items`], degrading to an empty slice.
pub fn list_items(payload: &Value) -> &[Value] {
    match try_list_items(payload) {
        Ok(items) => items,
        Err(err) => {
            tracing::trace!(%err, "list payload not recognized");
            &[]
        }
    }
}

fn asset_from_item(item: &Value) -> Option<CanonicalAsset> {
    match item {
        Value::Object(record) => Some(CanonicalAsset::from(record)),
        Value::String(symbol) => Some(CanonicalAsset::from_symbol(symbol.as_str())),
        _ => None,
    }
}

/// Extract canonical assets from a payload of unknown shape.
///
/// Never fails: unrecognized payloads yield an empty list and items that are
/// neither records nor symbol strings are skipped.
pub fn normalize_list(payload: &Value) -> Vec<CanonicalAsset> {
    list_items(payload).iter().filter_map(asset_from_item).collect()
}

/// Extract the symbols of a symbol-list payload.
pub fn symbols_from_list(payload: &Value) -> Vec<Symbol> {
    list_items(payload)
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(Symbol::from(s.as_str())),
            Value::Object(record) => resolve_string(record, SYMBOL_KEYS).map(Symbol::from),
            _ => None,
        })
        .filter(|symbol| !symbol.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_fields_resolved_by_priority() {
        let payload = json!([{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "last_price": "1,234.50",
            "close": 1.0,
            "percent_change": 2.5,
            "change": 3.1,
            "volume": 1000,
            "trade_count": 12
        }]);
        let assets = normalize_list(&payload);
        assert_eq!(assets.len(), 1);
        let a = &assets[0];
        assert_eq!(a.symbol.as_str(), "AAPL");
        assert_eq!(a.name.as_deref(), Some("Apple Inc."));
        assert_eq!(a.price, Some(1234.5));
        assert_eq!(a.percent_change, Some(2.5));
        assert_eq!(a.absolute_change, Some(3.1));
        assert_eq!(a.volume, Some(1000.0));
        assert_eq!(a.trades, Some(12.0));
        assert_eq!(a.market_cap, None);
    }

    #[test]
    fn test_wrapper_key_priority() {
        let payload = json!({
            "data": [{"symbol": "B"}],
            "most_actives": [{"symbol": "A"}],
            "last_updated": "2024-01-01T00:00:00Z"
        });
        let assets = normalize_list(&payload);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].symbol.as_str(), "A");
    }

    #[test]
    fn test_wrapper_key_must_hold_an_array() {
        let payload = json!({"most_actives": {"symbol": "A"}, "items": [{"symbol": "C"}]});
        let assets = normalize_list(&payload);
        assert_eq!(assets[0].symbol.as_str(), "C");
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        assert!(normalize_list(&json!({"foo": [1]})).is_empty());
        assert!(normalize_list(&json!("AAPL")).is_empty());
        assert!(normalize_list(&Value::Null).is_empty());
        assert!(matches!(
            try_list_items(&json!(42)),
            Err(NormalizeError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_string_items_become_symbol_only_assets() {
        let assets = normalize_list(&json!(["MSFT", 7, null]));
        assert_eq!(assets, vec![CanonicalAsset::from_symbol("MSFT")]);
    }

    #[test]
    fn test_symbols_from_list() {
        let payload = json!(["AAPL", {"symbol": "MSFT"}, {"foo": 1}, "", 3]);
        let symbols = symbols_from_list(&payload);
        assert_eq!(symbols, vec![Symbol::from("AAPL"), Symbol::from("MSFT")]);
    }
}
