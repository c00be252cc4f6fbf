//! Conversion: raw movers payload → `MoverSet`.

use super::{MoverSet, GAINERS_KEY, LOSERS_KEY};
use crate::domain::asset::normalize_list;
use serde_json::Value;

/// Classify a movers payload.
///
/// - array → `List`
/// - object whose `gainers` or `losers` normalizes to a non-empty list →
///   `Split`, the other side kept as-is (possibly empty)
/// - any other object → `List` of the object itself via the list wrapper keys
/// - anything else → empty `List`
pub fn normalize_movers(payload: &Value) -> MoverSet {
    match payload {
        Value::Array(_) => MoverSet::List {
            items: normalize_list(payload),
        },
        Value::Object(object) => {
            let side = |key: &str| object.get(key).map(normalize_list).unwrap_or_default();
            let gainers = side(GAINERS_KEY);
            let losers = side(LOSERS_KEY);

            if !gainers.is_empty() || !losers.is_empty() {
                MoverSet::Split { gainers, losers }
            } else {
                MoverSet::List {
                    items: normalize_list(payload),
                }
            }
        }
        _ => {
            tracing::trace!("movers payload is neither an array nor an object");
            MoverSet::default()
        }
    }
}
