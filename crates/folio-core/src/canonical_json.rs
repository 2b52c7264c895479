//! Deterministic JSON canonicalization.
//!
//! Content hashes must not depend on the order in which an editor happened to
//! write object keys, so everything hashed goes through this module first:
//! - object keys are sorted lexicographically, at every depth
//! - arrays keep their order (block order is meaningful)
//! - output is minified JSON with no extra whitespace

use serde::Serialize;
use serde_json::{Map, Value};

/// Convert a serializable value into its canonical `serde_json::Value` form.
pub fn to_canonical_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    Ok(sort_keys(serde_json::to_value(value)?))
}

/// Convert a serializable value to canonical JSON bytes.
pub fn to_canonical_json_bytes<T: Serialize + ?Sized>(
    value: &T,
) -> Result<Vec<u8>, serde_json::Error> {
    let canon = to_canonical_value(value)?;
    let mut out = Vec::new();
    serde_json::to_writer(&mut out, &canon)?;
    Ok(out)
}

/// Convert a serializable value to a canonical JSON string.
pub fn to_canonical_json_string<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, serde_json::Error> {
    let canon = to_canonical_value(value)?;
    serde_json::to_string(&canon)
}

fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));

            // serde_json's default Map is a BTreeMap, but `preserve_order` may be
            // switched on by another crate in the graph. Insert in sorted order so
            // both backings serialize identically.
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
