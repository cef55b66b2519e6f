use crate::error::CoreResult;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// Key-sorted, whitespace-free JSON bytes of `value`.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    let s = serde_json::to_string(&sort_keys(v))?;
    Ok(s.into_bytes())
}

/// Content hash used as a cache key for catalogs and filter states.
pub fn fingerprint<T: Serialize>(value: &T) -> CoreResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(value)?))
}

fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, vv)| (k, sort_keys(vv))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
