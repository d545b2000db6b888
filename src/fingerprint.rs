//! Layout Fingerprints - Canonical JSON + SHA-256
//!
//! The engine promises reproducible output: the same content request and
//! theme always compose to the same layout. Fingerprints make that promise
//! checkable by hash equality instead of deep structural comparison.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

use crate::geometry::LayoutSpec;

/// SHA-256 of raw bytes as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Canonical JSON: object keys sorted recursively, no whitespace. Two
/// structurally equal values always serialize identically.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Fingerprint of a composed layout: every position, size, color, and text
/// attribute participates.
pub fn layout_fingerprint(layout: &LayoutSpec) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(layout)?;
    Ok(sha256_hex(canonical.as_bytes()))
}

/// Fingerprint of a build request plus the engine version, for audit
/// logging: `sha256(engine_version + ":" + canonical_request)`.
pub fn build_fingerprint<T: Serialize>(
    request: &T,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(request)?;
    Ok(sha256_hex(
        format!("{engine_version}:{canonical}").as_bytes(),
    ))
}
