//! Shared JSON parsing helpers used by all exchange parsers.
//!
//! Exchanges encode numbers either as JSON strings (`"30000.5"`) or native
//! numbers, and wrap their ticker arrays in differently named envelopes.
//! These helpers keep the per-exchange parsers short.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

/// Parse decimal text, tolerating surrounding whitespace.
#[inline]
pub fn parse_text_f64(s: &str) -> Option<f64> {
    fast_float2::parse(s.trim()).ok()
}

/// Decode a response body into a JSON value.
pub fn parse_body(text: &str) -> Result<Value> {
    serde_json::from_str(text).context("payload is not valid JSON")
}

/// Walk nested object keys, e.g. `["data", "rows"]`.
pub fn get_path<'a>(v: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(v, |cur, key| cur.get(*key))
}

/// The array found at `path` (the root itself when `path` is empty).
pub fn array_at<'a>(v: &'a Value, path: &[&str]) -> Result<&'a Vec<Value>> {
    get_path(v, path).and_then(Value::as_array).ok_or_else(|| {
        let at = if path.is_empty() { "$".to_string() } else { path.join(".") };
        anyhow!("expected an array at '{at}'")
    })
}

/// First string field present among `keys`.
pub fn first_str<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| v.get(*k).and_then(Value::as_str))
}

/// First non-null field present among `keys`.
pub fn first_present<'a>(v: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| v.get(*k).filter(|x| !x.is_null()))
}

/// Reject `{"success": false, ...}` envelopes, surfacing the venue's message.
pub fn ensure_success(v: &Value) -> Result<()> {
    match v.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let msg = first_present(v, &["message", "error", "msg"])
                .map(Value::to_string)
                .unwrap_or_default();
            Err(anyhow!("request rejected: {msg}"))
        }
        _ => Ok(()),
    }
}
