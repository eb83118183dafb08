//! Tolerant decoding of per-shop sequences.
//!
//! Documents written by older clients are not always well formed: a per-shop
//! field may hold a scalar instead of a list, numbers may be stored as text,
//! and elements may be `null`. Decoding never fails on these shapes; a scalar
//! becomes a single-element sequence and unreadable elements take the type's
//! fallback value so positions stay aligned with `shop_id`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ids::ShopId;

/// A value that can always be recovered from an arbitrary JSON element.
pub trait Lenient: Sized {
    fn from_value(value: &Value) -> Self;
}

impl Lenient for i64 {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .unwrap_or(0),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }
}

impl Lenient for f64 {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

impl Lenient for String {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl Lenient for ShopId {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => ShopId::new(s.trim()),
            Value::Number(n) => ShopId::new(n.to_string()),
            _ => ShopId::new(String::new()),
        }
    }
}

/// Decode a per-shop field: list, scalar, `null` or missing.
///
/// Use with `#[serde(default, deserialize_with = "lenient_sequence")]`.
pub fn lenient_sequence<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Lenient,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(T::from_value).collect(),
        Some(scalar) => vec![T::from_value(&scalar)],
    })
}
