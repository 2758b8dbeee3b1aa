//! Builders for document changes used across tests.

use serde_json::Value;

use crate::domain::{DocumentChange, Fields};

/// Convert a `json!` object literal into a field map.
///
/// # Panics
///
/// Panics when `value` is not a JSON object.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// An update of `product` in `event` from `before` to `after`.
pub fn update(product: &str, event: &str, before: Value, after: Value) -> DocumentChange {
    DocumentChange::new(product, event, fields(before), Some(fields(after)))
}

/// A deletion of `product` in `event`.
pub fn deletion(product: &str, event: &str, before: Value) -> DocumentChange {
    DocumentChange::new(product, event, fields(before), None)
}
