//! Display-only JSON preview of the field layout

use crate::field::FieldDef;
use serde_json::Value;

/// Pretty-printed JSON of the list with `id` stripped from each record.
///
/// Display-only: the result is never persisted and never parsed back into
/// the store.
pub fn derive_preview(fields: &[FieldDef]) -> String {
    let records: Vec<Value> = fields
        .iter()
        .filter_map(|field| serde_json::to_value(field).ok())
        .map(|mut value| {
            if let Value::Object(record) = &mut value {
                record.remove("id");
            }
            value
        })
        .collect();

    serde_json::to_string_pretty(&Value::Array(records)).unwrap_or_else(|_| "[]".to_string())
}
