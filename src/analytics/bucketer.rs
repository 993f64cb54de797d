use serde_json::Value;
use tracing::debug;
use crate::models::MonthlyRevenue;

/// Normalize a raw monthly time-series result into well-formed rows.
///
/// The date range has already been applied by the query stage. A source that
/// is not an array (an error object, `null`) yields an empty series. Entries
/// that are not records are dropped.
pub fn normalize_monthly(source: &Value) -> Vec<MonthlyRevenue> {
    let Value::Array(rows) = source else {
        debug!(kind = value_kind(source), "Monthly revenue source is not a sequence");
        return Vec::new();
    };

    rows.iter()
        .filter(|row| row.is_object())
        .map(MonthlyRevenue::from_value)
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
