// Mapper to convert JSON-RPC payloads to domain models
use crate::domain::metrics::{MetricSnapshot, SeriesPoint};
use anyhow::{bail, Result};
use serde_json::Value;

/// Object of named numbers. `false`/`null` (the backend's empty value) and
/// non-numeric members are dropped and later read as zero.
pub fn snapshot_from_json(value: &Value) -> Result<MetricSnapshot> {
    let Some(object) = value.as_object() else {
        bail!("expected an object of metrics, got {}", kind_of(value));
    };

    Ok(object
        .iter()
        .filter_map(|(name, v)| v.as_f64().map(|n| (name.clone(), n)))
        .collect())
}

/// First row of a `search_read` result.
pub fn snapshot_from_rows(value: &Value) -> Result<MetricSnapshot> {
    let Some(rows) = value.as_array() else {
        bail!("expected a list of records, got {}", kind_of(value));
    };
    match rows.first() {
        Some(row) => snapshot_from_json(row),
        None => bail!("backend returned no dashboard record"),
    }
}

/// List of `{category_key: str, value_key: number}` objects, order preserved.
pub fn series_from_json(
    value: &Value,
    category_key: &str,
    value_key: &str,
) -> Result<Vec<SeriesPoint>> {
    let Some(items) = value.as_array() else {
        bail!("expected a list of points, got {}", kind_of(value));
    };

    let mut points = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let Some(category) = item.get(category_key).and_then(Value::as_str) else {
            bail!("point {} has no `{}` label", idx, category_key);
        };
        let value = item.get(value_key).and_then(Value::as_f64).unwrap_or(0.0);
        points.push(SeriesPoint::new(category, value));
    }

    Ok(points)
}

/// Id returned by `create`.
pub fn record_id_from_json(value: &Value) -> Result<i64> {
    // Some versions answer `create` with a one-element list
    let id = match value {
        Value::Array(ids) => ids.first().and_then(Value::as_i64),
        other => other.as_i64(),
    };
    match id {
        Some(id) => Ok(id),
        None => bail!("expected a record id, got {}", kind_of(value)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
