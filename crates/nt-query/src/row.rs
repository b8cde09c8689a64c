//! Decoding executor results into facet rows.

use nt_core::FacetLabel;
use nt_graph::Row;
use serde_json::Value;

use crate::error::{QueryError, QueryResult};

fn label_from_json(value: &Value) -> FacetLabel {
    match value {
        Value::Null => FacetLabel::Missing,
        Value::String(s) => FacetLabel::Text(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| FacetLabel::Text(n.to_string()), FacetLabel::Number),
        other => FacetLabel::Text(other.to_string()),
    }
}

fn decode_row(index: usize, entry: &Value) -> QueryResult<Row> {
    let object = entry.as_object().ok_or_else(|| QueryError::MalformedRow {
        index,
        reason: "expected an object".to_string(),
    })?;

    // Single-facet queries return the facet as a scalar
    let labels = match object.get("facet") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(label_from_json).collect(),
        Some(scalar) => vec![label_from_json(scalar)],
    };

    let value = match object.get("value") {
        None | Some(Value::Null) => 0.0,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| QueryError::MalformedRow {
            index,
            reason: format!("value {n} is not representable"),
        })?,
        Some(other) => {
            return Err(QueryError::MalformedRow {
                index,
                reason: format!("value {other} is not a number"),
            });
        }
    };
    let value = nt_core::ensure_finite(value, "row value").map_err(|e| QueryError::MalformedRow {
        index,
        reason: e.to_string(),
    })?;

    Ok(Row { labels, value })
}

/// Decode a JSON array of result objects (`{"facet": [...], "value": n}`).
///
/// Row order is preserved. A missing or null `value` counts as zero.
pub fn decode_rows(results: &Value) -> QueryResult<Vec<Row>> {
    let entries = results.as_array().ok_or_else(|| {
        QueryError::MalformedPayload(format!(
            "expected an array of results, got {}",
            json_kind(results)
        ))
    })?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| decode_row(index, entry))
        .collect()
}

/// Parse and decode a JSON results document.
pub fn decode_rows_str(json: &str) -> QueryResult<Vec<Row>> {
    let value: Value = serde_json::from_str(json)?;
    decode_rows(&value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_multi_facet_rows() {
        let rows = decode_rows(&json!([
            {"facet": ["AS15169", "rtr-1", "10.0.0.1"], "value": 10},
            {"facet": ["AS15169", "rtr-1", null], "value": 2.5},
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].labels[0], FacetLabel::text("AS15169"));
        assert_eq!(rows[0].value, 10.0);
        assert_eq!(rows[1].labels[2], FacetLabel::Missing);
    }

    #[test]
    fn scalar_facet_and_missing_value() {
        let rows = decode_rows(&json!([{"facet": 64512}, {"value": null}])).unwrap();
        assert_eq!(rows[0].labels, vec![FacetLabel::Number(64512.0)]);
        assert_eq!(rows[0].value, 0.0);
        assert!(rows[1].labels.is_empty());
    }

    #[test]
    fn rejects_non_numeric_value() {
        let err = decode_rows(&json!([{"facet": ["a", "b"], "value": "lots"}])).unwrap_err();
        assert!(matches!(err, QueryError::MalformedRow { index: 0, .. }));
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = decode_rows(&json!({"results": []})).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn empty_results() {
        assert!(decode_rows_str("[]").unwrap().is_empty());
    }
}
