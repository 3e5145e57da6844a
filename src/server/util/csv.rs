//! Flattened CSV rendering of JSON records.
//!
//! Only scalar fields are exported. Headers come from the first record, in field order,
//! and nested objects, arrays and nulls are dropped.

use serde_json::{Map, Value};

/// Renders records as CSV. An empty slice renders as an empty string.
pub fn records_to_csv(records: &[Map<String, Value>]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<&String> = first
        .iter()
        .filter(|(_, value)| is_scalar(value))
        .map(|(key, _)| key)
        .collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        let fields: Vec<String> = headers
            .iter()
            .map(|header| render_field(record.get(header.as_str())))
            .collect();
        lines.push(fields.join(","));
    }

    lines.join("\n")
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => format!("\"{}\"", s.replace('"', "\"\"")),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(values: Vec<Value>) -> Vec<Map<String, Value>> {
        values
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    }

    #[test]
    fn empty_input_renders_empty_string() {
        assert_eq!(records_to_csv(&[]), "");
    }

    #[test]
    fn drops_nested_fields_and_quotes_strings() {
        let rows = records(vec![
            json!({"city": "Springfield", "total": 3, "breakdown": {"roads": 3}, "ok": true}),
            json!({"city": "Shelbyville", "total": 0, "breakdown": {}, "ok": false}),
        ]);

        let csv = records_to_csv(&rows);

        assert_eq!(
            csv,
            "city,total,ok\n\"Springfield\",3,true\n\"Shelbyville\",0,false"
        );
    }

    #[test]
    fn produces_one_line_per_record_plus_header() {
        let rows = records(vec![
            json!({"a": "x", "b": 1}),
            json!({"a": "y", "b": 2}),
            json!({"a": "z", "b": 3}),
        ]);

        let csv = records_to_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert!(lines.iter().all(|line| line.split(',').count() == 2));
    }

    #[test]
    fn missing_values_render_empty_and_quotes_are_doubled() {
        let rows = records(vec![
            json!({"name": "say \"hi\"", "n": 1}),
            json!({"name": null}),
        ]);

        let csv = records_to_csv(&rows);

        assert_eq!(csv, "name,n\n\"say \"\"hi\"\"\",1\n,");
    }
}
