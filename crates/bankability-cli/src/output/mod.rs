pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use colored::Colorize;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-printed envelope; the default format and the one scripts consume.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("{}: failed to serialize result: {}", "error".red().bold(), e),
    }
}

/// Row-shaped sections, in the order they are preferred for CSV export.
const ROW_SECTIONS: [&str; 5] = [
    "annual_cash_flows",
    "cash_flows",
    "annual_summary",
    "debt_schedule",
    "cases",
];

/// The `result` field of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Pick the rows that best represent a result as a flat table.
///
/// Arrays are used as-is. Objects yield their first row-shaped section.
/// A map of sensitivity tables is flattened to one row per case with the
/// lever name prepended.
pub fn primary_rows(result: &Value) -> Option<Vec<Map<String, Value>>> {
    match result {
        Value::Array(items) => Some(objects(items)),
        Value::Object(map) => {
            for key in ROW_SECTIONS {
                if let Some(Value::Array(items)) = map.get(key) {
                    return Some(objects(items));
                }
            }
            sensitivity_rows(map)
        }
        _ => None,
    }
}

fn objects(items: &[Value]) -> Vec<Map<String, Value>> {
    items
        .iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

fn sensitivity_rows(map: &Map<String, Value>) -> Option<Vec<Map<String, Value>>> {
    let mut rows = Vec::new();
    for (lever, table) in map {
        let cases = table.get("cases")?.as_array()?;
        for case in cases {
            let mut row = Map::new();
            row.insert("parameter".to_string(), Value::String(lever.clone()));
            if let Value::Object(fields) = case {
                row.extend(fields.clone());
            }
            rows.push(row);
        }
    }
    (!rows.is_empty()).then_some(rows)
}

/// Render a scalar for a table cell or CSV field.
pub fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_of_unwraps_envelope() {
        let v = json!({"result": {"overall_score": "89.2"}, "warnings": []});
        assert_eq!(result_of(&v), &json!({"overall_score": "89.2"}));
        assert_eq!(result_of(&json!([1, 2])), &json!([1, 2]));
    }

    #[test]
    fn test_primary_rows_prefers_cash_flows() {
        let v = json!({
            "npv_project": "100",
            "annual_cash_flows": [{"year": 1}, {"year": 2}],
        });
        let rows = primary_rows(&v).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["year"], json!(2));
    }

    #[test]
    fn test_sensitivity_tables_flatten_with_lever() {
        let v = json!({
            "capex": {"cases": [{"label": "-10%"}, {"label": "+10%"}]},
            "opex": {"cases": [{"label": "-10%"}]},
        });
        let rows = primary_rows(&v).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["parameter"], json!("capex"));
        assert_eq!(rows[2]["parameter"], json!("opex"));
        assert_eq!(rows[2]["label"], json!("-10%"));
    }

    #[test]
    fn test_plain_object_has_no_rows() {
        assert!(primary_rows(&json!({"grade": "investment_grade"})).is_none());
    }
}
