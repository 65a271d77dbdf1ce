use serde_json::Value;

use super::{cell, result_of};

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 8] = [
    "overall_score",
    "probability_of_default",
    "min_dscr",
    "minimum_dscr",
    "npv_project",
    "structure_key",
    "lcoe",
    "base_value",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known headline fields in priority order, then falls
/// back to the first field of the result. For ranked lists the first
/// entry is used.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);
    let target = match result {
        Value::Array(items) => items.first().unwrap_or(result),
        other => other,
    };

    if let Some(line) = headline(target) {
        println!("{}", line);
    } else {
        println!("{}", format_minimal(target));
    }
}

fn headline(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key) {
            if !val.is_null() {
                return Some(format_minimal(val));
            }
        }
    }
    map.iter()
        .next()
        .map(|(key, val)| format!("{}: {}", key, format_minimal(val)))
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => cell(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_outranks_other_headlines() {
        let v = json!({"overall_score": "89.2", "lcoe": "53.14"});
        assert_eq!(headline(&v).unwrap(), "89.2");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({"capital_costs": {"cost_per_kw": "1050"}});
        assert_eq!(
            headline(&v).unwrap(),
            "capital_costs: {\"cost_per_kw\":\"1050\"}"
        );
    }
}
