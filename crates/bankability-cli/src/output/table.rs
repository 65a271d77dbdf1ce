use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, result_of};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table; row-shaped sections
/// (cash flows, schedules, sensitivity cases) get a table of their own.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(map) => print_section(None, map),
        Value::Array(arr) => print_array_table(arr),
        other => println!("{}", cell(other)),
    }

    if let Value::Object(envelope) = value {
        print_warnings(envelope);
        if let Some(Value::String(meth)) = envelope.get("methodology") {
            println!("\nMethodology: {}", meth);
        }
    }
}

fn print_section(title: Option<&str>, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut scalars = 0;
    for (key, val) in map {
        if is_tabular(val) {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
        scalars += 1;
    }
    if scalars > 0 {
        if let Some(title) = title {
            println!("\n{}", title);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map {
        let heading = match title {
            Some(title) => format!("{}.{}", title, key),
            None => key.clone(),
        };
        match val {
            Value::Array(arr) if is_tabular(val) => {
                println!("\n{}", heading);
                print_array_table(arr);
            }
            Value::Object(inner) => print_section(Some(heading.as_str()), inner),
            _ => {}
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first
            .iter()
            .filter(|(_, v)| !v.is_object())
            .map(|(k, _)| k.clone())
            .collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn print_warnings(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

/// Nested objects and arrays of objects are rendered as separate tables.
fn is_tabular(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(arr) => arr.first().is_some_and(Value::is_object),
        _ => false,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        other => cell(other),
    }
}
