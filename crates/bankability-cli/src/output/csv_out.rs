use serde_json::{Map, Value};
use std::io;

use super::{cell, primary_rows, result_of};

/// Write output as CSV to stdout.
///
/// Results with a row-shaped section export those rows; anything else
/// becomes a two-column field/value listing of the result.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    match (primary_rows(result), result) {
        (Some(rows), _) => write_rows(&mut wtr, &rows),
        (None, Value::Object(map)) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &cell(val)]);
            }
        }
        (None, other) => {
            let _ = wtr.write_record([&cell(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Map<String, Value>]) {
    let Some(first) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(cell).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_written_under_first_row_headers() {
        let rows = vec![
            json!({"year": 1, "dscr": "1.77"}).as_object().unwrap().clone(),
            json!({"year": 2, "dscr": "1.81"}).as_object().unwrap().clone(),
        ];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_rows(&mut wtr, &rows);
        let text = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(text, "dscr,year\n1.77,1\n1.81,2\n");
    }
}
