use serde_json::Value;
use std::io::{self, Read};

/// Read a piped parameter snapshot.
///
/// Returns None when stdin is a terminal or the pipe is empty. JSON is
/// tried first and anything else is read as YAML, matching what `--input`
/// accepts by extension.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().lock().read_to_string(&mut buffer)?;
    parse_snapshot(&buffer)
}

fn parse_snapshot(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str::<Value>(trimmed)
            .map(Some)
            .map_err(|_| format!("stdin is neither JSON nor YAML: {}", json_err).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_snapshot() {
        let v = parse_snapshot(r#"{"project_name": "Butler County Solar"}"#).unwrap();
        assert_eq!(v, Some(json!({"project_name": "Butler County Solar"})));
    }

    #[test]
    fn test_yaml_snapshot() {
        let text = "project_name: Garfield Wind\nfinancial:\n  interest_rate: 0.05\n";
        let v = parse_snapshot(text).unwrap().unwrap();
        assert_eq!(v["project_name"], json!("Garfield Wind"));
        assert_eq!(v["financial"]["interest_rate"], json!(0.05));
    }

    #[test]
    fn test_blank_pipe_is_no_input() {
        assert!(parse_snapshot("  \n").unwrap().is_none());
    }

    #[test]
    fn test_unparseable_pipe_is_an_error() {
        assert!(parse_snapshot("{\"project_name\": [").is_err());
    }
}
