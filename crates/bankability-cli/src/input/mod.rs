pub mod file;
pub mod stdin;

use serde_json::Value;

/// Resolve the parameter snapshot from `--input`, falling back to piped stdin.
pub fn read_document(path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_document(path);
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(value),
        None => Err("no project parameters: pass --input <file> or pipe JSON or YAML on stdin".into()),
    }
}
