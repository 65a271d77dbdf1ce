pub mod assess;
pub mod financial;
pub mod financing;
pub mod scenario;

use bankability_core::{with_metadata, ProjectParameters};
use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use crate::input;

/// Arguments shared by every command that reads a project snapshot
#[derive(Args)]
pub struct InputArgs {
    /// Path to a JSON or YAML parameter snapshot (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

/// Read and parse the project parameters named by `--input` or piped on stdin.
pub fn load_params(input_path: Option<&str>) -> Result<ProjectParameters, Box<dyn std::error::Error>> {
    let document = input::read_document(input_path)?;
    Ok(ProjectParameters::from_value(&document)?)
}

/// Wrap an engine result in the standard output envelope.
pub fn envelope<T: Serialize>(
    methodology: &str,
    params: &ProjectParameters,
    start: Instant,
    result: T,
) -> Result<Value, Box<dyn std::error::Error>> {
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(methodology, &assumptions(params), Vec::new(), elapsed, result);
    Ok(serde_json::to_value(output)?)
}

fn assumptions(params: &ProjectParameters) -> Value {
    let fp = &params.financial;
    json!({
        "project_name": params.project_name,
        "technology": params.technical.technology_type.as_str(),
        "total_project_cost": fp.total_project_cost,
        "debt_percent": fp.debt_percent,
        "interest_rate": fp.interest_rate,
        "debt_tenor_years": fp.debt_tenor_years,
        "discount_rate": fp.discount_rate,
    })
}
