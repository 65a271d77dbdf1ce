use bankability_core::assessment::run_bankability_assessment;
use bankability_core::config::EngineConfig;
use bankability_core::scoring::score_with_config;
use serde_json::Value;
use std::time::Instant;

use super::{envelope, load_params, InputArgs};
use crate::input;

pub fn run_assess(args: InputArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::read_document(args.input.as_deref())?;
    let output = run_bankability_assessment(&document, config)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_score(args: InputArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let report = score_with_config(&params, config).to_report();
    envelope(
        "Weighted five-factor bankability scoring",
        &params,
        start,
        report,
    )
}
