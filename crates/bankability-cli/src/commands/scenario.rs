use bankability_core::config::EngineConfig;
use bankability_core::sensitivity::{run_custom_scenario, run_standard_cases_with};
use clap::Args;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

use super::{envelope, load_params, InputArgs};

/// Arguments for a custom what-if scenario
#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to a JSON or YAML parameter snapshot (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Override in the form section.field=value (repeatable,
    /// e.g. "financial.interest_rate=0.07")
    #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
    pub overrides: Vec<String>,
}

pub fn run_sensitivity(args: InputArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let tables = run_standard_cases_with(&params, &config.sensitivity);
    envelope(
        "One-factor-at-a-time sensitivity on revenue, opex, capex, generation and interest rate",
        &params,
        start,
        tables,
    )
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let overrides = parse_overrides(&args.overrides)?;
    let start = Instant::now();
    let scenario = run_custom_scenario(&params, &overrides)?;
    envelope(
        "Pro forma rebuilt with all overrides applied together",
        &params,
        start,
        scenario,
    )
}

/// Parse `key=value` pairs. Values are read as JSON where they parse
/// (numbers, booleans), otherwise kept as plain strings.
fn parse_overrides(pairs: &[String]) -> Result<BTreeMap<String, Value>, Box<dyn std::error::Error>> {
    let mut overrides = BTreeMap::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Override must be section.field=value, got '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("Override has an empty key: '{}'", pair).into());
        }
        let raw = raw.trim();
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        overrides.insert(key.to_string(), value);
    }
    Ok(overrides)
}
