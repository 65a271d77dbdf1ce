use bankability_core::config::EngineConfig;
use bankability_core::financial::build_pro_forma;
use bankability_core::financing::{
    annual_summary_table, debt_schedule, generate_waterfall, recommend_structures,
};
use clap::Args;
use serde_json::{json, Value};
use std::time::Instant;

use super::{envelope, load_params};

/// Arguments for the cash-flow waterfall
#[derive(Args)]
pub struct WaterfallArgs {
    /// Path to a JSON or YAML parameter snapshot (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Debt schedule horizon in years (defaults to the loan tenor)
    #[arg(long)]
    pub tenor: Option<u32>,
}

/// Arguments for financing structure recommendations
#[derive(Args)]
pub struct StructuresArgs {
    /// Path to a JSON or YAML parameter snapshot (reads stdin when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Only return the top N structures
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run_waterfall(args: WaterfallArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let summary = build_pro_forma(&params);
    let tenor = args.tenor.unwrap_or(params.financial.debt_tenor_years);

    let waterfall = generate_waterfall(&summary);
    let result = json!({
        "waterfall": waterfall.waterfall,
        "summary": waterfall.summary,
        "debt_schedule": debt_schedule(&summary, tenor),
        "annual_summary": annual_summary_table(&summary),
    });
    envelope(
        "Revenue to equity cash-flow waterfall with debt amortisation schedule",
        &params,
        start,
        result,
    )
}

pub fn run_structures(args: StructuresArgs, config: &EngineConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let mut recommendations = recommend_structures(&params, &config.programs);
    if let Some(top) = args.top {
        recommendations.truncate(top);
    }
    envelope(
        "Template fit scoring across RUS, DOE LPO, tax equity, project, municipal and corporate debt",
        &params,
        start,
        recommendations,
    )
}
