use bankability_core::credit;
use bankability_core::financial::build_pro_forma;
use bankability_core::techno_economic;
use serde_json::Value;
use std::time::Instant;

use super::{envelope, load_params, InputArgs};

pub fn run_pro_forma(args: InputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let summary = build_pro_forma(&params);
    envelope(
        "Annual pro forma with mortgage-style amortisation, MACRS depreciation and ITC/PTC",
        &params,
        start,
        summary,
    )
}

pub fn run_credit(args: InputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let assessment = credit::assess(&params);
    envelope(
        "Expected loss = PD x LGD x EAD with rating-adjusted PD",
        &params,
        start,
        assessment,
    )
}

pub fn run_benchmark(args: InputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.input.as_deref())?;
    let start = Instant::now();
    let analysis = techno_economic::analyze(&params);
    envelope(
        "Capital, O&M, capacity factor and LCOE benchmarking against technology ranges",
        &params,
        start,
        analysis,
    )
}
