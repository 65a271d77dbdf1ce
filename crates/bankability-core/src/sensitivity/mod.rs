//! One-factor-at-a-time sensitivity and custom what-if scenarios.
//!
//! Each case clones the snapshot, changes exactly one input and rebuilds the
//! pro forma. With the `parallel` feature the cases of a table run on the
//! rayon pool; collection keeps the declared variation order either way.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::SensitivityConfig;
use crate::display::{signed_percent, signed_points};
use crate::financial::{build_pro_forma, FinancialSummary};
use crate::params::ProjectParameters;
use crate::types::{Money, Multiple, Rate};
use crate::CoreResult;

// ---------------------------------------------------------------------------
// Levers
// ---------------------------------------------------------------------------

/// How a variation is applied to the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationUnit {
    /// `base * (1 + v)`
    PercentChange,
    /// `base + v`
    AbsoluteChange,
}

/// An input the standard run perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lever {
    Revenue,
    Opex,
    Capex,
    InterestRate,
    CapacityFactor,
}

impl Lever {
    pub const STANDARD: [Lever; 5] = [
        Lever::Revenue,
        Lever::Opex,
        Lever::Capex,
        Lever::InterestRate,
        Lever::CapacityFactor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Lever::Revenue => "revenue",
            Lever::Opex => "opex",
            Lever::Capex => "capex",
            Lever::InterestRate => "interest_rate",
            Lever::CapacityFactor => "capacity_factor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lever::Revenue => "Annual Revenue",
            Lever::Opex => "Operating Costs",
            Lever::Capex => "Total Project Cost",
            Lever::InterestRate => "Interest Rate",
            Lever::CapacityFactor => "Capacity Factor / Generation",
        }
    }

    pub fn unit(&self) -> VariationUnit {
        match self {
            Lever::InterestRate => VariationUnit::AbsoluteChange,
            _ => VariationUnit::PercentChange,
        }
    }

    /// Current value of the field this lever moves.
    pub fn base_value(&self, params: &ProjectParameters) -> Decimal {
        let fp = &params.financial;
        match self {
            Lever::Revenue => fp.annual_revenue,
            Lever::Opex => fp.annual_opex,
            Lever::Capex => fp.total_project_cost,
            Lever::InterestRate => fp.interest_rate,
            Lever::CapacityFactor => params.technical.annual_generation_mwh,
        }
    }

    /// Apply `variation` in place and return the adjusted value. Capex also
    /// scales hard costs so depreciation follows the cost change.
    pub fn apply(&self, params: &mut ProjectParameters, variation: Rate) -> Decimal {
        let adjusted = match self.unit() {
            VariationUnit::PercentChange => self.base_value(params) * (Decimal::ONE + variation),
            VariationUnit::AbsoluteChange => self.base_value(params) + variation,
        };

        let fp = &mut params.financial;
        match self {
            Lever::Revenue => fp.annual_revenue = adjusted,
            Lever::Opex => fp.annual_opex = adjusted,
            Lever::Capex => {
                fp.total_project_cost = adjusted;
                fp.total_hard_costs *= Decimal::ONE + variation;
            }
            Lever::InterestRate => fp.interest_rate = adjusted,
            Lever::CapacityFactor => params.technical.annual_generation_mwh = adjusted,
        }
        adjusted
    }

    fn variation_label(&self, variation: Rate) -> String {
        match self.unit() {
            VariationUnit::PercentChange => signed_percent(variation),
            VariationUnit::AbsoluteChange => signed_points(variation),
        }
    }

    fn variations<'a>(&self, config: &'a SensitivityConfig) -> &'a [Rate] {
        match self.unit() {
            VariationUnit::PercentChange => &config.relative_variations,
            VariationUnit::AbsoluteChange => &config.rate_variations,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Pro forma outcome of one variation. IRR is in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCase {
    pub variation: Rate,
    /// "+10%" for relative changes, "+0.5%" for rate changes
    pub label: String,
    pub base_value: Decimal,
    pub adjusted_value: Decimal,
    pub min_dscr: Multiple,
    pub avg_dscr: Multiple,
    pub irr_project: Decimal,
    pub npv_project: Money,
    pub lcoe: Money,
    pub payback_years: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityTable {
    pub parameter: String,
    pub label: String,
    pub base_value: Decimal,
    /// In declared variation order
    pub cases: Vec<SensitivityCase>,
}

/// Outcome of a multi-field what-if. IRRs are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub overrides: BTreeMap<String, Value>,
    pub min_dscr: Multiple,
    pub avg_dscr: Multiple,
    pub irr_project: Decimal,
    pub irr_equity: Decimal,
    pub npv_project: Money,
    pub npv_equity: Money,
    pub lcoe: Money,
    pub payback_years: Decimal,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Standard tables over the default variation grids, keyed by lever name.
pub fn run_standard_cases(params: &ProjectParameters) -> BTreeMap<String, SensitivityTable> {
    run_standard_cases_with(params, &SensitivityConfig::default())
}

pub fn run_standard_cases_with(
    params: &ProjectParameters,
    config: &SensitivityConfig,
) -> BTreeMap<String, SensitivityTable> {
    let tables: BTreeMap<String, SensitivityTable> = Lever::STANDARD
        .iter()
        .map(|lever| (lever.name().to_string(), run_lever(params, *lever, config)))
        .collect();

    debug!(
        project = %params.project_name,
        tables = tables.len(),
        cases = tables.values().map(|t| t.cases.len()).sum::<usize>(),
        "sensitivity run complete"
    );
    tables
}

/// Vary one lever across its grid.
pub fn run_lever(
    params: &ProjectParameters,
    lever: Lever,
    config: &SensitivityConfig,
) -> SensitivityTable {
    let base_value = lever.base_value(params);
    let variations = lever.variations(config);

    #[cfg(feature = "parallel")]
    let cases: Vec<SensitivityCase> = variations
        .par_iter()
        .map(|v| run_case(params, lever, *v))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let cases: Vec<SensitivityCase> = variations
        .iter()
        .map(|v| run_case(params, lever, *v))
        .collect();

    SensitivityTable {
        parameter: lever.name().to_string(),
        label: lever.label().to_string(),
        base_value,
        cases,
    }
}

fn run_case(params: &ProjectParameters, lever: Lever, variation: Rate) -> SensitivityCase {
    let base_value = lever.base_value(params);
    let mut adjusted = params.clone();
    let adjusted_value = lever.apply(&mut adjusted, variation);
    let summary = build_pro_forma(&adjusted);

    SensitivityCase {
        variation,
        label: lever.variation_label(variation),
        base_value: base_value.round_dp(2),
        adjusted_value: adjusted_value.round_dp(2),
        min_dscr: summary.minimum_dscr.round_dp(3),
        avg_dscr: summary.average_dscr.round_dp(3),
        irr_project: as_percent(summary.irr_project),
        npv_project: summary.npv_project.round_dp(0),
        lcoe: summary.lcoe.round_dp(2),
        payback_years: summary.payback_years.round_dp(1),
    }
}

/// Apply every `"section.field"` override to one clone and rebuild.
pub fn run_custom_scenario(
    params: &ProjectParameters,
    overrides: &BTreeMap<String, Value>,
) -> CoreResult<ScenarioResult> {
    let adjusted = params.with_overrides(overrides)?;
    let summary = build_pro_forma(&adjusted);
    debug!(overrides = overrides.len(), "custom scenario complete");
    Ok(scenario_result(overrides.clone(), &summary))
}

fn scenario_result(overrides: BTreeMap<String, Value>, summary: &FinancialSummary) -> ScenarioResult {
    ScenarioResult {
        overrides,
        min_dscr: summary.minimum_dscr.round_dp(3),
        avg_dscr: summary.average_dscr.round_dp(3),
        irr_project: as_percent(summary.irr_project),
        irr_equity: as_percent(summary.irr_equity),
        npv_project: summary.npv_project.round_dp(0),
        npv_equity: summary.npv_equity.round_dp(0),
        lcoe: summary.lcoe.round_dp(2),
        payback_years: summary.payback_years.round_dp(1),
    }
}

fn as_percent(rate: Rate) -> Decimal {
    (rate * dec!(100)).round_dp(2)
}
