//! One-call bankability assessment over an untyped parameter document.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::display::title_case;
use crate::error::BankabilityError;
use crate::params::{EntityType, ProjectParameters, ProjectStage};
use crate::scoring::{score_with_config, BankabilityReport};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::CoreResult;

#[cfg(feature = "sensitivity")]
use crate::sensitivity::{run_standard_cases_with, SensitivityTable};
#[cfg(feature = "sensitivity")]
use std::collections::BTreeMap;

#[cfg(feature = "techno_economic")]
use crate::techno_economic::{self, TechnoEconomicAnalysis};

/// Debt and equity shares may miss 100% by up to one point.
const SPLIT_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub id: String,
    pub stage: ProjectStage,
    pub entity_type: EntityType,
    pub location: String,
    /// Display name, e.g. "Solar Pv"
    pub technology: String,
    pub capacity_mw: Decimal,
    pub total_cost: Money,
    pub description: String,
}

impl ProjectInfo {
    pub fn from_params(params: &ProjectParameters) -> Self {
        Self {
            name: params.project_name.clone(),
            id: params.project_id.clone(),
            stage: params.project_stage,
            entity_type: params.entity_type,
            location: params.location(),
            technology: title_case(params.technical.technology_type.as_str()),
            capacity_mw: params.technical.nameplate_capacity_mw,
            total_cost: params.financial.total_project_cost,
            description: params.description.clone(),
        }
    }
}

/// The scoring report with the optional analyses and project metadata
/// alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    #[serde(flatten)]
    pub report: BankabilityReport,
    #[cfg(feature = "techno_economic")]
    pub techno_economic: TechnoEconomicAnalysis,
    #[cfg(feature = "sensitivity")]
    pub sensitivity: BTreeMap<String, SensitivityTable>,
    pub project_info: ProjectInfo,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Parse `input` and run every engine over it.
pub fn run_bankability_assessment(
    input: &Value,
    config: &EngineConfig,
) -> CoreResult<ComputationOutput<AssessmentReport>> {
    let start = Instant::now();

    if !input.is_object() {
        return Err(BankabilityError::invalid(
            "input",
            "expected a JSON object of project parameters",
        ));
    }
    let params = ProjectParameters::from_value(input)?;
    let warnings = input_warnings(&params);
    for w in &warnings {
        warn!(project = %params.project_name, "{w}");
    }

    let result = score_with_config(&params, config);

    let output = AssessmentReport {
        report: result.to_report(),
        #[cfg(feature = "techno_economic")]
        techno_economic: techno_economic::analyze(&params),
        #[cfg(feature = "sensitivity")]
        sensitivity: run_standard_cases_with(&params, &config.sensitivity),
        project_info: ProjectInfo::from_params(&params),
    };

    debug!(
        project = %params.project_name,
        overall = %result.overall_score.round_dp(1),
        grade = result.grade.as_str(),
        "assessment complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted five-factor bankability scoring with PD/LGD credit model",
        &assumptions(&params),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assumptions(params: &ProjectParameters) -> Value {
    let fp = &params.financial;
    json!({
        "technology_type": params.technical.technology_type.as_str(),
        "useful_life_years": params.technical.expected_useful_life_years,
        "total_project_cost": fp.total_project_cost,
        "debt_percent": fp.debt_percent,
        "interest_rate": fp.interest_rate,
        "debt_tenor_years": fp.debt_tenor_years,
        "discount_rate": fp.discount_rate,
        "tax_rate": fp.tax_rate,
    })
}

/// Inputs that compute but are unlikely to be what the caller meant.
fn input_warnings(params: &ProjectParameters) -> Vec<String> {
    let fp = &params.financial;
    let mut warnings = Vec::new();

    let split = fp.debt_percent + fp.equity_percent;
    if (split - Decimal::ONE).abs() > SPLIT_TOLERANCE {
        warnings.push(format!(
            "Debt and equity shares sum to {}, not 1; amounts use each share as given",
            split.normalize()
        ));
    }
    if fp.total_project_cost <= Decimal::ZERO {
        warnings.push("Total project cost is zero; cost ratios report zero".into());
    }
    if fp.annual_revenue <= Decimal::ZERO {
        warnings.push("Annual revenue is zero; coverage and returns will be weak".into());
    }
    if params.technical.expected_useful_life_years == 0 {
        warnings.push("Useful life is zero; the pro forma has no operating years".into());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Grade;
    use pretty_assertions::assert_eq;

    fn solar_document() -> Value {
        json!({
            "project_name": "Prairie Solar",
            "project_id": "PS-001",
            "entity_type": "cooperative",
            "location_state": "Kansas",
            "location_county": "Finney",
            "is_rural": true,
            "technical": {
                "technology_type": "solar_pv",
                "nameplate_capacity_mw": 100,
                "annual_generation_mwh": 236_520,
                "capacity_factor": 0.27
            },
            "financial": {
                "total_project_cost": 105_000_000,
                "total_hard_costs": 84_000_000,
                "annual_revenue": 13_000_000,
                "annual_opex": 2_100_000,
                "itc_percent": 0.30
            }
        })
    }

    #[test]
    fn test_rejects_non_object() {
        let config = EngineConfig::default();
        for input in [json!(null), json!("solar"), json!([1, 2])] {
            let err = run_bankability_assessment(&input, &config).unwrap_err();
            assert!(matches!(err, BankabilityError::InvalidInput { .. }));
        }
    }

    #[test]
    fn test_project_info() {
        let out = run_bankability_assessment(&solar_document(), &EngineConfig::default()).unwrap();
        let info = &out.result.project_info;
        assert_eq!(info.name, "Prairie Solar");
        assert_eq!(info.location, "Finney, Kansas");
        assert_eq!(info.technology, "Solar Pv");
        assert_eq!(info.capacity_mw, dec!(100));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_report_flattens_scoring_keys() {
        let out = run_bankability_assessment(&solar_document(), &EngineConfig::default()).unwrap();
        let report = &out.result.report;
        assert_eq!(report.grade, Grade::from_score(report.overall_score));

        let json = serde_json::to_value(&out.result).unwrap();
        assert!(json.get("overall_score").is_some());
        assert!(json.get("project_info").is_some());
        #[cfg(feature = "sensitivity")]
        assert_eq!(json["sensitivity"].as_object().map(|m| m.len()), Some(5));
        #[cfg(feature = "techno_economic")]
        assert!(json.get("techno_economic").is_some());
    }

    #[test]
    fn test_empty_document_warns() {
        let out = run_bankability_assessment(&json!({}), &EngineConfig::default()).unwrap();
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Total project cost is zero")));
        assert!(out.result.report.overall_score >= Decimal::ZERO);
    }

    #[test]
    fn test_split_within_one_point_is_accepted() {
        let mut p = ProjectParameters::default();
        p.financial.total_project_cost = dec!(105_000_000);
        p.financial.annual_revenue = dec!(13_000_000);
        p.financial.debt_percent = dec!(0.70);
        p.financial.equity_percent = dec!(0.295);
        assert!(input_warnings(&p).is_empty());

        p.financial.equity_percent = dec!(0.28);
        let warnings = input_warnings(&p);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Debt and equity shares sum to 0.98"));
    }
}
