//! Component lists, commentary, strengths, weaknesses and recommendations.
//!
//! Commentary is tiered on the raw sub-score. Recommendations are an
//! ordered, non-exclusive rule list: every rule that fires appends its
//! sentence, and evaluation order is presentation order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::composite::{ScoreComponent, SubScore};
use super::eligibility::ProgramEligibility;
use crate::credit::{CreditAssessment, MitigantStrength, Severity};
use crate::display::{fixed, money, multiple, percent, title_case, yes_no};
use crate::financial::FinancialSummary;
use crate::params::{
    EpcContractType, MarketParameters, OfftakeType, ProjectParameters, StructureParameters,
    TechnicalParameters,
};
use crate::types::{Rate, Score};

const STRENGTH_SCORE: Score = dec!(75);
const WEAKNESS_SCORE: Score = dec!(50);
const STRONG_DSCR: Decimal = dec!(1.40);
const MIN_DSCR: Decimal = dec!(1.20);
const STRONG_IRR: Rate = dec!(0.10);
const WEAK_IRR: Rate = dec!(0.06);
/// PD above which credit enhancement is recommended.
const ENHANCEMENT_PD: Rate = dec!(0.01);
/// Factors or mitigants named in the credit commentary.
const COMMENTARY_LIMIT: usize = 3;

/// Text for the first `(threshold, text)` row the score reaches.
fn tier(score: Score, table: &[(Score, &'static str)], otherwise: &'static str) -> &'static str {
    table
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, text)| *text)
        .unwrap_or(otherwise)
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

pub fn technology_components(tp: &TechnicalParameters) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent::new("Technology Type", title_case(tp.technology_type.as_str())),
        ScoreComponent::new("Capacity", format!("{} MW", fixed(tp.nameplate_capacity_mw, 1))),
        ScoreComponent::new("Capacity Factor", percent(tp.capacity_factor, 1)),
        ScoreComponent::new("TRL", format!("{}/9", tp.technology_readiness_level)),
        ScoreComponent::new("Availability", percent(tp.availability_factor, 1)),
        ScoreComponent::new("Permits Secured", yes_no(tp.environmental_permits_secured)),
        ScoreComponent::new("Site Control", yes_no(tp.site_control_secured)),
    ]
}

pub fn financial_components(fs: &FinancialSummary) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent::new("Project IRR", percent(fs.irr_project, 1)),
        ScoreComponent::new("Equity IRR", percent(fs.irr_equity, 1)),
        ScoreComponent::new("NPV (Project)", money(fs.npv_project)),
        ScoreComponent::new("Min DSCR", multiple(fs.minimum_dscr)),
        ScoreComponent::new("Avg DSCR", multiple(fs.average_dscr)),
        ScoreComponent::new("LCOE", format!("${}/MWh", fixed(fs.lcoe, 2))),
        ScoreComponent::new("Payback", format!("{} years", fixed(fs.payback_years, 1))),
        ScoreComponent::new("Debt Yield", percent(fs.debt_yield, 1)),
        ScoreComponent::new("Equity Multiple", multiple(fs.equity_multiple)),
    ]
}

pub fn credit_components(ca: &CreditAssessment) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent::new("Equivalent Rating", ca.credit_rating_equivalent.to_string()),
        ScoreComponent::new("Risk Category", ca.risk_category.as_str()),
        ScoreComponent::new("PD", percent(ca.probability_of_default, 2)),
        ScoreComponent::new("LGD", percent(ca.loss_given_default, 0)),
        ScoreComponent::new("Expected Loss", money(ca.expected_loss)),
        ScoreComponent::new("Credit Spread", format!("{} bps", ca.credit_spread_bps)),
    ]
}

pub fn structure_components(sp: &StructureParameters) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent::new("EPC Type", title_case(sp.epc_contract_type.as_str())),
        ScoreComponent::new("Contractor", title_case(sp.epc_contractor_experience.as_str())),
        ScoreComponent::new("Performance Guarantee", yes_no(sp.performance_guarantee)),
        ScoreComponent::new("Completion Guarantee", yes_no(sp.completion_guarantee)),
        ScoreComponent::new("Insurance", title_case(sp.insurance_coverage.as_str())),
        ScoreComponent::new("DSRA Funded", yes_no(sp.reserve_accounts_funded)),
        ScoreComponent::new("DSRA Months", sp.debt_service_reserve_months.to_string()),
    ]
}

pub fn market_components(mp: &MarketParameters) -> Vec<ScoreComponent> {
    vec![
        ScoreComponent::new("Resource Quality", title_case(mp.resource_quality.as_str())),
        ScoreComponent::new(
            "Assessment Basis",
            mp.resource_assessment_confidence.as_str().to_uppercase(),
        ),
        ScoreComponent::new(
            "Independent Assessment",
            yes_no(mp.independent_resource_assessment),
        ),
        ScoreComponent::new(
            "Interconnection",
            title_case(mp.interconnection_certainty.as_str()),
        ),
        ScoreComponent::new("Grid Congestion", title_case(mp.grid_congestion_risk.as_str())),
        ScoreComponent::new(
            "Curtailment History",
            percent(mp.curtailment_history_percent, 1),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Commentary
// ---------------------------------------------------------------------------

pub fn technology_commentary(score: Score) -> &'static str {
    tier(
        score,
        &[
            (
                dec!(80),
                "Technology profile is well-suited for project finance. Mature technology with \
                 strong performance track record reduces execution risk.",
            ),
            (
                dec!(60),
                "Technology assessment is adequate for financing consideration. Some areas \
                 could be strengthened to improve lender confidence.",
            ),
            (
                dec!(40),
                "Technology profile presents moderate risk. Additional performance data, \
                 permitting progress, or site control would improve the assessment.",
            ),
        ],
        "Technology readiness is below the threshold for conventional project finance. \
         Significant development milestones remain before bankability is achievable.",
    )
}

/// One sentence on minimum coverage and one on project returns.
pub fn financial_commentary(fs: &FinancialSummary) -> String {
    let dscr = fixed(fs.minimum_dscr, 2);
    let coverage = if fs.minimum_dscr >= STRONG_DSCR {
        format!("Debt service coverage of {dscr}x meets or exceeds typical lender requirements.")
    } else if fs.minimum_dscr >= MIN_DSCR {
        format!(
            "Minimum DSCR of {dscr}x is within an acceptable range but leaves limited cushion \
             for downside scenarios."
        )
    } else {
        format!(
            "Minimum DSCR of {dscr}x is below the 1.20x floor typically required for \
             infrastructure debt."
        )
    };

    let irr = percent(fs.irr_project, 1);
    let returns = if fs.irr_project >= STRONG_IRR {
        format!("Project IRR of {irr} supports equity investment at current return expectations.")
    } else if fs.irr_project >= WEAK_IRR {
        format!(
            "Project IRR of {irr} may be tight depending on equity investor return thresholds."
        )
    } else {
        format!("Project IRR of {irr} is below typical minimum equity return requirements.")
    };

    format!("{coverage} {returns}")
}

pub fn credit_commentary(ca: &CreditAssessment) -> String {
    let mut parts = vec![format!(
        "Overall credit profile maps to an equivalent {} rating with a {} risk classification.",
        ca.credit_rating_equivalent,
        ca.risk_category.as_str().to_lowercase()
    )];

    let high: Vec<String> = ca
        .risk_factors
        .iter()
        .filter(|f| f.severity == Severity::High)
        .take(COMMENTARY_LIMIT)
        .map(|f| f.factor.to_lowercase())
        .collect();
    if !high.is_empty() {
        parts.push(format!("Key risk factors include {}.", high.join(", ")));
    }

    let strong: Vec<String> = ca
        .mitigants
        .iter()
        .filter(|m| m.strength == MitigantStrength::Strong)
        .take(COMMENTARY_LIMIT)
        .map(|m| m.mitigant.to_lowercase())
        .collect();
    if !strong.is_empty() {
        parts.push(format!("These are partially offset by {}.", strong.join(", ")));
    }

    parts.join(" ")
}

pub fn structure_commentary(score: Score) -> &'static str {
    tier(
        score,
        &[
            (
                dec!(75),
                "Project structure includes strong contractual protections and risk allocation \
                 appropriate for project finance.",
            ),
            (
                dec!(55),
                "Structural elements are broadly adequate but would benefit from additional \
                 protections such as funded reserves or enhanced guarantees.",
            ),
            (
                dec!(35),
                "Project structure has notable gaps that would need to be addressed during \
                 financing negotiations.",
            ),
        ],
        "Structural framework requires substantial development before the project is ready \
         for lender due diligence.",
    )
}

pub fn market_commentary(score: Score) -> &'static str {
    tier(
        score,
        &[
            (
                dec!(75),
                "Market and resource conditions are favorable, with strong resource assessment, \
                 clear interconnection path, and manageable congestion risk.",
            ),
            (
                dec!(55),
                "Market environment is adequate for project viability. An independent resource \
                 assessment and interconnection progress would strengthen the profile.",
            ),
            (
                dec!(35),
                "Market conditions present material risk. Resource quality, interconnection \
                 certainty, or curtailment exposure may limit financing options.",
            ),
        ],
        "Market and resource fundamentals are weak. Substantial de-risking is needed before \
         lenders will consider the project bankable.",
    )
}

// ---------------------------------------------------------------------------
// Strengths, weaknesses, recommendations
// ---------------------------------------------------------------------------

pub fn strengths(
    params: &ProjectParameters,
    sub_scores: &[SubScore],
    fs: &FinancialSummary,
) -> Vec<String> {
    let mut out: Vec<String> = sub_scores
        .iter()
        .filter(|s| s.score >= STRENGTH_SCORE)
        .map(|s| {
            format!(
                "Strong {} profile (score: {}/100).",
                s.category.label().to_lowercase(),
                fixed(s.score, 0)
            )
        })
        .collect();

    if fs.minimum_dscr >= STRONG_DSCR {
        out.push(format!(
            "Debt coverage of {} exceeds typical lender minimums.",
            multiple(fs.minimum_dscr)
        ));
    }
    if fs.irr_project >= STRONG_IRR {
        out.push(format!(
            "Project returns ({} IRR) support equity investment.",
            percent(fs.irr_project, 1)
        ));
    }
    let tp = &params.technical;
    if tp.environmental_permits_secured && tp.site_control_secured {
        out.push("Key development milestones (permits, site control) have been achieved.".into());
    }
    if matches!(
        params.credit.offtake_type,
        OfftakeType::PpaFixed | OfftakeType::RegulatedRate
    ) {
        out.push("Contracted revenue provides cash flow predictability.".into());
    }
    out
}

pub fn weaknesses(
    sub_scores: &[SubScore],
    fs: &FinancialSummary,
    ca: &CreditAssessment,
) -> Vec<String> {
    let mut out: Vec<String> = sub_scores
        .iter()
        .filter(|s| s.score < WEAKNESS_SCORE)
        .map(|s| {
            format!(
                "Weak {} profile (score: {}/100) requires attention.",
                s.category.label().to_lowercase(),
                fixed(s.score, 0)
            )
        })
        .collect();

    if fs.minimum_dscr < MIN_DSCR {
        out.push(format!(
            "DSCR of {} is below the 1.20x minimum for most lenders.",
            multiple(fs.minimum_dscr)
        ));
    }
    if fs.irr_project < WEAK_IRR {
        out.push(format!(
            "Project IRR of {} may not attract equity capital.",
            percent(fs.irr_project, 1)
        ));
    }
    if ca.risk_category.is_high() {
        out.push(format!(
            "Credit risk category of '{}' limits access to low-cost financing.",
            ca.risk_category
        ));
    }
    out
}

pub fn recommendations(
    params: &ProjectParameters,
    fs: &FinancialSummary,
    ca: &CreditAssessment,
    rus: &ProgramEligibility,
    lpo: &ProgramEligibility,
) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    if fs.minimum_dscr < STRONG_DSCR {
        recs.push(
            "Consider restructuring the capital stack to improve DSCR -- options include \
             increasing equity contribution, extending debt tenor, or reducing operating costs.",
        );
    }
    if !params.structure.reserve_accounts_funded {
        recs.push(
            "Fund a debt service reserve account (minimum 6 months of debt service) to provide \
             liquidity cushion and satisfy standard lender requirements.",
        );
    }
    if !params.technical.environmental_permits_secured {
        recs.push(
            "Secure all required environmental permits before approaching lenders to eliminate \
             permitting risk from the financing discussion.",
        );
    }
    if params.market.interconnection_certainty.is_at_risk() {
        recs.push(
            "Advance interconnection studies and secure an interconnection agreement to de-risk \
             the grid connection timeline.",
        );
    }
    if !params.market.independent_resource_assessment {
        recs.push(
            "Commission an independent resource assessment to provide lenders with third-party \
             validation of expected energy production.",
        );
    }
    if params.credit.offtake_type == OfftakeType::Merchant {
        recs.push(
            "Secure a long-term offtake agreement (PPA or tolling) to provide contracted revenue \
             certainty required for project finance.",
        );
    }
    if ca.probability_of_default > ENHANCEMENT_PD {
        recs.push(
            "Explore credit enhancement mechanisms such as letters of credit, guarantees, or \
             credit wraps to improve the credit profile.",
        );
    }
    if params.structure.epc_contract_type != EpcContractType::FixedPriceTurnkey {
        recs.push(
            "Negotiate a fixed-price turnkey EPC contract to transfer construction cost and \
             schedule risk to an experienced contractor.",
        );
    }
    if params.is_rural && rus.eligible {
        recs.push(
            "Project appears eligible for USDA RUS financing. Consider preparing a Form 201 \
             application to access below-market interest rates.",
        );
    }
    if lpo.eligible {
        recs.push(
            "Project may qualify for DOE LPO Title XVII loan guarantee. Evaluate whether the \
             technology meets the innovation threshold.",
        );
    }

    recs.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commentary_tiers() {
        assert!(technology_commentary(dec!(80)).starts_with("Technology profile is well-suited"));
        assert!(technology_commentary(dec!(59.9)).starts_with("Technology profile presents"));
        assert!(structure_commentary(dec!(10)).starts_with("Structural framework"));
        assert!(market_commentary(dec!(74)).starts_with("Market environment is adequate"));
    }

    #[test]
    fn test_components_render_display_values() {
        let mut tp = TechnicalParameters::default();
        tp.nameplate_capacity_mw = dec!(100);
        tp.capacity_factor = dec!(0.27);
        let components = technology_components(&tp);
        assert_eq!(components[0].value, "Solar Pv");
        assert_eq!(components[1].value, "100.0 MW");
        assert_eq!(components[2].value, "27.0%");
        assert_eq!(components[3].value, "9/9");
        assert_eq!(components[5].value, "No");

        let mp = MarketParameters::default();
        let components = market_components(&mp);
        assert_eq!(components[1].value, "P50");
        assert_eq!(components[4].value, "Low");
    }
}
