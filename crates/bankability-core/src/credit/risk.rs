use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tables::{
    base_lgd, base_pd, concentration_multiplier, contract_multiplier, credit_spread_bps,
    dscr_multiplier, entity_multiplier, equivalent_rating, tenor_multiplier, RiskCategory,
    LGD_CEILING, LGD_FLOOR, PD_CEILING, PD_FLOOR,
};
use crate::display::percent;
use crate::params::{
    CreditRating, EpcContractType, InsuranceCoverage, OfftakeType, ProjectParameters,
};
use crate::rubrics::{counterparty_score, market_score, structure_score, weighted_sum};
use crate::types::{Money, Rate, Score};

/// DSCR below which lenders flag coverage.
const DSCR_FLOOR: Decimal = dec!(1.20);
/// DSCR that counts as a mitigant.
const DSCR_STRONG: Decimal = dec!(1.40);
const LEVERAGE_FLAG: Rate = dec!(0.80);
/// Base PD at or above which the offtaker is sub-investment-grade.
const SUB_INVESTMENT_GRADE_PD: Rate = dec!(0.02);
const CONCENTRATION_FLAG: Rate = dec!(0.80);
const CURTAILMENT_FLAG: Rate = dec!(0.05);
/// LGD relief per month of funded debt service reserve.
const RESERVE_RELIEF_PER_MONTH: Decimal = dec!(0.02);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MitigantStrength {
    Strong,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: String,
    pub factor: String,
    pub severity: Severity,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigant {
    pub category: String,
    pub mitigant: String,
    pub strength: MitigantStrength,
    pub detail: String,
}

/// Lender's view of the senior debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditAssessment {
    /// Adjusted one-year PD, clamped to [0.0001, 1]
    pub probability_of_default: Rate,
    /// Loss severity after protections, clamped to [0.05, 0.95]
    pub loss_given_default: Rate,
    /// Senior debt amount
    pub exposure_at_default: Money,
    pub expected_loss: Money,
    /// Expected loss over exposure
    pub expected_loss_rate: Rate,
    pub credit_rating_equivalent: CreditRating,
    pub risk_category: RiskCategory,
    pub credit_spread_bps: u32,
    pub counterparty_risk_score: Score,
    pub structural_risk_score: Score,
    pub market_risk_score: Score,
    /// 40/30/30 blend of the three sub-scores
    pub overall_credit_score: Score,
    pub risk_factors: Vec<RiskFactor>,
    pub mitigants: Vec<Mitigant>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Run the full credit assessment for the project's senior debt.
pub fn assess(params: &ProjectParameters) -> CreditAssessment {
    let probability_of_default = adjusted_pd(params);
    let loss_given_default = loss_given_default(params);
    let exposure_at_default = params.financial.debt_amount();
    let expected_loss = probability_of_default * loss_given_default * exposure_at_default;
    let expected_loss_rate = if exposure_at_default > Decimal::ZERO {
        expected_loss / exposure_at_default
    } else {
        Decimal::ZERO
    };

    let credit_rating_equivalent = equivalent_rating(probability_of_default);

    let counterparty_risk_score = counterparty_score(&params.credit);
    let structural_risk_score = structure_score(&params.structure);
    let market_risk_score = market_score(&params.market);
    let overall_credit_score = weighted_sum([
        (counterparty_risk_score, dec!(0.40)),
        (structural_risk_score, dec!(0.30)),
        (market_risk_score, dec!(0.30)),
    ]);

    let assessment = CreditAssessment {
        probability_of_default,
        loss_given_default,
        exposure_at_default,
        expected_loss,
        expected_loss_rate,
        credit_rating_equivalent,
        risk_category: RiskCategory::from_pd(probability_of_default),
        credit_spread_bps: credit_spread_bps(credit_rating_equivalent),
        counterparty_risk_score,
        structural_risk_score,
        market_risk_score,
        overall_credit_score,
        risk_factors: risk_factors(params),
        mitigants: mitigants(params),
    };

    debug!(
        project = %params.project_name,
        pd = %assessment.probability_of_default.round_dp(6),
        lgd = %assessment.loss_given_default.round_dp(4),
        rating = %assessment.credit_rating_equivalent,
        "credit assessment complete"
    );
    assessment
}

/// Base PD for the offtaker's grade scaled by tenor, contract, coverage,
/// entity and concentration multipliers.
pub fn adjusted_pd(params: &ProjectParameters) -> Rate {
    let cp = &params.credit;
    let pd = base_pd(cp.offtaker_credit_rating)
        * tenor_multiplier(cp.offtake_tenor_years)
        * contract_multiplier(cp.offtake_type)
        * dscr_multiplier(params.financial.dscr())
        * entity_multiplier(cp.offtaker_entity_type)
        * concentration_multiplier(cp.revenue_concentration_percent);
    pd.max(PD_FLOOR).min(PD_CEILING)
}

/// Entity base LGD reduced by each structural protection present.
pub fn loss_given_default(params: &ProjectParameters) -> Rate {
    let sp = &params.structure;
    let mut lgd = base_lgd(params.credit.offtaker_entity_type);

    if sp.completion_guarantee {
        lgd *= dec!(0.90);
    }
    if sp.reserve_accounts_funded {
        let relief = Decimal::from(sp.debt_service_reserve_months) * RESERVE_RELIEF_PER_MONTH;
        lgd *= (Decimal::ONE - relief).max(Decimal::ZERO);
    }
    if params.credit.has_credit_support {
        lgd *= dec!(0.85);
    }
    if sp.step_in_rights {
        lgd *= dec!(0.92);
    }
    match sp.insurance_coverage {
        InsuranceCoverage::Comprehensive => lgd *= dec!(0.90),
        InsuranceCoverage::Standard => lgd *= dec!(0.95),
        _ => {}
    }

    lgd.max(LGD_FLOOR).min(LGD_CEILING)
}

// ---------------------------------------------------------------------------
// Checklists
// ---------------------------------------------------------------------------

fn factor(category: &str, name: &str, severity: Severity, detail: String) -> RiskFactor {
    RiskFactor {
        category: category.into(),
        factor: name.into(),
        severity,
        detail,
    }
}

fn mitigant(category: &str, name: &str, strength: MitigantStrength, detail: String) -> Mitigant {
    Mitigant {
        category: category.into(),
        mitigant: name.into(),
        strength,
        detail,
    }
}

pub fn risk_factors(params: &ProjectParameters) -> Vec<RiskFactor> {
    let cp = &params.credit;
    let fp = &params.financial;
    let sp = &params.structure;
    let mp = &params.market;
    let dscr = fp.dscr();
    let mut factors = Vec::new();

    if !dscr.meets(DSCR_FLOOR) {
        factors.push(factor(
            "Financial",
            "Below-target debt service coverage",
            Severity::High,
            format!(
                "DSCR of {dscr} is below the 1.20x minimum threshold typically required by \
                 infrastructure lenders."
            ),
        ));
    }

    let leverage = fp.leverage_ratio();
    if leverage > LEVERAGE_FLAG {
        factors.push(factor(
            "Financial",
            "High leverage ratio",
            Severity::Medium,
            format!(
                "Debt-to-total-capital of {} exceeds the 80% level that triggers additional \
                 lender scrutiny.",
                percent(leverage, 0)
            ),
        ));
    }

    if base_pd(cp.offtaker_credit_rating) >= SUB_INVESTMENT_GRADE_PD {
        factors.push(factor(
            "Credit",
            "Sub-investment-grade offtaker",
            Severity::High,
            format!(
                "Offtaker rated {}, which is below investment grade and may limit financing \
                 options.",
                cp.offtaker_credit_rating
            ),
        ));
    }

    if cp.offtake_type == OfftakeType::Merchant {
        factors.push(factor(
            "Revenue",
            "Merchant exposure",
            Severity::High,
            "Project lacks a long-term contracted revenue stream, exposing cash flows to \
             market price volatility."
                .into(),
        ));
    }

    if cp.offtake_tenor_years < fp.debt_tenor_years {
        factors.push(factor(
            "Revenue",
            "Contract-tenor mismatch",
            Severity::Medium,
            format!(
                "Offtake contract ({} years) expires before debt maturity ({} years), creating \
                 recontracting risk.",
                cp.offtake_tenor_years, fp.debt_tenor_years
            ),
        ));
    }

    if cp.revenue_concentration_percent > CONCENTRATION_FLAG && cp.counterparty_count <= 1 {
        factors.push(factor(
            "Credit",
            "Revenue concentration",
            Severity::Medium,
            "Revenue stream depends on a single counterparty with no diversification.".into(),
        ));
    }

    if mp.curtailment_history_percent > CURTAILMENT_FLAG {
        factors.push(factor(
            "Market",
            "Curtailment risk",
            Severity::Medium,
            format!(
                "Historical curtailment rate of {} could reduce realized generation volumes.",
                percent(mp.curtailment_history_percent, 1)
            ),
        ));
    }

    if mp.interconnection_certainty.is_at_risk() {
        factors.push(factor(
            "Market",
            "Interconnection uncertainty",
            Severity::High,
            "Interconnection status poses execution risk to project timeline and commercial \
             operation."
                .into(),
        ));
    }

    if !sp.reserve_accounts_funded {
        factors.push(factor(
            "Structure",
            "Unfunded reserves",
            Severity::Low,
            "Debt service and maintenance reserve accounts are not yet funded.".into(),
        ));
    }

    if !params.technical.environmental_permits_secured {
        factors.push(factor(
            "Permitting",
            "Outstanding environmental permits",
            Severity::Medium,
            "Environmental permits have not been fully secured, creating regulatory and \
             timeline risk."
                .into(),
        ));
    }

    factors
}

pub fn mitigants(params: &ProjectParameters) -> Vec<Mitigant> {
    let cp = &params.credit;
    let sp = &params.structure;
    let dscr = params.financial.dscr();
    let mut found = Vec::new();

    if cp.offtake_type.is_contracted() {
        found.push(mitigant(
            "Revenue",
            "Contracted revenue stream",
            MitigantStrength::Strong,
            format!(
                "Long-term {} contract provides revenue certainty over {} years.",
                cp.offtake_type.as_str().replace('_', " "),
                cp.offtake_tenor_years
            ),
        ));
    }

    if sp.epc_contract_type == EpcContractType::FixedPriceTurnkey {
        found.push(mitigant(
            "Construction",
            "Fixed-price turnkey EPC",
            MitigantStrength::Strong,
            "Construction cost risk is transferred to the EPC contractor under a lump-sum \
             turnkey arrangement."
                .into(),
        ));
    }

    if sp.performance_guarantee {
        found.push(mitigant(
            "Performance",
            "Performance guarantee",
            MitigantStrength::Moderate,
            format!(
                "Equipment/system performance guaranteed at {} of nameplate capacity.",
                percent(sp.performance_guarantee_level, 0)
            ),
        ));
    }

    if sp.completion_guarantee {
        found.push(mitigant(
            "Construction",
            "Completion guarantee",
            MitigantStrength::Strong,
            "Sponsor or contractor completion guarantee reduces construction completion risk."
                .into(),
        ));
    }

    if sp.reserve_accounts_funded {
        found.push(mitigant(
            "Liquidity",
            "Funded reserve accounts",
            MitigantStrength::Moderate,
            format!(
                "{} months of debt service reserve provides liquidity cushion.",
                sp.debt_service_reserve_months
            ),
        ));
    }

    if sp.insurance_coverage == InsuranceCoverage::Comprehensive {
        found.push(mitigant(
            "Risk Transfer",
            "Comprehensive insurance",
            MitigantStrength::Moderate,
            "Full insurance program covering property, liability, business interruption, and \
             natural catastrophe."
                .into(),
        ));
    }

    if cp.has_credit_support {
        let support = if cp.credit_support_type.is_empty() {
            "letter of credit"
        } else {
            cp.credit_support_type.as_str()
        };
        found.push(mitigant(
            "Credit",
            "Credit support",
            MitigantStrength::Strong,
            format!("Additional credit support ({support}) enhances counterparty credit quality."),
        ));
    }

    if dscr.meets(DSCR_STRONG) {
        found.push(mitigant(
            "Financial",
            "Strong debt service coverage",
            MitigantStrength::Strong,
            format!(
                "DSCR of {dscr}x provides substantial cash flow cushion above debt service \
                 requirements."
            ),
        ));
    }

    found
}
