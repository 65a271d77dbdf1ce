//! Rounded, externally consumed rendering of a [`BankabilityResult`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::composite::{BankabilityResult, Grade, ScoreCategory, ScoreComponent};
use super::eligibility::ProgramEligibility;
use crate::credit::{CreditAssessment, Mitigant, RiskCategory, RiskFactor};
use crate::financial::{AnnualCashFlow, FinancialSummary};
use crate::params::CreditRating;
use crate::types::{Money, Multiple, Rate, Score};

const BPS: Decimal = dec!(10_000);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScoreReport {
    pub category: ScoreCategory,
    pub score: Score,
    pub weight: Rate,
    pub weighted_score: Score,
    pub commentary: String,
    pub components: Vec<ScoreComponent>,
}

/// Headline financial metrics. IRR and debt yield are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    pub npv_project: Money,
    pub npv_equity: Money,
    pub irr_project: Decimal,
    pub irr_equity: Decimal,
    pub lcoe: Money,
    pub payback_years: Decimal,
    pub average_dscr: Multiple,
    pub minimum_dscr: Multiple,
    pub debt_yield: Decimal,
    pub equity_multiple: Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRow {
    pub year: u32,
    pub revenue: Money,
    pub opex: Money,
    pub noi: Money,
    pub debt_service: Money,
    /// 999.99 when there is no debt service
    pub dscr: Multiple,
    pub free_cash_flow: Money,
    pub cumulative_cf: Money,
}

/// Credit metrics with PD and expected-loss rate in basis points and LGD
/// in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditMetrics {
    pub probability_of_default: Decimal,
    pub loss_given_default: Decimal,
    pub expected_loss: Money,
    pub expected_loss_rate_bps: Decimal,
    pub equivalent_rating: CreditRating,
    pub risk_category: RiskCategory,
    pub credit_spread_bps: u32,
    pub overall_credit_score: Score,
    pub risk_factors: Vec<RiskFactor>,
    pub mitigants: Vec<Mitigant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankabilityReport {
    pub overall_score: Score,
    pub grade: Grade,
    pub grade_label: String,
    pub grade_color: String,
    pub sub_scores: Vec<SubScoreReport>,
    pub financial_metrics: FinancialMetrics,
    pub cash_flows: Vec<CashFlowRow>,
    pub credit_metrics: CreditMetrics,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub rus_eligibility: ProgramEligibility,
    pub lpo_eligibility: ProgramEligibility,
}

impl BankabilityResult {
    /// Round every figure to its reporting precision.
    pub fn to_report(&self) -> BankabilityReport {
        BankabilityReport {
            overall_score: self.overall_score.round_dp(1),
            grade: self.grade,
            grade_label: self.grade_label.clone(),
            grade_color: self.grade_color.clone(),
            sub_scores: self
                .sub_scores
                .iter()
                .map(|s| SubScoreReport {
                    category: s.category,
                    score: s.score.round_dp(1),
                    weight: s.weight,
                    weighted_score: s.weighted_score.round_dp(1),
                    commentary: s.commentary.clone(),
                    components: s.components.clone(),
                })
                .collect(),
            financial_metrics: financial_metrics(&self.financial_summary),
            cash_flows: self
                .financial_summary
                .annual_cash_flows
                .iter()
                .map(cash_flow_row)
                .collect(),
            credit_metrics: credit_metrics(&self.credit_assessment),
            strengths: self.strengths.clone(),
            weaknesses: self.weaknesses.clone(),
            recommendations: self.recommendations.clone(),
            rus_eligibility: self.rus_eligibility.clone(),
            lpo_eligibility: self.lpo_eligibility.clone(),
        }
    }
}

pub fn financial_metrics(fs: &FinancialSummary) -> FinancialMetrics {
    FinancialMetrics {
        npv_project: fs.npv_project.round_dp(0),
        npv_equity: fs.npv_equity.round_dp(0),
        irr_project: (fs.irr_project * Decimal::ONE_HUNDRED).round_dp(2),
        irr_equity: (fs.irr_equity * Decimal::ONE_HUNDRED).round_dp(2),
        lcoe: fs.lcoe.round_dp(2),
        payback_years: fs.payback_years.round_dp(1),
        average_dscr: fs.average_dscr.round_dp(2),
        minimum_dscr: fs.minimum_dscr.round_dp(2),
        debt_yield: (fs.debt_yield * Decimal::ONE_HUNDRED).round_dp(2),
        equity_multiple: fs.equity_multiple.round_dp(2),
    }
}

fn cash_flow_row(cf: &AnnualCashFlow) -> CashFlowRow {
    CashFlowRow {
        year: cf.year,
        revenue: cf.revenue.round_dp(0),
        opex: cf.opex.round_dp(0),
        noi: cf.net_operating_income.round_dp(0),
        debt_service: cf.debt_service.round_dp(0),
        dscr: cf.dscr.report_value(2),
        free_cash_flow: cf.free_cash_flow_equity.round_dp(0),
        cumulative_cf: cf.cumulative_cash_flow.round_dp(0),
    }
}

pub fn credit_metrics(ca: &CreditAssessment) -> CreditMetrics {
    CreditMetrics {
        probability_of_default: (ca.probability_of_default * BPS).round_dp(1),
        loss_given_default: (ca.loss_given_default * Decimal::ONE_HUNDRED).round_dp(1),
        expected_loss: ca.expected_loss.round_dp(0),
        expected_loss_rate_bps: (ca.expected_loss_rate * BPS).round_dp(1),
        equivalent_rating: ca.credit_rating_equivalent,
        risk_category: ca.risk_category,
        credit_spread_bps: ca.credit_spread_bps,
        overall_credit_score: ca.overall_credit_score.round_dp(1),
        risk_factors: ca.risk_factors.clone(),
        mitigants: ca.mitigants.clone(),
    }
}
