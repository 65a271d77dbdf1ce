//! Presentation shapes over a built pro forma: the per-year cash-flow
//! waterfall, the amortization schedule and the annual summary table.

use serde::{Deserialize, Serialize};

use crate::financial::{AnnualCashFlow, FinancialSummary};
use crate::types::{Money, Multiple};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Positive,
    Negative,
    Subtotal,
    Total,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    /// Signed; outflows are negative
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: StepKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallYear {
    pub year: u32,
    pub steps: Vec<WaterfallStep>,
}

/// Lifetime totals. IRR is in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallSummary {
    pub total_revenue: Money,
    pub total_opex: Money,
    pub total_debt_service: Money,
    pub total_net_income: Money,
    pub npv_project: Money,
    pub irr_project: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waterfall {
    pub waterfall: Vec<WaterfallYear>,
    pub summary: WaterfallSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtScheduleRow {
    pub year: u32,
    pub beginning_balance: Money,
    pub interest: Money,
    pub principal: Money,
    pub total_payment: Money,
    pub ending_balance: Money,
    pub dscr: Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummaryRow {
    pub year: u32,
    pub revenue: Money,
    pub opex: Money,
    pub noi: Money,
    pub debt_service: Money,
    pub dscr: Multiple,
    pub depreciation: Money,
    pub tax_credit: Money,
    pub tax_expense: Money,
    pub net_income: Money,
    pub fcfe: Money,
    pub cumulative_cf: Money,
}

fn step(label: &str, amount: Money, kind: StepKind) -> WaterfallStep {
    WaterfallStep {
        label: label.into(),
        amount: amount.round_dp(0),
        kind,
    }
}

/// Outflow as a negative amount; zero stays unsigned.
fn outflow(label: &str, amount: Money) -> WaterfallStep {
    let amount = amount.round_dp(0);
    step(
        label,
        if amount.is_zero() { Decimal::ZERO } else { -amount },
        StepKind::Negative,
    )
}

fn year_steps(cf: &AnnualCashFlow) -> Vec<WaterfallStep> {
    vec![
        step("Revenue", cf.revenue, StepKind::Positive),
        outflow("Operating Expenses", cf.opex),
        step("Net Operating Income", cf.net_operating_income, StepKind::Subtotal),
        outflow("Interest", cf.interest_payment),
        outflow("Principal", cf.principal_payment),
        step("Cash After Debt Service", cf.cash_flow_after_debt, StepKind::Subtotal),
        step("Tax Credit", cf.tax_credit, StepKind::Positive),
        outflow("Taxes", cf.tax_expense.max(Decimal::ZERO)),
        step("Free Cash Flow to Equity", cf.free_cash_flow_equity, StepKind::Total),
    ]
}

/// Revenue-to-FCFE steps for every operating year.
pub fn generate_waterfall(summary: &FinancialSummary) -> Waterfall {
    Waterfall {
        waterfall: summary
            .annual_cash_flows
            .iter()
            .map(|cf| WaterfallYear {
                year: cf.year,
                steps: year_steps(cf),
            })
            .collect(),
        summary: WaterfallSummary {
            total_revenue: summary.total_revenue.round_dp(0),
            total_opex: summary.total_opex.round_dp(0),
            total_debt_service: summary.total_debt_service.round_dp(0),
            total_net_income: summary.total_net_income.round_dp(0),
            npv_project: summary.npv_project.round_dp(0),
            irr_project: (summary.irr_project * Decimal::ONE_HUNDRED).round_dp(2),
        },
    }
}

/// Amortization rows for years within the debt tenor.
pub fn debt_schedule(summary: &FinancialSummary, debt_tenor_years: u32) -> Vec<DebtScheduleRow> {
    summary
        .annual_cash_flows
        .iter()
        .take_while(|cf| cf.year <= debt_tenor_years)
        .map(|cf| DebtScheduleRow {
            year: cf.year,
            beginning_balance: (cf.outstanding_debt + cf.principal_payment).round_dp(0),
            interest: cf.interest_payment.round_dp(0),
            principal: cf.principal_payment.round_dp(0),
            total_payment: cf.debt_service.round_dp(0),
            ending_balance: cf.outstanding_debt.round_dp(0),
            dscr: cf.dscr.report_value(2),
        })
        .collect()
}

pub fn annual_summary_table(summary: &FinancialSummary) -> Vec<AnnualSummaryRow> {
    summary
        .annual_cash_flows
        .iter()
        .map(|cf| AnnualSummaryRow {
            year: cf.year,
            revenue: cf.revenue.round_dp(0),
            opex: cf.opex.round_dp(0),
            noi: cf.net_operating_income.round_dp(0),
            debt_service: cf.debt_service.round_dp(0),
            dscr: cf.dscr.report_value(2),
            depreciation: cf.depreciation.round_dp(0),
            tax_credit: cf.tax_credit.round_dp(0),
            tax_expense: cf.tax_expense.round_dp(0),
            net_income: cf.net_income.round_dp(0),
            fcfe: cf.free_cash_flow_equity.round_dp(0),
            cumulative_cf: cf.cumulative_cash_flow.round_dp(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::financial::build_pro_forma;
    use crate::params::ProjectParameters;
    use rust_decimal_macros::dec;

    fn summary() -> FinancialSummary {
        let mut p = ProjectParameters::default();
        p.financial.total_project_cost = dec!(105_000_000);
        p.financial.total_hard_costs = dec!(84_000_000);
        p.financial.annual_revenue = dec!(13_000_000);
        p.financial.annual_opex = dec!(2_100_000);
        p.financial.itc_percent = dec!(0.30);
        build_pro_forma(&p)
    }

    #[test]
    fn test_waterfall_steps_per_year() {
        let w = generate_waterfall(&summary());
        assert_eq!(w.waterfall.len(), 30);
        let first = &w.waterfall[0].steps;
        assert_eq!(first.len(), 9);
        assert_eq!(first[0].amount, dec!(13_000_000));
        assert_eq!(first[1].amount, dec!(-2_100_000));
        assert_eq!(first[2].amount, dec!(10_900_000));
        // year-one ITC of 30% on $105M
        assert_eq!(first[6].amount, dec!(31_500_000));
        assert_eq!(first[8].kind, StepKind::Total);
    }

    #[test]
    fn test_debt_schedule_stops_at_tenor_and_retires_debt() {
        let s = summary();
        let schedule = debt_schedule(&s, 20);
        assert_eq!(schedule.len(), 20);
        assert_eq!(schedule[0].beginning_balance, dec!(73_500_000));
        assert_eq!(schedule[19].ending_balance, Decimal::ZERO);
        for pair in schedule.windows(2) {
            assert_eq!(pair[0].ending_balance, pair[1].beginning_balance);
        }
    }

    #[test]
    fn test_annual_summary_covers_life() {
        let rows = annual_summary_table(&summary());
        assert_eq!(rows.len(), 30);
        // after tenor there is no debt service to cover
        assert_eq!(rows[25].debt_service, Decimal::ZERO);
        assert_eq!(rows[25].dscr, dec!(999.99));
    }
}
