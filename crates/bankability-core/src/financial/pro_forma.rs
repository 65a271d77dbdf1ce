use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::ProjectParameters;
use crate::time_value::{irr, npv};
use crate::types::{Coverage, Money, Multiple, Rate, Years};

/// Years of production tax credit eligibility.
const PTC_YEARS: u32 = 10;

/// Ceiling on escalated annual amounts, so lifetime totals and tax lines
/// stay representable however long the escalation compounds.
const ANNUAL_AMOUNT_CEILING: Money = dec!(100_000_000_000_000_000_000);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One year of the operating pro forma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualCashFlow {
    /// Operating year, 1-based
    pub year: u32,
    /// Escalated and degraded revenue
    pub revenue: Money,
    /// Escalated operating cost
    pub opex: Money,
    pub net_operating_income: Money,
    pub interest_payment: Money,
    pub principal_payment: Money,
    /// Interest plus principal
    pub debt_service: Money,
    /// Senior debt balance at year end
    pub outstanding_debt: Money,
    /// NOI less debt service
    pub cash_flow_after_debt: Money,
    pub depreciation: Money,
    /// NOI less interest and depreciation
    pub taxable_income: Money,
    /// ITC (year 1) plus PTC (years 1-10)
    pub tax_credit: Money,
    /// Tax on positive taxable income less credits; negative when credits
    /// exceed the liability
    pub tax_expense: Money,
    pub net_income: Money,
    /// Free cash flow to equity
    pub free_cash_flow_equity: Money,
    /// NOI over debt service
    pub dscr: Coverage,
    /// Running equity position, starting from the negative equity investment
    pub cumulative_cash_flow: Money,
}

/// Aggregate metrics over the full pro forma.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub npv_project: Money,
    pub npv_equity: Money,
    pub irr_project: Rate,
    pub irr_equity: Rate,
    /// Levelized cost of energy, $/MWh
    pub lcoe: Money,
    pub payback_years: Years,
    /// Mean of finite, positive yearly DSCRs
    pub average_dscr: Multiple,
    /// Minimum of finite, positive yearly DSCRs
    pub minimum_dscr: Multiple,
    pub total_revenue: Money,
    pub total_opex: Money,
    pub total_debt_service: Money,
    pub total_net_income: Money,
    /// Year-1 NOI over initial debt
    pub debt_yield: Rate,
    /// Total FCFE over equity invested
    pub equity_multiple: Multiple,
    pub annual_cash_flows: Vec<AnnualCashFlow>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Build the annual pro forma over the asset's useful life and summarize it.
///
/// Revenue escalates and degrades, operating cost escalates, senior debt
/// amortizes as a level annuity over the tenor, and tax reflects MACRS or
/// straight-line depreciation, the ITC and the PTC.
pub fn build_pro_forma(params: &ProjectParameters) -> FinancialSummary {
    let tp = &params.technical;
    let fp = &params.financial;
    let life = tp.expected_useful_life_years;

    let annual_debt_service = fp.annual_debt_service();
    let depreciation_fractions = fp.depreciation_schedule.fractions(life);
    let itc_value = if fp.itc_percent > Decimal::ZERO {
        fp.total_project_cost * fp.itc_percent
    } else {
        Decimal::ZERO
    };

    let mut debt_balance = fp.debt_amount();
    let mut cumulative = -fp.equity_amount();

    let retention = Decimal::ONE - tp.degradation_rate_annual;
    let revenue_growth = Decimal::ONE + fp.revenue_escalation;
    let opex_growth = Decimal::ONE + fp.annual_opex_escalation;
    let mut degradation = Decimal::ONE;
    let mut revenue_factor = Decimal::ONE;
    let mut opex_factor = Decimal::ONE;

    let mut flows = Vec::with_capacity(life as usize);

    for year in 1..=life {
        if year > 1 {
            degradation *= retention;
            revenue_factor = saturating_mul(revenue_factor, revenue_growth);
            opex_factor = saturating_mul(opex_factor, opex_growth);
        }

        let revenue = escalated(fp.annual_revenue, revenue_factor, degradation);
        let opex = escalated(fp.annual_opex, opex_factor, Decimal::ONE);
        let noi = revenue - opex;

        // ── Debt service ─────────────────────────────────────────────
        let (interest, principal, outstanding) =
            if year <= fp.debt_tenor_years && debt_balance > Decimal::ZERO {
                let interest = debt_balance * fp.interest_rate;
                let principal = (annual_debt_service - interest).min(debt_balance);
                debt_balance -= principal;
                (interest, principal, debt_balance.max(Decimal::ZERO))
            } else {
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            };
        let debt_service = interest + principal;
        let cash_flow_after_debt = noi - debt_service;

        // ── Tax ──────────────────────────────────────────────────────
        let depreciation = depreciation_fractions
            .get((year - 1) as usize)
            .map(|fraction| fp.total_hard_costs * fraction)
            .unwrap_or(Decimal::ZERO);
        let taxable_income = noi - interest - depreciation;

        let mut tax_credit = if year == 1 { itc_value } else { Decimal::ZERO };
        if fp.ptc_per_mwh > Decimal::ZERO && year <= PTC_YEARS {
            tax_credit += tp.annual_generation_mwh * degradation * fp.ptc_per_mwh;
        }

        let tax_expense = (taxable_income * fp.tax_rate).max(Decimal::ZERO) - tax_credit;
        let net_income = taxable_income - tax_expense;
        let fcfe = cash_flow_after_debt - tax_expense.max(Decimal::ZERO) + tax_credit;
        cumulative += fcfe;

        flows.push(AnnualCashFlow {
            year,
            revenue,
            opex,
            net_operating_income: noi,
            interest_payment: interest,
            principal_payment: principal,
            debt_service,
            outstanding_debt: outstanding,
            cash_flow_after_debt,
            depreciation,
            taxable_income,
            tax_credit,
            tax_expense,
            net_income,
            free_cash_flow_equity: fcfe,
            dscr: Coverage::ratio(noi, debt_service),
            cumulative_cash_flow: cumulative,
        });
    }

    let summary = summarize(params, flows);
    debug!(
        project = %params.project_name,
        years = life,
        npv_project = %summary.npv_project.round_dp(0),
        irr_project = %summary.irr_project.round_dp(4),
        minimum_dscr = %summary.minimum_dscr.round_dp(3),
        "pro forma built"
    );
    summary
}

fn summarize(params: &ProjectParameters, flows: Vec<AnnualCashFlow>) -> FinancialSummary {
    let fp = &params.financial;
    let life = params.technical.expected_useful_life_years;
    let cost = fp.total_project_cost;
    let debt = fp.debt_amount();
    let equity = fp.equity_amount();

    let mut project_cfs = Vec::with_capacity(flows.len() + 1);
    let mut equity_cfs = Vec::with_capacity(flows.len() + 1);
    project_cfs.push(-cost);
    equity_cfs.push(-equity);

    let mut total_revenue = Decimal::ZERO;
    let mut total_opex = Decimal::ZERO;
    let mut total_debt_service = Decimal::ZERO;
    let mut total_net_income = Decimal::ZERO;
    let mut total_fcfe = Decimal::ZERO;
    let mut coverage = Vec::with_capacity(flows.len());
    let mut cumulative_noi = Decimal::ZERO;
    let mut payback: Option<Years> = None;

    for cf in &flows {
        project_cfs.push(cf.net_operating_income);
        equity_cfs.push(cf.free_cash_flow_equity);

        total_revenue += cf.revenue;
        total_opex += cf.opex;
        total_debt_service += cf.debt_service;
        total_net_income += cf.net_income;
        total_fcfe += cf.free_cash_flow_equity;

        if let Some(ratio) = cf.dscr.finite().filter(|r| *r > Decimal::ZERO) {
            coverage.push(ratio);
        }

        cumulative_noi += cf.net_operating_income;
        if payback.is_none() && cumulative_noi >= cost {
            let fraction = if cf.net_operating_income > Decimal::ZERO {
                Decimal::ONE - (cumulative_noi - cost) / cf.net_operating_income
            } else {
                Decimal::ONE
            };
            payback = Some(Decimal::from(cf.year - 1) + fraction);
        }
    }

    let (average_dscr, minimum_dscr) = if coverage.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let sum: Decimal = coverage.iter().copied().sum();
        let min = coverage.iter().copied().fold(Decimal::MAX, Decimal::min);
        (sum / Decimal::from(coverage.len() as u64), min)
    };

    let debt_yield = match flows.first() {
        Some(first) if debt > Decimal::ZERO => first.net_operating_income / debt,
        _ => Decimal::ZERO,
    };
    let equity_multiple = if equity > Decimal::ZERO {
        total_fcfe / equity
    } else {
        Decimal::ZERO
    };

    FinancialSummary {
        npv_project: npv(fp.discount_rate, &project_cfs),
        npv_equity: npv(fp.discount_rate, &equity_cfs),
        irr_project: irr(&project_cfs),
        irr_equity: irr(&equity_cfs),
        lcoe: levelized_cost(params, &flows),
        payback_years: payback.unwrap_or_else(|| Decimal::from(life)),
        average_dscr,
        minimum_dscr,
        total_revenue,
        total_opex,
        total_debt_service,
        total_net_income,
        debt_yield,
        equity_multiple,
        annual_cash_flows: flows,
    }
}

/// (cost + discounted opex) / discounted degraded generation, discounting
/// year y by (1 + r)^y. Zero without generation.
fn levelized_cost(params: &ProjectParameters, flows: &[AnnualCashFlow]) -> Money {
    let tp = &params.technical;
    let fp = &params.financial;
    if tp.annual_generation_mwh <= Decimal::ZERO || flows.is_empty() {
        return Decimal::ZERO;
    }

    let one_plus_r = Decimal::ONE + fp.discount_rate;
    let retention = Decimal::ONE - tp.degradation_rate_annual;
    let mut discount = Decimal::ONE;
    let mut degradation = Decimal::ONE;
    let mut discounted_costs = fp.total_project_cost;
    let mut discounted_generation = Decimal::ZERO;

    for cf in flows {
        discount = saturating_mul(discount, one_plus_r);
        if cf.year > 1 {
            degradation *= retention;
        }
        if discount.is_zero() {
            continue;
        }
        discounted_costs += cf.opex / discount;
        discounted_generation += tp.annual_generation_mwh * degradation / discount;
    }

    if discounted_generation > Decimal::ZERO {
        discounted_costs / discounted_generation
    } else {
        Decimal::ZERO
    }
}

fn saturating_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::MAX)
}

/// `base * factor * degradation`, held under [`ANNUAL_AMOUNT_CEILING`].
fn escalated(base: Money, factor: Decimal, degradation: Decimal) -> Money {
    saturating_mul(saturating_mul(base, factor), degradation).min(ANNUAL_AMOUNT_CEILING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{DepreciationSchedule, TechnologyType};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn solar_100mw() -> ProjectParameters {
        let mut p = ProjectParameters {
            project_name: "Butler County Solar".into(),
            ..Default::default()
        };
        p.technical.technology_type = TechnologyType::SolarPv;
        p.technical.nameplate_capacity_mw = dec!(100);
        p.technical.annual_generation_mwh = dec!(236_520);
        p.technical.capacity_factor = dec!(0.27);
        p.financial.total_project_cost = dec!(105_000_000);
        p.financial.total_hard_costs = dec!(84_000_000);
        p.financial.total_soft_costs = dec!(10_500_000);
        p.financial.target_dscr = dec!(1.35);
        p.financial.annual_revenue = dec!(13_000_000);
        p.financial.annual_opex = dec!(2_100_000);
        p.financial.itc_percent = dec!(0.30);
        p.financial.depreciation_schedule = DepreciationSchedule::Macrs5;
        p
    }

    fn close(a: Decimal, b: Decimal, tol: Decimal) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_year_one_line_items() {
        let summary = build_pro_forma(&solar_100mw());
        let y1 = &summary.annual_cash_flows[0];

        assert_eq!(y1.revenue, dec!(13_000_000));
        assert_eq!(y1.net_operating_income, dec!(10_900_000));
        assert_eq!(y1.interest_payment, dec!(4_042_500));
        assert!(close(y1.principal_payment, dec!(2_107_930.76), dec!(0.01)));
        assert!(close(y1.outstanding_debt, dec!(71_392_069.24), dec!(0.01)));
        assert_eq!(y1.depreciation, dec!(16_800_000));
        assert_eq!(y1.taxable_income, dec!(-9_942_500));
        assert_eq!(y1.tax_credit, dec!(31_500_000));
        assert_eq!(y1.tax_expense, dec!(-31_500_000));
        assert_eq!(y1.net_income, dec!(21_557_500));
        assert!(close(y1.free_cash_flow_equity, dec!(36_249_569.24), dec!(0.01)));
        assert!(close(y1.cumulative_cash_flow, dec!(4_749_569.24), dec!(0.01)));
    }

    #[test]
    fn test_debt_retires_at_tenor() {
        let summary = build_pro_forma(&solar_100mw());
        assert_eq!(summary.annual_cash_flows.len(), 30);

        let y20 = &summary.annual_cash_flows[19];
        assert!(y20.outstanding_debt.abs() < dec!(0.01));

        let y21 = &summary.annual_cash_flows[20];
        assert_eq!(y21.debt_service, Decimal::ZERO);
        assert!(y21.dscr.is_unbounded());
    }

    #[test]
    fn test_summary_metrics() {
        let s = build_pro_forma(&solar_100mw());
        assert!(close(s.npv_project, dec!(33_542_312.67), dec!(1)));
        assert!(close(s.npv_equity, dec!(59_588_286.03), dec!(1)));
        assert!(close(s.irr_project, dec!(0.1099434), dec!(0.00001)));
        assert!(close(s.irr_equity, dec!(0.476004), dec!(0.0001)));
        assert!(close(s.lcoe, dec!(53.13963), dec!(0.001)));
        assert!(close(s.payback_years, dec!(9.13766), dec!(0.0001)));
        assert!(close(s.average_dscr, dec!(2.00529), dec!(0.0001)));
        assert!(close(s.minimum_dscr, dec!(1.772234), dec!(0.00001)));
        assert!(close(s.debt_yield, dec!(0.148299), dec!(0.00001)));
        assert!(close(s.equity_multiple, dec!(7.61133), dec!(0.0001)));
    }

    #[test]
    fn test_zero_debt_has_no_debt_service() {
        let mut p = solar_100mw();
        p.financial.debt_percent = Decimal::ZERO;
        p.financial.equity_percent = Decimal::ONE;

        let s = build_pro_forma(&p);
        for cf in &s.annual_cash_flows {
            assert_eq!(cf.debt_service, Decimal::ZERO);
            assert_eq!(cf.interest_payment, Decimal::ZERO);
            assert_eq!(cf.principal_payment, Decimal::ZERO);
            assert!(cf.dscr.is_unbounded());
        }
        assert_eq!(s.minimum_dscr, Decimal::ZERO);
        assert_eq!(s.debt_yield, Decimal::ZERO);
    }

    #[test]
    fn test_ptc_runs_ten_years() {
        let mut p = solar_100mw();
        p.financial.itc_percent = Decimal::ZERO;
        p.financial.ptc_per_mwh = dec!(27.5);

        let s = build_pro_forma(&p);
        assert_eq!(s.annual_cash_flows[0].tax_credit, dec!(236_520) * dec!(27.5));
        assert!(s.annual_cash_flows[9].tax_credit > Decimal::ZERO);
        assert_eq!(s.annual_cash_flows[10].tax_credit, Decimal::ZERO);
    }

    #[test]
    fn test_no_generation_means_no_lcoe() {
        let mut p = solar_100mw();
        p.technical.annual_generation_mwh = Decimal::ZERO;
        assert_eq!(build_pro_forma(&p).lcoe, Decimal::ZERO);
    }

    #[test]
    fn test_payback_defaults_to_life_when_never_reached() {
        let mut p = solar_100mw();
        p.financial.annual_revenue = dec!(2_000_000);
        let s = build_pro_forma(&p);
        assert_eq!(s.payback_years, dec!(30));
    }

    #[test]
    fn test_runaway_escalation_saturates_instead_of_overflowing() {
        let mut p = solar_100mw();
        p.technical.expected_useful_life_years = 100;
        p.financial.annual_revenue = dec!(10_000_000);
        p.financial.revenue_escalation = Decimal::ONE;
        p.financial.annual_opex_escalation = Decimal::ONE;
        p.financial.discount_rate = Decimal::ONE;

        let s = build_pro_forma(&p);
        assert_eq!(s.annual_cash_flows.len(), 100);
        assert!(s
            .annual_cash_flows
            .windows(2)
            .all(|w| w[1].revenue >= w[0].revenue));
        assert_eq!(s.annual_cash_flows[99].revenue, ANNUAL_AMOUNT_CEILING);
        assert_eq!(s.annual_cash_flows[99].opex, ANNUAL_AMOUNT_CEILING);
        assert!(s.lcoe >= Decimal::ZERO);
    }
}
