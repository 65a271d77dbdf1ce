use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::FinancialSummary;
use crate::params::ProjectParameters;
use crate::rubrics::{cap, step_at_least, step_at_most};
use crate::types::{Rate, Score};

const MIN_DSCR_POINTS: [(Decimal, Decimal); 5] = [
    (dec!(1.60), dec!(30)),
    (dec!(1.40), dec!(25)),
    (dec!(1.25), dec!(18)),
    (dec!(1.10), dec!(10)),
    (dec!(1.00), dec!(5)),
];

const IRR_POINTS: [(Decimal, Decimal); 4] = [
    (dec!(0.15), dec!(20)),
    (dec!(0.10), dec!(15)),
    (dec!(0.08), dec!(10)),
    (dec!(0.05), dec!(5)),
];

const DEBT_YIELD_POINTS: [(Decimal, Decimal); 4] = [
    (dec!(0.12), dec!(10)),
    (dec!(0.10), dec!(8)),
    (dec!(0.08), dec!(5)),
    (dec!(0.06), dec!(3)),
];

/// Share of NPV shortfall, relative to cost, that still earns partial credit.
const NPV_TOLERANCE: Rate = dec!(0.05);

/// Financial strength, 0-100, from coverage (30), project IRR (20), NPV
/// (15), payback relative to life (15), leverage (10) and debt yield (10).
pub fn financial_strength_score(summary: &FinancialSummary, params: &ProjectParameters) -> Score {
    let fp = &params.financial;
    let life = Decimal::from(params.technical.expected_useful_life_years);

    let npv_points = if summary.npv_project > Decimal::ZERO {
        dec!(15)
    } else if summary.npv_project > -fp.total_project_cost * NPV_TOLERANCE {
        dec!(5)
    } else {
        Decimal::ZERO
    };

    let payback_points = step_at_most(
        summary.payback_years,
        &[
            (life * dec!(0.3), dec!(15)),
            (life * dec!(0.5), dec!(10)),
            (life * dec!(0.7), dec!(5)),
        ],
        Decimal::ZERO,
    );

    cap(step_at_least(summary.minimum_dscr, &MIN_DSCR_POINTS, Decimal::ZERO)
        + step_at_least(summary.irr_project, &IRR_POINTS, Decimal::ZERO)
        + npv_points
        + payback_points
        + leverage_points(fp.leverage_ratio())
        + step_at_least(summary.debt_yield, &DEBT_YIELD_POINTS, Decimal::ZERO))
}

/// Lenders favour 50-75% leverage; light leverage still scores well and
/// anything above 90% scores nothing.
pub fn leverage_points(leverage: Rate) -> Score {
    if leverage >= dec!(0.50) && leverage <= dec!(0.75) {
        dec!(10)
    } else if leverage >= dec!(0.40) && leverage <= dec!(0.80) {
        dec!(7)
    } else if leverage < dec!(0.40) {
        dec!(8)
    } else if leverage <= dec!(0.90) {
        dec!(3)
    } else {
        Decimal::ZERO
    }
}
