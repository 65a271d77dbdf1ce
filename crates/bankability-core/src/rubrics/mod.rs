//! Point rubrics for the non-financial sub-scores.
//!
//! Every rubric is a set of lookup tables folded through [`weighted_sum`]
//! and capped to the 0-100 scale. The same fold blends the credit
//! sub-scores and the composite.

pub mod counterparty;
pub mod market;
pub mod structure;
pub mod technology;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Score;

pub use counterparty::counterparty_score;
pub use market::market_score;
pub use structure::structure_score;
pub use technology::technology_score;

pub const MAX_SCORE: Score = dec!(100);

/// Points for the first `(threshold, points)` row with `value >= threshold`.
/// Rows are ordered from the highest threshold down.
pub fn step_at_least(value: Decimal, table: &[(Decimal, Decimal)], otherwise: Decimal) -> Decimal {
    table
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(otherwise)
}

/// Points for the first `(threshold, points)` row with `value <= threshold`.
/// Rows are ordered from the lowest threshold up.
pub fn step_at_most(value: Decimal, table: &[(Decimal, Decimal)], otherwise: Decimal) -> Decimal {
    table
        .iter()
        .find(|(threshold, _)| value <= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(otherwise)
}

/// Sum of `value * weight` over all components.
pub fn weighted_sum<I>(components: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, Decimal)>,
{
    components
        .into_iter()
        .map(|(value, weight)| value * weight)
        .sum()
}

/// Clamp to the 0-100 score scale.
pub fn cap(score: Decimal) -> Score {
    score.max(Decimal::ZERO).min(MAX_SCORE)
}

/// 1 for a present feature, 0 otherwise.
pub(crate) fn flag(present: bool) -> Decimal {
    if present {
        Decimal::ONE
    } else {
        Decimal::ZERO
    }
}
