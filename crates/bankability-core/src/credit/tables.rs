//! Default-probability, loss-severity and pricing tables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::{CreditRating, EntityType, OfftakeType};
use crate::rubrics::step_at_least;
use crate::types::{Coverage, Rate};

pub const PD_FLOOR: Rate = dec!(0.0001);
pub const PD_CEILING: Rate = dec!(1.0);
pub const LGD_FLOOR: Rate = dec!(0.05);
pub const LGD_CEILING: Rate = dec!(0.95);

/// Spread quoted for grades without a table entry.
pub const DEFAULT_SPREAD_BPS: u32 = 300;

/// One-year default probability implied by the offtaker's agency grade.
pub fn base_pd(rating: CreditRating) -> Rate {
    match rating {
        CreditRating::Aaa => dec!(0.0001),
        CreditRating::AaPlus => dec!(0.0002),
        CreditRating::Aa => dec!(0.0003),
        CreditRating::AaMinus => dec!(0.0005),
        CreditRating::APlus => dec!(0.0008),
        CreditRating::A => dec!(0.0010),
        CreditRating::AMinus => dec!(0.0015),
        CreditRating::BbbPlus => dec!(0.0025),
        CreditRating::Bbb => dec!(0.0040),
        CreditRating::BbbMinus => dec!(0.0070),
        CreditRating::BbPlus => dec!(0.0120),
        CreditRating::Bb => dec!(0.0200),
        CreditRating::BbMinus => dec!(0.0350),
        CreditRating::BPlus => dec!(0.0550),
        CreditRating::B => dec!(0.0800),
        CreditRating::BMinus => dec!(0.1200),
        CreditRating::Ccc => dec!(0.2000),
        CreditRating::Cc => dec!(0.3500),
        CreditRating::C => dec!(0.5000),
        CreditRating::D => dec!(1.0000),
        CreditRating::Unrated => dec!(0.0500),
    }
}

const TENOR_MULTIPLIERS: [(Decimal, Decimal); 4] = [
    (dec!(20), dec!(0.85)),
    (dec!(15), dec!(0.90)),
    (dec!(10), dec!(1.00)),
    (dec!(5), dec!(1.15)),
];

/// Longer contracts reduce recontracting risk.
pub fn tenor_multiplier(offtake_tenor_years: u32) -> Decimal {
    step_at_least(
        Decimal::from(offtake_tenor_years),
        &TENOR_MULTIPLIERS,
        dec!(1.40),
    )
}

pub fn contract_multiplier(offtake: OfftakeType) -> Decimal {
    match offtake {
        OfftakeType::PpaFixed => dec!(0.85),
        OfftakeType::PpaIndexed => dec!(0.95),
        OfftakeType::RegulatedRate => dec!(0.80),
        OfftakeType::TollingAgreement => dec!(1.0),
        OfftakeType::CapacityContract => dec!(1.05),
        OfftakeType::BundledRate => dec!(0.90),
        OfftakeType::Merchant => dec!(1.60),
        OfftakeType::Other => dec!(1.0),
    }
}

const DSCR_MULTIPLIERS: [(Decimal, Decimal); 4] = [
    (dec!(1.60), dec!(0.70)),
    (dec!(1.40), dec!(0.80)),
    (dec!(1.25), dec!(0.90)),
    (dec!(1.10), dec!(1.00)),
];

/// Unbounded coverage takes the strongest band.
pub fn dscr_multiplier(dscr: Coverage) -> Decimal {
    step_at_least(dscr.saturating_value(), &DSCR_MULTIPLIERS, dec!(1.30))
}

pub fn entity_multiplier(entity: EntityType) -> Decimal {
    match entity {
        EntityType::InvestorOwnedUtility => dec!(0.90),
        EntityType::MunicipalUtility => dec!(0.85),
        EntityType::Cooperative => dec!(0.95),
        EntityType::IndependentPowerProducer => dec!(1.10),
        EntityType::CommunityChoiceAggregator => dec!(1.15),
        EntityType::TribalUtility => dec!(1.05),
        EntityType::StateAuthority => dec!(0.80),
        EntityType::Other => dec!(1.0),
    }
}

const CONCENTRATION_MULTIPLIERS: [(Decimal, Decimal); 2] =
    [(dec!(0.90), dec!(1.10)), (dec!(0.70), dec!(1.05))];

pub fn concentration_multiplier(revenue_concentration: Rate) -> Decimal {
    step_at_least(
        revenue_concentration,
        &CONCENTRATION_MULTIPLIERS,
        dec!(0.95),
    )
}

/// Loss severity before structural protections.
pub fn base_lgd(entity: EntityType) -> Rate {
    match entity {
        EntityType::InvestorOwnedUtility => dec!(0.35),
        EntityType::MunicipalUtility => dec!(0.30),
        EntityType::Cooperative => dec!(0.35),
        EntityType::IndependentPowerProducer => dec!(0.45),
        EntityType::CommunityChoiceAggregator => dec!(0.50),
        EntityType::TribalUtility => dec!(0.40),
        EntityType::StateAuthority => dec!(0.25),
        EntityType::Other => dec!(0.45),
    }
}

/// Upper PD bound of each equivalent grade, best grade first.
const RATING_THRESHOLDS: [(Rate, CreditRating); 18] = [
    (dec!(0.0002), CreditRating::Aaa),
    (dec!(0.0004), CreditRating::AaPlus),
    (dec!(0.0006), CreditRating::Aa),
    (dec!(0.0010), CreditRating::AaMinus),
    (dec!(0.0015), CreditRating::APlus),
    (dec!(0.0025), CreditRating::A),
    (dec!(0.0040), CreditRating::AMinus),
    (dec!(0.0060), CreditRating::BbbPlus),
    (dec!(0.0080), CreditRating::Bbb),
    (dec!(0.0120), CreditRating::BbbMinus),
    (dec!(0.0200), CreditRating::BbPlus),
    (dec!(0.0350), CreditRating::Bb),
    (dec!(0.0550), CreditRating::BbMinus),
    (dec!(0.0800), CreditRating::BPlus),
    (dec!(0.1200), CreditRating::B),
    (dec!(0.2000), CreditRating::BMinus),
    (dec!(0.3500), CreditRating::Ccc),
    (dec!(0.5000), CreditRating::Cc),
];

/// Best grade whose PD bound covers `pd`; C beyond the table.
pub fn equivalent_rating(pd: Rate) -> CreditRating {
    RATING_THRESHOLDS
        .iter()
        .find(|(bound, _)| pd <= *bound)
        .map(|(_, rating)| *rating)
        .unwrap_or(CreditRating::C)
}

/// Indicative credit spread in basis points for an equivalent grade.
pub fn credit_spread_bps(rating: CreditRating) -> u32 {
    match rating {
        CreditRating::Aaa => 20,
        CreditRating::AaPlus => 35,
        CreditRating::Aa => 50,
        CreditRating::AaMinus => 65,
        CreditRating::APlus => 80,
        CreditRating::A => 100,
        CreditRating::AMinus => 120,
        CreditRating::BbbPlus => 150,
        CreditRating::Bbb => 180,
        CreditRating::BbbMinus => 220,
        CreditRating::BbPlus => 300,
        CreditRating::Bb => 400,
        CreditRating::BbMinus => 500,
        CreditRating::BPlus => 600,
        CreditRating::B => 750,
        CreditRating::BMinus => 900,
        CreditRating::Ccc => 1200,
        CreditRating::Cc => 1500,
        CreditRating::C => 2000,
        CreditRating::D | CreditRating::Unrated => DEFAULT_SPREAD_BPS,
    }
}

/// Coarse default-risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Minimal,
    Low,
    Moderate,
    Elevated,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Minimal => "Minimal",
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::Elevated => "Elevated",
            RiskCategory::High => "High",
            RiskCategory::VeryHigh => "Very High",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskCategory::High | RiskCategory::VeryHigh)
    }

    /// Band whose upper PD bound covers `pd`.
    pub fn from_pd(pd: Rate) -> Self {
        RISK_BANDS
            .iter()
            .find(|(bound, _)| pd <= *bound)
            .map(|(_, category)| *category)
            .unwrap_or(RiskCategory::VeryHigh)
    }
}

const RISK_BANDS: [(Rate, RiskCategory); 5] = [
    (dec!(0.0010), RiskCategory::Minimal),
    (dec!(0.0040), RiskCategory::Low),
    (dec!(0.0120), RiskCategory::Moderate),
    (dec!(0.0350), RiskCategory::Elevated),
    (dec!(0.0800), RiskCategory::High),
];

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equivalent_rating_bounds_are_inclusive() {
        assert_eq!(equivalent_rating(dec!(0.0001)), CreditRating::Aaa);
        assert_eq!(equivalent_rating(dec!(0.0025)), CreditRating::A);
        assert_eq!(equivalent_rating(dec!(0.00251)), CreditRating::AMinus);
        assert_eq!(equivalent_rating(dec!(0.5)), CreditRating::Cc);
        assert_eq!(equivalent_rating(dec!(0.9)), CreditRating::C);
    }

    #[test]
    fn test_risk_category_bands() {
        assert_eq!(RiskCategory::from_pd(dec!(0.0009)), RiskCategory::Minimal);
        assert_eq!(RiskCategory::from_pd(dec!(0.0040)), RiskCategory::Low);
        assert_eq!(RiskCategory::from_pd(dec!(0.01)), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_pd(dec!(0.03)), RiskCategory::Elevated);
        assert_eq!(RiskCategory::from_pd(dec!(0.08)), RiskCategory::High);
        assert_eq!(RiskCategory::from_pd(dec!(0.15)), RiskCategory::VeryHigh);
        assert_eq!(
            serde_json::to_value(RiskCategory::VeryHigh).unwrap(),
            serde_json::json!("Very High")
        );
    }

    #[test]
    fn test_multiplier_bands() {
        assert_eq!(tenor_multiplier(25), dec!(0.85));
        assert_eq!(tenor_multiplier(12), dec!(1.00));
        assert_eq!(tenor_multiplier(3), dec!(1.40));
        assert_eq!(dscr_multiplier(Coverage::Unbounded), dec!(0.70));
        assert_eq!(dscr_multiplier(Coverage::Finite(dec!(1.05))), dec!(1.30));
        assert_eq!(concentration_multiplier(dec!(0.5)), dec!(0.95));
    }

    #[test]
    fn test_unpriced_grades_take_default_spread() {
        assert_eq!(credit_spread_bps(CreditRating::A), 100);
        assert_eq!(credit_spread_bps(CreditRating::D), DEFAULT_SPREAD_BPS);
    }
}
