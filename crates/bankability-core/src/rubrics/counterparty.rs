use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{cap, flag, weighted_sum, MAX_SCORE};
use crate::params::{CreditParameters, CreditRating, OfftakeType, RegulatoryStability};
use crate::types::Score;

/// Tenor at which the contract-length component maxes out.
const FULL_TENOR_YEARS: Decimal = dec!(25);

pub fn rating_points(rating: CreditRating) -> Score {
    match rating {
        CreditRating::Aaa => dec!(100),
        CreditRating::AaPlus => dec!(95),
        CreditRating::Aa => dec!(90),
        CreditRating::AaMinus => dec!(85),
        CreditRating::APlus => dec!(80),
        CreditRating::A => dec!(75),
        CreditRating::AMinus => dec!(70),
        CreditRating::BbbPlus => dec!(65),
        CreditRating::Bbb => dec!(60),
        CreditRating::BbbMinus => dec!(55),
        CreditRating::BbPlus => dec!(45),
        CreditRating::Bb => dec!(40),
        CreditRating::BbMinus => dec!(35),
        CreditRating::BPlus => dec!(30),
        CreditRating::B => dec!(25),
        CreditRating::BMinus => dec!(20),
        CreditRating::Ccc => dec!(10),
        CreditRating::Cc => dec!(5),
        CreditRating::C => dec!(2),
        CreditRating::D => dec!(0),
        CreditRating::Unrated => dec!(30),
    }
}

pub fn offtake_points(offtake: OfftakeType) -> Score {
    match offtake {
        OfftakeType::PpaFixed => dec!(90),
        OfftakeType::PpaIndexed => dec!(75),
        OfftakeType::RegulatedRate => dec!(85),
        OfftakeType::TollingAgreement => dec!(70),
        OfftakeType::CapacityContract => dec!(65),
        OfftakeType::BundledRate => dec!(80),
        OfftakeType::Merchant => dec!(20),
        OfftakeType::Other => dec!(40),
    }
}

pub fn stability_points(stability: RegulatoryStability) -> Score {
    match stability {
        RegulatoryStability::Stable => dec!(100),
        RegulatoryStability::Positive => dec!(90),
        RegulatoryStability::Uncertain => dec!(50),
        RegulatoryStability::Negative => dec!(20),
        RegulatoryStability::Other => dec!(50),
    }
}

/// Diversification: 80 points lost at full concentration, 5 back per
/// counterparty when there is more than one.
pub fn concentration_points(cp: &CreditParameters) -> Score {
    let base = (MAX_SCORE - cp.revenue_concentration_percent * dec!(80)).max(Decimal::ZERO);
    if cp.counterparty_count > 1 {
        (base + Decimal::from(cp.counterparty_count) * dec!(5)).min(MAX_SCORE)
    } else {
        base
    }
}

/// Counterparty credit quality, 0-100.
pub fn counterparty_score(cp: &CreditParameters) -> Score {
    let tenor_points =
        (Decimal::from(cp.offtake_tenor_years) / FULL_TENOR_YEARS).min(Decimal::ONE) * MAX_SCORE;

    cap(weighted_sum([
        (rating_points(cp.offtaker_credit_rating), dec!(0.35)),
        (tenor_points, dec!(0.20)),
        (offtake_points(cp.offtake_type), dec!(0.20)),
        (concentration_points(cp), dec!(0.10)),
        (stability_points(cp.regulatory_stability_rating), dec!(0.10)),
        (flag(cp.has_credit_support), dec!(5)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EntityType;

    #[test]
    fn test_bbb_cooperative_with_letter_of_credit() {
        let cp = CreditParameters {
            offtaker_entity_type: EntityType::Cooperative,
            has_credit_support: true,
            credit_support_type: "letter_of_credit".into(),
            ..Default::default()
        };
        // 21 + 16 + 18 + 2 + 10 + 5
        assert_eq!(counterparty_score(&cp), dec!(72));
    }

    #[test]
    fn test_diversified_counterparties_earn_bonus() {
        let cp = CreditParameters {
            revenue_concentration_percent: dec!(0.40),
            counterparty_count: 4,
            ..Default::default()
        };
        // 100 - 32 = 68, +20
        assert_eq!(concentration_points(&cp), dec!(88));
    }

    #[test]
    fn test_best_profile_tops_out_below_cap() {
        let cp = CreditParameters {
            offtaker_credit_rating: CreditRating::Aaa,
            offtake_tenor_years: 40,
            revenue_concentration_percent: Decimal::ZERO,
            counterparty_count: 30,
            has_credit_support: true,
            ..Default::default()
        };
        // 35 + 20 + 18 + 10 + 10 + 5
        assert_eq!(counterparty_score(&cp), dec!(98));
    }

    #[test]
    fn test_merchant_unrated_scores_low() {
        let cp = CreditParameters {
            offtake_type: OfftakeType::Merchant,
            offtaker_credit_rating: CreditRating::Unrated,
            offtake_tenor_years: 0,
            regulatory_stability_rating: RegulatoryStability::Negative,
            ..Default::default()
        };
        // 10.5 + 0 + 4 + 2 + 2
        assert_eq!(counterparty_score(&cp), dec!(18.5));
    }
}
