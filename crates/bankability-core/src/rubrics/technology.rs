use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{cap, flag, weighted_sum};
use crate::params::{TechnicalParameters, TechnologyType};
use crate::types::{Rate, Score};

/// Ceiling on capacity factor relative to benchmark.
const MAX_CF_RATIO: Decimal = dec!(1.5);
const MAX_TRL: Decimal = dec!(9);

/// Typical capacity factor for a technology.
pub fn capacity_factor_benchmark(technology: TechnologyType) -> Rate {
    match technology {
        TechnologyType::SolarPv => dec!(0.25),
        TechnologyType::OnshoreWind => dec!(0.35),
        TechnologyType::OffshoreWind => dec!(0.45),
        TechnologyType::BatteryStorage => dec!(0.85),
        TechnologyType::HydroSmall => dec!(0.45),
        TechnologyType::Geothermal => dec!(0.90),
        TechnologyType::Biomass => dec!(0.80),
        TechnologyType::NaturalGasPeaker => dec!(0.15),
        TechnologyType::CombinedCycle => dec!(0.55),
        TechnologyType::TransmissionLine
        | TechnologyType::DistributionUpgrade
        | TechnologyType::Substation => dec!(0.95),
        _ => dec!(0.30),
    }
}

/// Technology & performance score, 0-100.
///
/// Capacity factor against benchmark (30 pts per unit ratio, ratio capped at
/// 1.5), readiness level (25), availability (20), permits (12.5) and site
/// control (12.5).
pub fn technology_score(tp: &TechnicalParameters) -> Score {
    let cf_ratio = if tp.capacity_factor > Decimal::ZERO {
        (tp.capacity_factor / capacity_factor_benchmark(tp.technology_type)).min(MAX_CF_RATIO)
    } else {
        Decimal::ZERO
    };
    let trl_ratio = (Decimal::from(tp.technology_readiness_level) / MAX_TRL).min(Decimal::ONE);

    cap(weighted_sum([
        (cf_ratio, dec!(30)),
        (trl_ratio, dec!(25)),
        (tp.availability_factor, dec!(20)),
        (flag(tp.environmental_permits_secured), dec!(12.5)),
        (flag(tp.site_control_secured), dec!(12.5)),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solar() -> TechnicalParameters {
        TechnicalParameters {
            technology_type: TechnologyType::SolarPv,
            nameplate_capacity_mw: dec!(100),
            capacity_factor: dec!(0.27),
            environmental_permits_secured: true,
            site_control_secured: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_strong_solar_caps_at_100() {
        // 0.27/0.25*30 = 32.4, +25 +19.6 +25 = 102 -> 100
        assert_eq!(technology_score(&solar()), dec!(100));
    }

    #[test]
    fn test_storage_profile() {
        let tp = TechnicalParameters {
            technology_type: TechnologyType::BatteryStorage,
            capacity_factor: dec!(0.17),
            technology_readiness_level: 8,
            availability_factor: dec!(0.97),
            environmental_permits_secured: true,
            site_control_secured: true,
            ..Default::default()
        };
        // 0.2*30 + 8/9*25 + 19.4 + 25
        let expected = dec!(6) + dec!(8) / dec!(9) * dec!(25) + dec!(19.4) + dec!(25);
        assert!((technology_score(&tp) - expected).abs() < dec!(0.0001));
    }

    #[test]
    fn test_zero_capacity_factor_scores_no_performance_points() {
        let tp = TechnicalParameters {
            capacity_factor: Decimal::ZERO,
            availability_factor: Decimal::ZERO,
            technology_readiness_level: 0,
            ..Default::default()
        };
        assert_eq!(technology_score(&tp), Decimal::ZERO);
    }

    #[test]
    fn test_unlisted_technology_uses_default_benchmark() {
        assert_eq!(
            capacity_factor_benchmark(TechnologyType::Microgrids),
            dec!(0.30)
        );
        assert_eq!(capacity_factor_benchmark(TechnologyType::Other), dec!(0.30));
    }
}
