use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Generation, storage and grid asset categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyType {
    #[default]
    SolarPv,
    OnshoreWind,
    OffshoreWind,
    BatteryStorage,
    SolarPlusStorage,
    TransmissionLine,
    DistributionUpgrade,
    Substation,
    HydroSmall,
    Geothermal,
    Biomass,
    NaturalGasPeaker,
    CombinedCycle,
    Microgrids,
    GridModernization,
    #[serde(other)]
    Other,
}

impl TechnologyType {
    pub const ALL: [TechnologyType; 15] = [
        TechnologyType::SolarPv,
        TechnologyType::OnshoreWind,
        TechnologyType::OffshoreWind,
        TechnologyType::BatteryStorage,
        TechnologyType::SolarPlusStorage,
        TechnologyType::TransmissionLine,
        TechnologyType::DistributionUpgrade,
        TechnologyType::Substation,
        TechnologyType::HydroSmall,
        TechnologyType::Geothermal,
        TechnologyType::Biomass,
        TechnologyType::NaturalGasPeaker,
        TechnologyType::CombinedCycle,
        TechnologyType::Microgrids,
        TechnologyType::GridModernization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TechnologyType::SolarPv => "solar_pv",
            TechnologyType::OnshoreWind => "onshore_wind",
            TechnologyType::OffshoreWind => "offshore_wind",
            TechnologyType::BatteryStorage => "battery_storage",
            TechnologyType::SolarPlusStorage => "solar_plus_storage",
            TechnologyType::TransmissionLine => "transmission_line",
            TechnologyType::DistributionUpgrade => "distribution_upgrade",
            TechnologyType::Substation => "substation",
            TechnologyType::HydroSmall => "hydro_small",
            TechnologyType::Geothermal => "geothermal",
            TechnologyType::Biomass => "biomass",
            TechnologyType::NaturalGasPeaker => "natural_gas_peaker",
            TechnologyType::CombinedCycle => "combined_cycle",
            TechnologyType::Microgrids => "microgrids",
            TechnologyType::GridModernization => "grid_modernization",
            TechnologyType::Other => "other",
        }
    }

    /// Technologies that may clear the LPO Title XVII innovation bar.
    pub fn is_innovative(&self) -> bool {
        matches!(
            self,
            TechnologyType::BatteryStorage
                | TechnologyType::OffshoreWind
                | TechnologyType::Geothermal
                | TechnologyType::SolarPlusStorage
                | TechnologyType::Microgrids
                | TechnologyType::GridModernization
        )
    }
}

/// Physical and development-status inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalParameters {
    pub technology_type: TechnologyType,
    pub nameplate_capacity_mw: Decimal,
    pub annual_generation_mwh: Decimal,
    /// 0-1
    pub capacity_factor: Rate,
    /// 1-9
    pub technology_readiness_level: u32,
    pub expected_useful_life_years: u32,
    pub degradation_rate_annual: Rate,
    /// 0-1
    pub availability_factor: Rate,
    pub interconnection_voltage_kv: Decimal,
    pub interconnection_status: String,
    pub environmental_permits_secured: bool,
    pub site_control_secured: bool,
}

impl Default for TechnicalParameters {
    fn default() -> Self {
        Self {
            technology_type: TechnologyType::SolarPv,
            nameplate_capacity_mw: Decimal::ZERO,
            annual_generation_mwh: Decimal::ZERO,
            capacity_factor: Decimal::ZERO,
            technology_readiness_level: 9,
            expected_useful_life_years: 30,
            degradation_rate_annual: dec!(0.005),
            availability_factor: dec!(0.98),
            interconnection_voltage_kv: Decimal::ZERO,
            interconnection_status: "planned".into(),
            environmental_permits_secured: false,
            site_control_secured: false,
        }
    }
}
