use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BankabilityError;
use crate::types::{Money, Multiple, Rate};
use crate::CoreResult;

/// Tunable engine settings. Every field has a default, so a partial
/// document (or none at all) yields a working configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sensitivity: SensitivityConfig,
    pub programs: ProgramConfig,
}

/// Variation grids for the one-factor-at-a-time sensitivity runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Relative changes applied to revenue, opex, capex and generation
    pub relative_variations: Vec<Rate>,
    /// Absolute changes applied to the interest rate
    pub rate_variations: Vec<Rate>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            relative_variations: vec![
                dec!(-0.20),
                dec!(-0.10),
                dec!(-0.05),
                dec!(0),
                dec!(0.05),
                dec!(0.10),
                dec!(0.20),
            ],
            rate_variations: vec![
                dec!(-0.02),
                dec!(-0.01),
                dec!(-0.005),
                dec!(0),
                dec!(0.005),
                dec!(0.01),
                dec!(0.02),
            ],
        }
    }
}

/// Federal program thresholds used by the eligibility screens and the
/// financing structure templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    /// Longest RUS loan term
    pub rus_max_term_years: u32,
    /// DSCR demonstrating repayment ability for RUS
    pub rus_min_dscr: Multiple,
    /// Smallest project LPO typically considers
    pub lpo_min_project_cost: Money,
    /// DSCR supporting a reasonable prospect of repayment for LPO
    pub lpo_min_dscr: Multiple,
    /// Largest share of project cost an LPO guarantee covers
    pub lpo_max_guarantee_pct: Rate,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            rus_max_term_years: 35,
            rus_min_dscr: dec!(1.00),
            lpo_min_project_cost: dec!(25_000_000),
            lpo_min_dscr: dec!(1.20),
            lpo_max_guarantee_pct: dec!(0.80),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from an untyped JSON document.
    pub fn from_value(value: &serde_json::Value) -> CoreResult<Self> {
        let config: EngineConfig = serde_json::from_value(value.clone())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.sensitivity.relative_variations.is_empty() {
            return Err(BankabilityError::Config(
                "sensitivity.relative_variations must not be empty".into(),
            ));
        }
        if self.sensitivity.rate_variations.is_empty() {
            return Err(BankabilityError::Config(
                "sensitivity.rate_variations must not be empty".into(),
            ));
        }
        if self
            .sensitivity
            .relative_variations
            .iter()
            .any(|v| *v <= dec!(-1))
        {
            return Err(BankabilityError::Config(
                "sensitivity.relative_variations must be greater than -100%".into(),
            ));
        }
        let guarantee = self.programs.lpo_max_guarantee_pct;
        if guarantee <= Decimal::ZERO || guarantee > Decimal::ONE {
            return Err(BankabilityError::Config(
                "programs.lpo_max_guarantee_pct must be in (0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sensitivity.relative_variations.len(), 7);
        assert_eq!(config.programs.rus_max_term_years, 35);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = EngineConfig::from_value(&json!({
            "programs": { "lpo_min_project_cost": "50000000" }
        }))
        .unwrap();
        assert_eq!(config.programs.lpo_min_project_cost, dec!(50_000_000));
        assert_eq!(config.programs.lpo_min_dscr, dec!(1.20));
        assert_eq!(config.sensitivity, SensitivityConfig::default());
    }

    #[test]
    fn test_empty_variation_grid_rejected() {
        let result = EngineConfig::from_value(&json!({
            "sensitivity": { "rate_variations": [] }
        }));
        assert!(matches!(result, Err(BankabilityError::Config(_))));
    }
}
