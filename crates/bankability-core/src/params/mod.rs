//! Immutable per-run parameter snapshot.
//!
//! A snapshot is a nested document: project metadata at the top level plus
//! five groups (`technical`, `financial`, `credit`, `structure`, `market`).
//! Missing fields take their documented defaults and unknown fields are
//! ignored; a top level or group that is not an object is rejected.

pub mod credit;
pub mod financial;
pub mod market;
pub mod structure;
pub mod technical;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::BankabilityError;
use crate::CoreResult;

pub use credit::{CreditParameters, CreditRating, EntityType, OfftakeType, RegulatoryStability};
pub use financial::{DepreciationSchedule, FinancialParameters};
pub use market::{
    AssessmentConfidence, CongestionRisk, InterconnectionCertainty, MarketParameters,
    ResourceQuality,
};
pub use structure::{ContractorExperience, EpcContractType, InsuranceCoverage, StructureParameters};
pub use technical::{TechnicalParameters, TechnologyType};

/// Names of the parameter groups, in document order.
pub const SECTIONS: [&str; 5] = ["technical", "financial", "credit", "structure", "market"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStage {
    #[default]
    PreDevelopment,
    EarlyDevelopment,
    AdvancedDevelopment,
    ConstructionReady,
    UnderConstruction,
    Operational,
    #[serde(other)]
    Other,
}

impl ProjectStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStage::PreDevelopment => "pre_development",
            ProjectStage::EarlyDevelopment => "early_development",
            ProjectStage::AdvancedDevelopment => "advanced_development",
            ProjectStage::ConstructionReady => "construction_ready",
            ProjectStage::UnderConstruction => "under_construction",
            ProjectStage::Operational => "operational",
            ProjectStage::Other => "other",
        }
    }
}

/// Top-level container for all project parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectParameters {
    pub project_name: String,
    pub project_id: String,
    pub project_stage: ProjectStage,
    pub entity_type: EntityType,
    pub location_state: String,
    pub location_county: String,
    pub is_rural: bool,
    pub cod_target: Option<String>,
    pub description: String,

    pub technical: TechnicalParameters,
    pub financial: FinancialParameters,
    pub credit: CreditParameters,
    pub structure: StructureParameters,
    pub market: MarketParameters,
}

impl ProjectParameters {
    /// Build a snapshot from an untyped document.
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        let document = value.as_object().ok_or_else(|| {
            BankabilityError::invalid("parameters", "expected an object of parameter groups")
        })?;

        for section in SECTIONS {
            if let Some(group) = document.get(section) {
                if !group.is_object() {
                    return Err(BankabilityError::invalid(
                        section,
                        format!("expected an object, got {}", json_kind(group)),
                    ));
                }
            }
        }

        serde_json::from_value(value.clone())
            .map_err(|e| BankabilityError::invalid("parameters", e.to_string()))
    }

    /// Nested document form; `from_value(&p.to_value())` reproduces `p`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Clone with one `"section.field"` replaced.
    pub fn with_override(&self, key: &str, value: Value) -> CoreResult<Self> {
        let mut overrides = BTreeMap::new();
        overrides.insert(key.to_string(), value);
        self.with_overrides(&overrides)
    }

    /// Clone with every `"section.field"` in `overrides` replaced.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, Value>) -> CoreResult<Self> {
        let mut document = self.to_value();

        for (key, value) in overrides {
            let slot = key
                .split_once('.')
                .filter(|(section, _)| SECTIONS.contains(section))
                .and_then(|(section, field)| {
                    document
                        .get_mut(section)
                        .and_then(Value::as_object_mut)
                        .and_then(|group| group.get_mut(field))
                })
                .ok_or_else(|| BankabilityError::UnknownParameter(key.clone()))?;
            *slot = value.clone();
        }

        serde_json::from_value(document).map_err(|e| {
            let keys: Vec<&str> = overrides.keys().map(String::as_str).collect();
            BankabilityError::invalid(keys.join(", "), e.to_string())
        })
    }

    /// "County, State" when both are known, otherwise whichever is.
    pub fn location(&self) -> String {
        match (
            self.location_county.is_empty(),
            self.location_state.is_empty(),
        ) {
            (false, false) => format!("{}, {}", self.location_county, self.location_state),
            (true, false) => self.location_state.clone(),
            (false, true) => self.location_county.clone(),
            (true, true) => String::new(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
