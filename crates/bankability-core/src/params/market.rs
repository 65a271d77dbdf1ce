use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceQuality {
    Excellent,
    #[default]
    Good,
    Average,
    BelowAverage,
    Poor,
    #[serde(other)]
    Other,
}

impl ResourceQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceQuality::Excellent => "excellent",
            ResourceQuality::Good => "good",
            ResourceQuality::Average => "average",
            ResourceQuality::BelowAverage => "below_average",
            ResourceQuality::Poor => "poor",
            ResourceQuality::Other => "other",
        }
    }
}

/// Exceedance probability the energy estimate is quoted at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentConfidence {
    P99,
    P90,
    P75,
    #[default]
    P50,
    #[serde(other)]
    Other,
}

impl AssessmentConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentConfidence::P99 => "p99",
            AssessmentConfidence::P90 => "p90",
            AssessmentConfidence::P75 => "p75",
            AssessmentConfidence::P50 => "p50",
            AssessmentConfidence::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterconnectionCertainty {
    Secured,
    #[default]
    High,
    Moderate,
    Low,
    Speculative,
    #[serde(other)]
    Other,
}

impl InterconnectionCertainty {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterconnectionCertainty::Secured => "secured",
            InterconnectionCertainty::High => "high",
            InterconnectionCertainty::Moderate => "moderate",
            InterconnectionCertainty::Low => "low",
            InterconnectionCertainty::Speculative => "speculative",
            InterconnectionCertainty::Other => "other",
        }
    }

    pub fn is_at_risk(&self) -> bool {
        matches!(
            self,
            InterconnectionCertainty::Low | InterconnectionCertainty::Speculative
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionRisk {
    #[serde(rename = "none")]
    Unconstrained,
    #[default]
    Low,
    Moderate,
    High,
    Severe,
    #[serde(other)]
    Other,
}

impl CongestionRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongestionRisk::Unconstrained => "none",
            CongestionRisk::Low => "low",
            CongestionRisk::Moderate => "moderate",
            CongestionRisk::High => "high",
            CongestionRisk::Severe => "severe",
            CongestionRisk::Other => "other",
        }
    }
}

/// Resource, grid access and site inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketParameters {
    pub resource_quality: ResourceQuality,
    pub resource_assessment_confidence: AssessmentConfidence,
    pub independent_resource_assessment: bool,
    pub market_price_per_mwh: Money,
    pub market_price_trend: String,
    /// Historical curtailment as a fraction of output, 0-1
    pub curtailment_history_percent: Rate,
    pub interconnection_certainty: InterconnectionCertainty,
    pub grid_congestion_risk: CongestionRisk,
    pub competing_projects_in_queue: u32,
    pub community_support: String,
    pub land_lease_secured: bool,
    pub land_lease_term_years: u32,
}

impl Default for MarketParameters {
    fn default() -> Self {
        Self {
            resource_quality: ResourceQuality::Good,
            resource_assessment_confidence: AssessmentConfidence::P50,
            independent_resource_assessment: false,
            market_price_per_mwh: Decimal::ZERO,
            market_price_trend: "stable".into(),
            curtailment_history_percent: Decimal::ZERO,
            interconnection_certainty: InterconnectionCertainty::High,
            grid_congestion_risk: CongestionRisk::Low,
            competing_projects_in_queue: 0,
            community_support: "supportive".into(),
            land_lease_secured: false,
            land_lease_term_years: 30,
        }
    }
}
