use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{cap, flag, weighted_sum};
use crate::params::{
    AssessmentConfidence, CongestionRisk, InterconnectionCertainty, MarketParameters,
    ResourceQuality,
};
use crate::types::Score;

const CURTAILMENT_POINTS: Decimal = dec!(15);
/// Points lost per unit of historical curtailment.
const CURTAILMENT_PENALTY_RATE: Decimal = dec!(200);

pub fn resource_points(quality: ResourceQuality) -> Score {
    match quality {
        ResourceQuality::Excellent => dec!(25),
        ResourceQuality::Good => dec!(20),
        ResourceQuality::Average => dec!(12),
        ResourceQuality::BelowAverage => dec!(5),
        ResourceQuality::Poor => dec!(0),
        ResourceQuality::Other => dec!(10),
    }
}

pub fn confidence_points(confidence: AssessmentConfidence) -> Score {
    match confidence {
        AssessmentConfidence::P99 => dec!(25),
        AssessmentConfidence::P90 => dec!(20),
        AssessmentConfidence::P75 => dec!(15),
        AssessmentConfidence::P50 => dec!(10),
        AssessmentConfidence::Other => dec!(10),
    }
}

pub fn interconnection_points(certainty: InterconnectionCertainty) -> Score {
    match certainty {
        InterconnectionCertainty::Secured => dec!(20),
        InterconnectionCertainty::High => dec!(15),
        InterconnectionCertainty::Moderate => dec!(8),
        InterconnectionCertainty::Low => dec!(3),
        InterconnectionCertainty::Speculative => dec!(0),
        InterconnectionCertainty::Other => dec!(5),
    }
}

pub fn congestion_points(risk: CongestionRisk) -> Score {
    match risk {
        CongestionRisk::Unconstrained => dec!(10),
        CongestionRisk::Low => dec!(8),
        CongestionRisk::Moderate => dec!(5),
        CongestionRisk::High => dec!(2),
        CongestionRisk::Severe => dec!(0),
        CongestionRisk::Other => dec!(3),
    }
}

/// Market and resource score, 0-100.
pub fn market_score(mp: &MarketParameters) -> Score {
    let curtailment_penalty =
        (mp.curtailment_history_percent * CURTAILMENT_PENALTY_RATE).min(CURTAILMENT_POINTS);
    let curtailment_points = (CURTAILMENT_POINTS - curtailment_penalty).max(Decimal::ZERO);

    cap(weighted_sum([
        (resource_points(mp.resource_quality), Decimal::ONE),
        (confidence_points(mp.resource_assessment_confidence), Decimal::ONE),
        (flag(mp.independent_resource_assessment), dec!(5)),
        (curtailment_points, Decimal::ONE),
        (interconnection_points(mp.interconnection_certainty), Decimal::ONE),
        (congestion_points(mp.grid_congestion_risk), Decimal::ONE),
        (flag(mp.land_lease_secured), dec!(5)),
    ]))
}
