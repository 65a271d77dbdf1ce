use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Revenue contract under which output is sold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfftakeType {
    #[default]
    PpaFixed,
    PpaIndexed,
    Merchant,
    RegulatedRate,
    TollingAgreement,
    CapacityContract,
    BundledRate,
    #[serde(other)]
    Other,
}

impl OfftakeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfftakeType::PpaFixed => "ppa_fixed",
            OfftakeType::PpaIndexed => "ppa_indexed",
            OfftakeType::Merchant => "merchant",
            OfftakeType::RegulatedRate => "regulated_rate",
            OfftakeType::TollingAgreement => "tolling_agreement",
            OfftakeType::CapacityContract => "capacity_contract",
            OfftakeType::BundledRate => "bundled_rate",
            OfftakeType::Other => "other",
        }
    }

    /// Fixed-price PPAs and regulated rates fix revenue for the contract term.
    pub fn is_contracted(&self) -> bool {
        matches!(self, OfftakeType::PpaFixed | OfftakeType::RegulatedRate)
    }
}

/// Borrower or offtaker organisational form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    #[default]
    InvestorOwnedUtility,
    MunicipalUtility,
    Cooperative,
    IndependentPowerProducer,
    CommunityChoiceAggregator,
    TribalUtility,
    StateAuthority,
    #[serde(other)]
    Other,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::InvestorOwnedUtility => "investor_owned_utility",
            EntityType::MunicipalUtility => "municipal_utility",
            EntityType::Cooperative => "cooperative",
            EntityType::IndependentPowerProducer => "independent_power_producer",
            EntityType::CommunityChoiceAggregator => "community_choice_aggregator",
            EntityType::TribalUtility => "tribal_utility",
            EntityType::StateAuthority => "state_authority",
            EntityType::Other => "other",
        }
    }

    /// Borrower types the RUS electric program lends to.
    pub fn is_rus_eligible(&self) -> bool {
        matches!(
            self,
            EntityType::Cooperative
                | EntityType::MunicipalUtility
                | EntityType::TribalUtility
                | EntityType::StateAuthority
        )
    }
}

/// Agency-style letter grade. Unrecognized grades read as `Unrated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CreditRating {
    Aaa,
    AaPlus,
    Aa,
    AaMinus,
    APlus,
    A,
    AMinus,
    BbbPlus,
    #[default]
    Bbb,
    BbbMinus,
    BbPlus,
    Bb,
    BbMinus,
    BPlus,
    B,
    BMinus,
    Ccc,
    Cc,
    C,
    D,
    Unrated,
}

impl CreditRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRating::Aaa => "AAA",
            CreditRating::AaPlus => "AA+",
            CreditRating::Aa => "AA",
            CreditRating::AaMinus => "AA-",
            CreditRating::APlus => "A+",
            CreditRating::A => "A",
            CreditRating::AMinus => "A-",
            CreditRating::BbbPlus => "BBB+",
            CreditRating::Bbb => "BBB",
            CreditRating::BbbMinus => "BBB-",
            CreditRating::BbPlus => "BB+",
            CreditRating::Bb => "BB",
            CreditRating::BbMinus => "BB-",
            CreditRating::BPlus => "B+",
            CreditRating::B => "B",
            CreditRating::BMinus => "B-",
            CreditRating::Ccc => "CCC",
            CreditRating::Cc => "CC",
            CreditRating::C => "C",
            CreditRating::D => "D",
            CreditRating::Unrated => "unrated",
        }
    }
}

impl From<String> for CreditRating {
    fn from(grade: String) -> Self {
        match grade.as_str() {
            "AAA" => CreditRating::Aaa,
            "AA+" => CreditRating::AaPlus,
            "AA" => CreditRating::Aa,
            "AA-" => CreditRating::AaMinus,
            "A+" => CreditRating::APlus,
            "A" => CreditRating::A,
            "A-" => CreditRating::AMinus,
            "BBB+" => CreditRating::BbbPlus,
            "BBB" => CreditRating::Bbb,
            "BBB-" => CreditRating::BbbMinus,
            "BB+" => CreditRating::BbPlus,
            "BB" => CreditRating::Bb,
            "BB-" => CreditRating::BbMinus,
            "B+" => CreditRating::BPlus,
            "B" => CreditRating::B,
            "B-" => CreditRating::BMinus,
            "CCC" => CreditRating::Ccc,
            "CC" => CreditRating::Cc,
            "C" => CreditRating::C,
            "D" => CreditRating::D,
            _ => CreditRating::Unrated,
        }
    }
}

impl From<CreditRating> for String {
    fn from(rating: CreditRating) -> Self {
        rating.as_str().to_string()
    }
}

impl std::fmt::Display for CreditRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outlook for the regulatory regime governing the offtaker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryStability {
    #[default]
    Stable,
    Positive,
    Uncertain,
    Negative,
    #[serde(other)]
    Other,
}

/// Offtake and counterparty inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditParameters {
    pub offtake_type: OfftakeType,
    pub offtake_tenor_years: u32,
    pub offtaker_credit_rating: CreditRating,
    pub offtaker_entity_type: EntityType,
    /// Share of revenue from the largest counterparty, 0-1
    pub revenue_concentration_percent: Rate,
    pub regulatory_jurisdiction: String,
    pub regulatory_stability_rating: RegulatoryStability,
    pub curtailment_risk: String,
    pub counterparty_count: u32,
    pub contract_price_per_mwh: Money,
    pub has_credit_support: bool,
    pub credit_support_type: String,
    pub sovereign_risk_rating: String,
}

impl Default for CreditParameters {
    fn default() -> Self {
        Self {
            offtake_type: OfftakeType::PpaFixed,
            offtake_tenor_years: 20,
            offtaker_credit_rating: CreditRating::Bbb,
            offtaker_entity_type: EntityType::InvestorOwnedUtility,
            revenue_concentration_percent: dec!(1.0),
            regulatory_jurisdiction: String::new(),
            regulatory_stability_rating: RegulatoryStability::Stable,
            curtailment_risk: "low".into(),
            counterparty_count: 1,
            contract_price_per_mwh: Decimal::ZERO,
            has_credit_support: false,
            credit_support_type: String::new(),
            sovereign_risk_rating: "AAA".into(),
        }
    }
}
