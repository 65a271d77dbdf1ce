use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// How construction cost and schedule risk is allocated to the contractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpcContractType {
    #[default]
    FixedPriceTurnkey,
    FixedPriceEpc,
    CostPlusGmp,
    CostPlus,
    SelfBuild,
    #[serde(other)]
    Other,
}

impl EpcContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpcContractType::FixedPriceTurnkey => "fixed_price_turnkey",
            EpcContractType::FixedPriceEpc => "fixed_price_epc",
            EpcContractType::CostPlusGmp => "cost_plus_gmp",
            EpcContractType::CostPlus => "cost_plus",
            EpcContractType::SelfBuild => "self_build",
            EpcContractType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractorExperience {
    #[default]
    Established,
    Experienced,
    Moderate,
    Limited,
    #[serde(other)]
    Other,
}

impl ContractorExperience {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractorExperience::Established => "established",
            ContractorExperience::Experienced => "experienced",
            ContractorExperience::Moderate => "moderate",
            ContractorExperience::Limited => "limited",
            ContractorExperience::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceCoverage {
    #[default]
    Comprehensive,
    Standard,
    Basic,
    #[serde(rename = "none")]
    Uninsured,
    #[serde(other)]
    Other,
}

impl InsuranceCoverage {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceCoverage::Comprehensive => "comprehensive",
            InsuranceCoverage::Standard => "standard",
            InsuranceCoverage::Basic => "basic",
            InsuranceCoverage::Uninsured => "none",
            InsuranceCoverage::Other => "other",
        }
    }
}

/// Contractual protections and reserve arrangements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParameters {
    pub epc_contract_type: EpcContractType,
    pub epc_contractor_experience: ContractorExperience,
    pub epc_warranty_years: u32,
    pub om_contract_type: String,
    pub om_contract_tenor_years: u32,
    pub insurance_coverage: InsuranceCoverage,
    pub performance_guarantee: bool,
    /// Guaranteed share of nameplate output, 0-1
    pub performance_guarantee_level: Decimal,
    pub completion_guarantee: bool,
    pub reserve_accounts_funded: bool,
    pub debt_service_reserve_months: u32,
    pub major_maintenance_reserve: bool,
    pub step_in_rights: bool,
    pub assignment_provisions: bool,
    pub change_of_control_provisions: bool,
    pub dispute_resolution: String,
    pub governing_law: String,
}

impl Default for StructureParameters {
    fn default() -> Self {
        Self {
            epc_contract_type: EpcContractType::FixedPriceTurnkey,
            epc_contractor_experience: ContractorExperience::Established,
            epc_warranty_years: 2,
            om_contract_type: "full_service".into(),
            om_contract_tenor_years: 10,
            insurance_coverage: InsuranceCoverage::Comprehensive,
            performance_guarantee: true,
            performance_guarantee_level: dec!(0.95),
            completion_guarantee: true,
            reserve_accounts_funded: false,
            debt_service_reserve_months: 6,
            major_maintenance_reserve: false,
            step_in_rights: true,
            assignment_provisions: true,
            change_of_control_provisions: true,
            dispute_resolution: "arbitration".into(),
            governing_law: "US".into(),
        }
    }
}
