use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{cap, flag, weighted_sum};
use crate::params::{ContractorExperience, EpcContractType, InsuranceCoverage, StructureParameters};
use crate::types::Score;

/// Reserve months that earn the full funded-reserve credit.
const FULL_RESERVE_MONTHS: Decimal = dec!(6);

pub fn epc_points(contract: EpcContractType) -> Score {
    match contract {
        EpcContractType::FixedPriceTurnkey => dec!(30),
        EpcContractType::FixedPriceEpc => dec!(25),
        EpcContractType::CostPlusGmp => dec!(15),
        EpcContractType::CostPlus => dec!(5),
        EpcContractType::SelfBuild => dec!(10),
        EpcContractType::Other => dec!(10),
    }
}

pub fn experience_points(experience: ContractorExperience) -> Score {
    match experience {
        ContractorExperience::Established => dec!(15),
        ContractorExperience::Experienced => dec!(12),
        ContractorExperience::Moderate => dec!(8),
        ContractorExperience::Limited => dec!(3),
        ContractorExperience::Other => dec!(5),
    }
}

pub fn insurance_points(coverage: InsuranceCoverage) -> Score {
    match coverage {
        InsuranceCoverage::Comprehensive => dec!(10),
        InsuranceCoverage::Standard => dec!(7),
        InsuranceCoverage::Basic => dec!(3),
        InsuranceCoverage::Uninsured => dec!(0),
        InsuranceCoverage::Other => dec!(3),
    }
}

/// Contractual protection and reserve score, 0-100.
pub fn structure_score(sp: &StructureParameters) -> Score {
    let guarantee_points = if sp.performance_guarantee {
        (sp.performance_guarantee_level * dec!(10)).min(dec!(10))
    } else {
        Decimal::ZERO
    };
    let reserve_points = if sp.reserve_accounts_funded {
        let coverage =
            (Decimal::from(sp.debt_service_reserve_months) / FULL_RESERVE_MONTHS).min(Decimal::ONE);
        dec!(5) + coverage * dec!(7)
    } else {
        Decimal::ZERO
    };

    cap(weighted_sum([
        (epc_points(sp.epc_contract_type), Decimal::ONE),
        (experience_points(sp.epc_contractor_experience), Decimal::ONE),
        (guarantee_points, Decimal::ONE),
        (flag(sp.completion_guarantee), dec!(8)),
        (reserve_points, Decimal::ONE),
        (flag(sp.major_maintenance_reserve), dec!(5)),
        (insurance_points(sp.insurance_coverage), Decimal::ONE),
        (flag(sp.step_in_rights), dec!(3)),
        (flag(sp.assignment_provisions), dec!(3)),
        (flag(sp.change_of_control_provisions), dec!(2)),
    ]))
}
