#![allow(dead_code)]

use bankability_core::ProjectParameters;
use serde_json::{json, Value};

fn structure() -> Value {
    json!({
        "epc_contract_type": "fixed_price_turnkey",
        "epc_contractor_experience": "established",
        "epc_warranty_years": 2,
        "om_contract_type": "full_service",
        "om_contract_tenor_years": 10,
        "insurance_coverage": "comprehensive",
        "performance_guarantee": true,
        "performance_guarantee_level": 0.95,
        "completion_guarantee": true,
        "reserve_accounts_funded": true,
        "debt_service_reserve_months": 6,
        "major_maintenance_reserve": true,
        "step_in_rights": true,
        "assignment_provisions": true,
        "change_of_control_provisions": true
    })
}

/// 100 MW rural cooperative solar with a fixed-price PPA.
pub fn solar_document() -> Value {
    json!({
        "project_name": "Butler County Solar",
        "project_id": "BCS-001",
        "project_stage": "advanced_development",
        "entity_type": "cooperative",
        "location_state": "Kansas",
        "location_county": "Butler",
        "is_rural": true,
        "description": "100 MW utility-scale solar",
        "technical": {
            "technology_type": "solar_pv",
            "nameplate_capacity_mw": 100,
            "annual_generation_mwh": 236520,
            "capacity_factor": 0.27,
            "technology_readiness_level": 9,
            "expected_useful_life_years": 30,
            "degradation_rate_annual": 0.005,
            "availability_factor": 0.98,
            "interconnection_voltage_kv": 138,
            "interconnection_status": "agreement_executed",
            "environmental_permits_secured": true,
            "site_control_secured": true
        },
        "financial": {
            "total_project_cost": 105000000,
            "total_hard_costs": 84000000,
            "total_soft_costs": 10500000,
            "contingency_percent": 0.10,
            "construction_period_months": 18,
            "debt_percent": 0.70,
            "equity_percent": 0.30,
            "interest_rate": 0.055,
            "debt_tenor_years": 20,
            "target_dscr": 1.35,
            "annual_revenue": 13000000,
            "annual_opex": 2100000,
            "annual_opex_escalation": 0.025,
            "revenue_escalation": 0.02,
            "tax_rate": 0.21,
            "itc_percent": 0.30,
            "depreciation_schedule": "macrs_5",
            "discount_rate": 0.08
        },
        "credit": {
            "offtake_type": "ppa_fixed",
            "offtake_tenor_years": 20,
            "offtaker_credit_rating": "BBB",
            "offtaker_entity_type": "cooperative",
            "revenue_concentration_percent": 1.0,
            "regulatory_stability_rating": "stable",
            "curtailment_risk": "low",
            "counterparty_count": 1,
            "contract_price_per_mwh": 55,
            "has_credit_support": true,
            "credit_support_type": "letter_of_credit"
        },
        "structure": structure(),
        "market": {
            "resource_quality": "good",
            "resource_assessment_confidence": "p50",
            "independent_resource_assessment": true,
            "market_price_per_mwh": 45,
            "market_price_trend": "stable",
            "curtailment_history_percent": 0.02,
            "interconnection_certainty": "high",
            "grid_congestion_risk": "low",
            "competing_projects_in_queue": 5,
            "community_support": "supportive",
            "land_lease_secured": true,
            "land_lease_term_years": 30
        }
    })
}

/// 150 MW merchant-developer wind earning the PTC.
pub fn wind_document() -> Value {
    json!({
        "project_name": "Garfield Wind",
        "project_id": "GW-001",
        "project_stage": "construction_ready",
        "entity_type": "independent_power_producer",
        "location_state": "Oklahoma",
        "location_county": "Garfield",
        "is_rural": true,
        "technical": {
            "technology_type": "onshore_wind",
            "nameplate_capacity_mw": 150,
            "annual_generation_mwh": 499260,
            "capacity_factor": 0.38,
            "technology_readiness_level": 9,
            "expected_useful_life_years": 25,
            "degradation_rate_annual": 0.008,
            "availability_factor": 0.97,
            "interconnection_voltage_kv": 230,
            "interconnection_status": "agreement_executed",
            "environmental_permits_secured": true,
            "site_control_secured": true
        },
        "financial": {
            "total_project_cost": 225000000,
            "total_hard_costs": 180000000,
            "total_soft_costs": 22500000,
            "contingency_percent": 0.10,
            "construction_period_months": 24,
            "debt_percent": 0.65,
            "equity_percent": 0.35,
            "interest_rate": 0.05,
            "debt_tenor_years": 18,
            "target_dscr": 1.30,
            "annual_revenue": 23000000,
            "annual_opex": 5700000,
            "annual_opex_escalation": 0.025,
            "revenue_escalation": 0.02,
            "tax_rate": 0.21,
            "itc_percent": 0,
            "ptc_per_mwh": 27.5,
            "depreciation_schedule": "macrs_5",
            "discount_rate": 0.08
        },
        "credit": {
            "offtake_type": "ppa_fixed",
            "offtake_tenor_years": 20,
            "offtaker_credit_rating": "A",
            "offtaker_entity_type": "independent_power_producer",
            "revenue_concentration_percent": 1.0,
            "regulatory_stability_rating": "stable",
            "curtailment_risk": "low",
            "counterparty_count": 1,
            "contract_price_per_mwh": 50,
            "has_credit_support": true,
            "credit_support_type": "letter_of_credit"
        },
        "structure": structure(),
        "market": {
            "resource_quality": "good",
            "resource_assessment_confidence": "p50",
            "independent_resource_assessment": true,
            "market_price_per_mwh": 42,
            "market_price_trend": "stable",
            "curtailment_history_percent": 0.03,
            "interconnection_certainty": "high",
            "grid_congestion_risk": "low",
            "competing_projects_in_queue": 3,
            "community_support": "supportive",
            "land_lease_secured": true,
            "land_lease_term_years": 30
        }
    })
}

/// 50 MW municipal battery under a capacity contract, untaxed.
pub fn storage_document() -> Value {
    json!({
        "project_name": "Maricopa Storage",
        "project_id": "MS-003",
        "project_stage": "advanced_development",
        "entity_type": "municipal_utility",
        "location_state": "Arizona",
        "location_county": "Maricopa",
        "is_rural": false,
        "technical": {
            "technology_type": "battery_storage",
            "nameplate_capacity_mw": 50,
            "annual_generation_mwh": 73000,
            "capacity_factor": 0.17,
            "technology_readiness_level": 8,
            "expected_useful_life_years": 20,
            "degradation_rate_annual": 0.02,
            "availability_factor": 0.97,
            "interconnection_voltage_kv": 69,
            "interconnection_status": "agreement_executed",
            "environmental_permits_secured": true,
            "site_control_secured": true
        },
        "financial": {
            "total_project_cost": 65000000,
            "total_hard_costs": 52000000,
            "total_soft_costs": 6500000,
            "contingency_percent": 0.10,
            "construction_period_months": 12,
            "debt_percent": 0.60,
            "equity_percent": 0.40,
            "interest_rate": 0.06,
            "debt_tenor_years": 15,
            "target_dscr": 1.40,
            "annual_revenue": 8500000,
            "annual_opex": 1300000,
            "annual_opex_escalation": 0.025,
            "revenue_escalation": 0.02,
            "tax_rate": 0,
            "itc_percent": 0.30,
            "depreciation_schedule": "macrs_7",
            "discount_rate": 0.10
        },
        "credit": {
            "offtake_type": "capacity_contract",
            "offtake_tenor_years": 15,
            "offtaker_credit_rating": "A-",
            "offtaker_entity_type": "municipal_utility",
            "revenue_concentration_percent": 1.0,
            "regulatory_stability_rating": "stable",
            "curtailment_risk": "low",
            "counterparty_count": 1,
            "has_credit_support": false
        },
        "structure": structure(),
        "market": {
            "resource_quality": "good",
            "resource_assessment_confidence": "p50",
            "independent_resource_assessment": false,
            "market_price_per_mwh": 55,
            "market_price_trend": "increasing",
            "curtailment_history_percent": 0,
            "interconnection_certainty": "secured",
            "grid_congestion_risk": "moderate",
            "competing_projects_in_queue": 2,
            "community_support": "supportive",
            "land_lease_secured": true,
            "land_lease_term_years": 25
        }
    })
}

pub fn solar() -> ProjectParameters {
    ProjectParameters::from_value(&solar_document()).unwrap()
}

pub fn wind() -> ProjectParameters {
    ProjectParameters::from_value(&wind_document()).unwrap()
}

pub fn storage() -> ProjectParameters {
    ProjectParameters::from_value(&storage_document()).unwrap()
}
