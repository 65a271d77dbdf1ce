//! Preliminary screens for the USDA Rural Utilities Service electric loan
//! program and the DOE Loan Programs Office Title XVII guarantee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ProgramConfig;
use crate::display::{money, percent, title_case};
use crate::params::ProjectParameters;

pub const RUS_PROGRAM: &str = "USDA RUS Electric Program";
pub const LPO_PROGRAM: &str = "DOE Loan Programs Office - Title XVII";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Outcome of one screening criterion. `Uncertain` and `Required` are
/// informational and never block eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionStatus {
    Met,
    NotMet,
    Uncertain,
    Required,
}

impl CriterionStatus {
    fn from_check(passed: bool) -> Self {
        if passed {
            CriterionStatus::Met
        } else {
            CriterionStatus::NotMet
        }
    }

    pub fn blocks(&self) -> bool {
        matches!(self, CriterionStatus::NotMet)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriterion {
    pub criterion: String,
    pub met: CriterionStatus,
    pub detail: String,
}

/// Program-specific terms quoted alongside the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramTerms {
    Rus {
        form: String,
        max_term_years: u32,
    },
    Lpo {
        max_guarantee: String,
        credit_subsidy: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramEligibility {
    pub program: String,
    /// No criterion came back `not_met`
    pub eligible: bool,
    pub criteria: Vec<EligibilityCriterion>,
    pub notes: String,
    #[serde(flatten)]
    pub terms: ProgramTerms,
}

// ---------------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------------

fn criterion(name: &str, met: CriterionStatus, detail: String) -> EligibilityCriterion {
    EligibilityCriterion {
        criterion: name.into(),
        met,
        detail,
    }
}

fn verdict(
    program: &str,
    criteria: Vec<EligibilityCriterion>,
    notes: &str,
    terms: ProgramTerms,
) -> ProgramEligibility {
    ProgramEligibility {
        program: program.into(),
        eligible: !criteria.iter().any(|c| c.met.blocks()),
        criteria,
        notes: notes.into(),
        terms,
    }
}

/// Rural location, an eligible borrower, a defined cost and coverage of at
/// least `rus_min_dscr`. Every criterion is reported even after a failure.
pub fn rus_eligibility(params: &ProjectParameters, programs: &ProgramConfig) -> ProgramEligibility {
    let fp = &params.financial;
    let mut criteria = Vec::with_capacity(4);

    criteria.push(if params.is_rural {
        criterion(
            "Rural location",
            CriterionStatus::Met,
            "Project is located in a rural area.".into(),
        )
    } else {
        criterion(
            "Rural location",
            CriterionStatus::NotMet,
            "RUS financing requires the project to serve a rural area. Review USDA rural \
             designation maps for eligibility."
                .into(),
        )
    });

    criteria.push(if params.entity_type.is_rus_eligible() {
        criterion(
            "Eligible entity type",
            CriterionStatus::Met,
            format!(
                "{} is an eligible borrower type.",
                title_case(params.entity_type.as_str())
            ),
        )
    } else {
        criterion(
            "Eligible entity type",
            CriterionStatus::NotMet,
            "RUS typically finances cooperatives, municipal utilities, and tribal utilities."
                .into(),
        )
    });

    criteria.push(if fp.total_project_cost > Decimal::ZERO {
        criterion(
            "Project cost defined",
            CriterionStatus::Met,
            format!("Total project cost of {}.", money(fp.total_project_cost)),
        )
    } else {
        criterion(
            "Project cost defined",
            CriterionStatus::NotMet,
            "A defined project cost is required for RUS application.".into(),
        )
    });

    let dscr = fp.dscr();
    let feasible = dscr.meets(programs.rus_min_dscr);
    criteria.push(criterion(
        "Financial feasibility",
        CriterionStatus::from_check(feasible),
        if feasible {
            format!("DSCR of {dscr}x indicates sufficient revenue coverage.")
        } else {
            "Project must demonstrate ability to repay debt from operations.".into()
        },
    ));

    verdict(
        RUS_PROGRAM,
        criteria,
        "Preliminary assessment only. Formal eligibility is determined by RUS upon \
         application review.",
        ProgramTerms::Rus {
            form: "RUS Form 201 - Loan Application".into(),
            max_term_years: programs.rus_max_term_years,
        },
    )
}

/// Innovation (uncertain rather than failing for mature technology), a
/// minimum project size and coverage of at least `lpo_min_dscr`. NEPA
/// review is always listed as required.
pub fn lpo_eligibility(params: &ProjectParameters, programs: &ProgramConfig) -> ProgramEligibility {
    let tp = &params.technical;
    let fp = &params.financial;
    let mut criteria = Vec::with_capacity(4);

    criteria.push(if tp.technology_type.is_innovative() {
        criterion(
            "Innovative technology",
            CriterionStatus::Met,
            format!(
                "{} may qualify as an innovative energy technology.",
                title_case(tp.technology_type.as_str())
            ),
        )
    } else {
        criterion(
            "Innovative technology",
            CriterionStatus::Uncertain,
            "Technology must employ a new or significantly improved technology compared to \
             commercial technologies in service."
                .into(),
        )
    });

    let sized = fp.total_project_cost >= programs.lpo_min_project_cost;
    criteria.push(criterion(
        "Minimum project size",
        CriterionStatus::from_check(sized),
        if sized {
            "Project size exceeds typical minimum for LPO consideration.".into()
        } else {
            format!(
                "LPO generally considers projects with costs of ${}M or more.",
                (programs.lpo_min_project_cost / Decimal::from(1_000_000)).normalize()
            )
        },
    ));

    criteria.push(criterion(
        "Environmental review",
        CriterionStatus::Required,
        "NEPA environmental review will be required as part of the application.".into(),
    ));

    let dscr = fp.dscr();
    let repayable = dscr.meets(programs.lpo_min_dscr);
    criteria.push(criterion(
        "Credit assessment",
        CriterionStatus::from_check(repayable),
        if repayable {
            format!("DSCR of {dscr}x supports reasonable prospect of repayment.")
        } else {
            "Applicant must demonstrate reasonable prospect of repayment.".into()
        },
    ));

    verdict(
        LPO_PROGRAM,
        criteria,
        "Preliminary assessment only. Formal eligibility requires Part I and Part II \
         application review by LPO.",
        ProgramTerms::Lpo {
            max_guarantee: format!(
                "Up to {} of project costs",
                percent(programs.lpo_max_guarantee_pct, 0)
            ),
            credit_subsidy: "Borrower pays credit subsidy cost (typically 1-5% of guarantee \
                             amount)"
                .into(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{EntityType, TechnologyType};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn rural_cooperative() -> ProjectParameters {
        let mut p = ProjectParameters::default();
        p.entity_type = EntityType::Cooperative;
        p.is_rural = true;
        p.financial.total_project_cost = dec!(105_000_000);
        p.financial.annual_revenue = dec!(13_000_000);
        p.financial.annual_opex = dec!(2_100_000);
        p
    }

    #[test]
    fn test_rus_eligible_rural_cooperative() {
        let rus = rus_eligibility(&rural_cooperative(), &ProgramConfig::default());
        assert!(rus.eligible);
        assert_eq!(
            rus.criteria[1].detail,
            "Cooperative is an eligible borrower type."
        );
        assert_eq!(rus.criteria[2].detail, "Total project cost of $105,000,000.");
        assert_eq!(
            rus.criteria[3].detail,
            "DSCR of 1.77x indicates sufficient revenue coverage."
        );
    }

    #[test]
    fn test_rus_requires_rural_location() {
        let mut p = rural_cooperative();
        p.is_rural = false;
        let rus = rus_eligibility(&p, &ProgramConfig::default());
        assert!(!rus.eligible);
        assert_eq!(rus.criteria.len(), 4);
        assert_eq!(rus.criteria[0].met, CriterionStatus::NotMet);
    }

    #[test]
    fn test_lpo_uncertain_innovation_does_not_block() {
        let lpo = lpo_eligibility(&rural_cooperative(), &ProgramConfig::default());
        assert!(lpo.eligible);
        assert_eq!(lpo.criteria[0].met, CriterionStatus::Uncertain);
        assert_eq!(lpo.criteria[2].met, CriterionStatus::Required);
    }

    #[test]
    fn test_lpo_minimum_size_from_config() {
        let mut p = rural_cooperative();
        p.technical.technology_type = TechnologyType::BatteryStorage;
        p.financial.total_project_cost = dec!(20_000_000);
        p.financial.annual_revenue = dec!(3_000_000);
        p.financial.annual_opex = dec!(500_000);

        let lpo = lpo_eligibility(&p, &ProgramConfig::default());
        assert!(!lpo.eligible);
        assert_eq!(lpo.criteria[0].met, CriterionStatus::Met);
        assert_eq!(
            lpo.criteria[1].detail,
            "LPO generally considers projects with costs of $25M or more."
        );
    }

    #[test]
    fn test_terms_flatten_into_verdict() {
        let rus = rus_eligibility(&rural_cooperative(), &ProgramConfig::default());
        let json = serde_json::to_value(&rus).unwrap();
        assert_eq!(json["form"], "RUS Form 201 - Loan Application");
        assert_eq!(json["max_term_years"], 35);
        assert_eq!(json["criteria"][0]["met"], "met");

        let lpo = lpo_eligibility(&rural_cooperative(), &ProgramConfig::default());
        let json = serde_json::to_value(&lpo).unwrap();
        assert_eq!(json["max_guarantee"], "Up to 80% of project costs");
    }
}
