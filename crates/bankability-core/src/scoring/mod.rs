//! Composite bankability scoring: five weighted sub-scores, a grade,
//! narrative and federal program screens.

pub mod composite;
pub mod eligibility;
pub mod narrative;
pub mod report;

pub use composite::{
    score, score_with_config, BankabilityResult, Grade, ScoreCategory, ScoreComponent, SubScore,
    WEIGHTS,
};
pub use eligibility::{
    lpo_eligibility, rus_eligibility, CriterionStatus, EligibilityCriterion, ProgramEligibility,
    ProgramTerms,
};
pub use report::BankabilityReport;
