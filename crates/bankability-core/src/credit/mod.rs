pub mod risk;
pub mod tables;

pub use risk::{assess, CreditAssessment, Mitigant, MitigantStrength, RiskFactor, Severity};
pub use tables::RiskCategory;
