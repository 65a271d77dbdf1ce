pub mod pro_forma;
pub mod strength;

pub use pro_forma::{build_pro_forma, AnnualCashFlow, FinancialSummary};
pub use strength::{financial_strength_score, leverage_points};
