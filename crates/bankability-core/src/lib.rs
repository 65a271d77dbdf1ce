pub mod assessment;
pub mod config;
pub mod credit;
pub mod display;
pub mod error;
pub mod financial;
pub mod params;
pub mod rubrics;
pub mod scoring;
pub mod time_value;
pub mod types;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "techno_economic")]
pub mod techno_economic;

#[cfg(feature = "financing")]
pub mod financing;

pub use error::BankabilityError;
pub use params::ProjectParameters;
pub use types::*;

/// Standard result type for all bankability operations
pub type CoreResult<T> = Result<T, BankabilityError>;
