pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortization")]
pub mod amortization;

#[cfg(feature = "property")]
pub mod property;

#[cfg(feature = "advisor")]
pub mod advisor;

#[cfg(feature = "api")]
pub mod api;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage-pro operations
pub type MortgageResult<T> = Result<T, MortgageError>;
