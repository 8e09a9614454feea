pub mod error;
pub mod scenarios;
pub mod types;

#[cfg(feature = "stats")]
pub mod stats;

#[cfg(feature = "selection")]
pub mod selection;

pub use error::PortfolioError;
pub use types::*;

/// Standard result type for all portfolio-selector operations
pub type PortfolioResult<T> = Result<T, PortfolioError>;
