use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::PortfolioResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// One recorded price/value/dividend data point for an asset.
///
/// Observations sharing a code are chronological in insertion order, so the
/// first and last rows of a code define its buy and selling figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub code: String,
    pub price: Money,
    pub value: Money,
    pub dividend: Money,
}

impl RawObservation {
    /// Build an observation, normalising the code to its canonical
    /// trimmed, uppercase form.
    pub fn new(code: &str, price: Money, value: Money, dividend: Money) -> Self {
        Self {
            code: normalize_code(code),
            price,
            value,
            dividend,
        }
    }
}

/// Asset codes are case-insensitive; the canonical form is uppercase.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Overflow error for a named computation
pub fn overflow(context: &str) -> PortfolioError {
    PortfolioError::ArithmeticOverflow {
        context: context.to_string(),
    }
}

/// Sum that reports overflow instead of panicking.
pub fn checked_sum<I>(values: I, context: &str) -> PortfolioResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| overflow(context))
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
