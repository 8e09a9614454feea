use serde::{Deserialize, Serialize};

use crate::types::*;

/// Per-asset statistics derived from the full observation history of one code.
///
/// Built once by [`crate::stats::StatsEngine::summarize`] and read-only
/// afterwards; selection policies only ever clone or borrow summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub asset: String,
    /// Number of observations the summary was derived from
    pub observations: usize,

    pub total_dividends: Money,
    pub effective_return: Rate,
    pub expected_return: Rate,

    /// Market price at the first observation
    pub buy_price: Money,
    /// Market price at the last observation
    pub selling_price: Money,
    pub price_mean: Money,
    pub total_price: Money,
    pub prices_variance: Money,
    pub prices_std_dev: Money,

    /// Appraised value at the first observation
    pub buy_value: Money,
    /// Appraised value at the last observation
    pub selling_value: Money,
    pub value_mean: Money,
    pub total_value: Money,
    pub values_variance: Money,
    pub values_std_dev: Money,
}
