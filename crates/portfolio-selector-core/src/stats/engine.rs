use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use std::collections::HashMap;
use tracing::debug;

use crate::error::PortfolioError;
use crate::scenarios::ScenarioModel;
use crate::types::*;
use crate::PortfolioResult;

use super::summary::AssetSummary;

/// Groups raw observations by asset code and derives one [`AssetSummary`]
/// per code.
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    scenarios: ScenarioModel,
}

impl StatsEngine {
    pub fn new(scenarios: ScenarioModel) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &ScenarioModel {
        &self.scenarios
    }

    /// Summarise a complete batch of observations.
    ///
    /// Summaries come back in first-encountered order of their codes. That
    /// order is the canonical enumeration order used by the selection
    /// policies, so it decides tie-breaks between equal-scoring portfolios.
    ///
    /// Fails with `InsufficientData` on an empty batch or when any code has
    /// fewer than two observations, and with `DivisionByZero` when a code's
    /// first price is zero.
    pub fn summarize(&self, observations: &[RawObservation]) -> PortfolioResult<Vec<AssetSummary>> {
        if observations.is_empty() {
            return Err(PortfolioError::InsufficientData {
                context: "observation batch".into(),
                required: 1,
                available: 0,
            });
        }

        let groups = group_by_code(observations);
        let mut summaries = Vec::with_capacity(groups.len());
        for (code, rows) in groups {
            summaries.push(self.summarize_group(code, &rows)?);
        }

        debug!(
            observations = observations.len(),
            assets = summaries.len(),
            "observation batch summarised"
        );
        Ok(summaries)
    }

    fn summarize_group(&self, asset: String, rows: &[&RawObservation]) -> PortfolioResult<AssetSummary> {
        // Groups are never empty: a code only exists once a row carries it.
        let first = rows[0];
        let last = rows[rows.len() - 1];
        let n = Decimal::from(rows.len() as u64);

        let prices: Vec<Money> = rows.iter().map(|r| r.price).collect();
        let values: Vec<Money> = rows.iter().map(|r| r.value).collect();

        let total_price = checked_sum(prices.iter().copied(), &format!("total price of {asset}"))?;
        let total_value = checked_sum(values.iter().copied(), &format!("total value of {asset}"))?;
        let total_dividends = checked_sum(
            rows.iter().map(|r| r.dividend),
            &format!("total dividends of {asset}"),
        )?;

        let price_mean = total_price / n;
        let value_mean = total_value / n;

        let effective_return =
            effective_return(first.price, last.price, total_dividends, &asset)?;
        let expected_return = self.scenarios.expected_return(effective_return)?;

        let prices_variance = sample_variance(&prices, price_mean, &format!("prices of {asset}"))?;
        let values_variance = sample_variance(&values, value_mean, &format!("values of {asset}"))?;

        debug!(
            asset = %asset,
            observations = rows.len(),
            effective_return = %effective_return,
            expected_return = %expected_return,
            "asset summarised"
        );

        Ok(AssetSummary {
            observations: rows.len(),
            total_dividends,
            effective_return,
            expected_return,

            buy_price: first.price,
            selling_price: last.price,
            price_mean,
            total_price,
            prices_variance,
            prices_std_dev: std_dev(prices_variance),

            buy_value: first.value,
            selling_value: last.value,
            value_mean,
            total_value,
            values_variance,
            values_std_dev: std_dev(values_variance),

            asset,
        })
    }
}

/// Stable grouping: codes in first-seen order, rows in input order.
fn group_by_code(observations: &[RawObservation]) -> Vec<(String, Vec<&RawObservation>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&RawObservation>)> = Vec::new();

    for obs in observations {
        let code = normalize_code(&obs.code);
        match index.get(&code) {
            Some(&i) => groups[i].1.push(obs),
            None => {
                index.insert(code.clone(), groups.len());
                groups.push((code, vec![obs]));
            }
        }
    }
    groups
}

/// Realised return from buy to sell, dividends included
fn effective_return(
    buy_price: Money,
    selling_price: Money,
    total_dividends: Money,
    asset: &str,
) -> PortfolioResult<Rate> {
    if buy_price.is_zero() {
        return Err(PortfolioError::DivisionByZero {
            context: format!("effective return of {asset} (buy price is zero)"),
        });
    }
    let context = format!("effective return of {asset}");
    selling_price
        .checked_add(total_dividends)
        .and_then(|proceeds| proceeds.checked_sub(buy_price))
        .and_then(|gain| gain.checked_div(buy_price))
        .ok_or_else(|| overflow(&context))
}

/// Sample variance (n-1 denominator)
fn sample_variance(data: &[Decimal], mean: Decimal, context: &str) -> PortfolioResult<Decimal> {
    let n = data.len();
    if n < 2 {
        return Err(PortfolioError::InsufficientData {
            context: context.to_string(),
            required: 2,
            available: n,
        });
    }
    let sum_sq = data
        .iter()
        .try_fold(Decimal::ZERO, |acc, x| {
            let dev = x.checked_sub(mean)?;
            acc.checked_add(dev.checked_mul(dev)?)
        })
        .ok_or_else(|| overflow(context))?;
    Ok(sum_sq / Decimal::from((n - 1) as u64))
}

fn std_dev(variance: Decimal) -> Decimal {
    variance.sqrt().unwrap_or(Decimal::ZERO)
}
