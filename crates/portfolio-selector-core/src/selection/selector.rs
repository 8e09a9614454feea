use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PortfolioError;
use crate::stats::AssetSummary;
use crate::types::*;
use crate::PortfolioResult;

use super::combinations::{combination_count, max_combination_by, Candidate};
use super::policy::{Criterion, SelectionPolicy};

/// A chosen portfolio: distinct summaries, no asset twice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSelection {
    pub policy: SelectionPolicy,
    pub assets: Vec<AssetSummary>,
    pub total_expected_return: Rate,
    pub total_effective_return: Rate,
    /// Combinations scored to reach this result; zero for random picks and
    /// for the whole-universe short-circuit
    pub combinations_evaluated: u64,
}

impl PortfolioSelection {
    fn new(
        policy: SelectionPolicy,
        assets: Vec<AssetSummary>,
        combinations_evaluated: u64,
    ) -> PortfolioResult<Self> {
        let total_expected_return = checked_sum(
            assets.iter().map(|a| a.expected_return),
            "portfolio expected return",
        )?;
        let total_effective_return = checked_sum(
            assets.iter().map(|a| a.effective_return),
            "portfolio effective return",
        )?;
        Ok(Self {
            policy,
            assets,
            total_expected_return,
            total_effective_return,
            combinations_evaluated,
        })
    }

    pub fn codes(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.asset.as_str()).collect()
    }
}

/// Picks fixed-size portfolios out of a frozen, ordered set of summaries.
///
/// The summary order is the canonical enumeration order: exhaustive policies
/// walk combinations lexicographically by position and keep the first best,
/// so reordering the input can change which of two equal portfolios wins.
#[derive(Debug, Clone)]
pub struct PortfolioSelector {
    summaries: Vec<AssetSummary>,
}

impl PortfolioSelector {
    pub fn new(summaries: Vec<AssetSummary>) -> Self {
        Self { summaries }
    }

    pub fn summaries(&self) -> &[AssetSummary] {
        &self.summaries
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Run `policy`; `rng` is only drawn from by the random policy.
    pub fn select<R: Rng + ?Sized>(
        &self,
        policy: SelectionPolicy,
        portfolio_size: usize,
        rng: &mut R,
    ) -> PortfolioResult<PortfolioSelection> {
        match policy.criterion() {
            None => self.select_random(portfolio_size, rng),
            Some(criterion) => self.select_exhaustive(policy, portfolio_size, criterion),
        }
    }

    /// Uniform sample of `portfolio_size` distinct summaries, without
    /// replacement. Result order carries no meaning.
    pub fn select_random<R: Rng + ?Sized>(
        &self,
        portfolio_size: usize,
        rng: &mut R,
    ) -> PortfolioResult<PortfolioSelection> {
        self.validate_size(portfolio_size)?;

        let assets: Vec<AssetSummary> = self
            .summaries
            .choose_multiple(rng, portfolio_size)
            .cloned()
            .collect();

        let selection = PortfolioSelection::new(SelectionPolicy::Random, assets, 0)?;
        info!(policy = "random", assets = ?selection.codes(), "portfolio selected");
        Ok(selection)
    }

    /// Best portfolio by summed expected return, found by scoring all
    /// C(N, portfolio_size) combinations.
    pub fn select_brute_force(&self, portfolio_size: usize) -> PortfolioResult<PortfolioSelection> {
        self.select_exhaustive(SelectionPolicy::BruteForce, portfolio_size, Criterion::ExpectedReturn)
    }

    /// Best portfolio by summed effective return. Same exhaustive search as
    /// [`PortfolioSelector::select_brute_force`], different objective.
    pub fn select_greedy(&self, portfolio_size: usize) -> PortfolioResult<PortfolioSelection> {
        self.select_exhaustive(SelectionPolicy::Greedy, portfolio_size, Criterion::EffectiveReturn)
    }

    fn select_exhaustive(
        &self,
        policy: SelectionPolicy,
        portfolio_size: usize,
        criterion: Criterion,
    ) -> PortfolioResult<PortfolioSelection> {
        self.validate_size(portfolio_size)?;

        if portfolio_size == self.summaries.len() {
            debug!(policy = %policy, "portfolio spans every asset, skipping search");
            return PortfolioSelection::new(policy, self.summaries.clone(), 0);
        }

        let candidates: Vec<Candidate<'_>> = self
            .summaries
            .iter()
            .map(|s| Candidate {
                asset: &s.asset,
                expected_return: s.expected_return,
                effective_return: s.effective_return,
            })
            .collect();

        debug!(
            policy = %policy,
            assets = candidates.len(),
            portfolio_size,
            combinations = ?combination_count(candidates.len(), portfolio_size),
            "enumerating combinations"
        );

        let best = max_combination_by(&candidates, portfolio_size, criterion)?;
        let assets = best
            .indices
            .iter()
            .map(|&i| self.summaries[i].clone())
            .collect();

        let selection = PortfolioSelection::new(policy, assets, best.evaluated)?;
        info!(
            policy = %policy,
            assets = ?selection.codes(),
            score = %best.score,
            evaluated = best.evaluated,
            "portfolio selected"
        );
        Ok(selection)
    }

    fn validate_size(&self, portfolio_size: usize) -> PortfolioResult<()> {
        if portfolio_size == 0 || portfolio_size > self.summaries.len() {
            return Err(PortfolioError::InvalidPortfolioSize {
                requested: portfolio_size,
                available: self.summaries.len(),
            });
        }
        Ok(())
    }
}
