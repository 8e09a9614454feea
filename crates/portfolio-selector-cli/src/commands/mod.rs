pub mod menu;
pub mod select;
pub mod summary;

use clap::Args;
use portfolio_selector_core::scenarios::ScenarioModel;
use portfolio_selector_core::selection::{
    combination_count, PortfolioSelection, PortfolioSelector, SelectionPolicy,
};
use portfolio_selector_core::stats::StatsEngine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::{info, warn};

use crate::input;

/// Where observations come from and how they are turned into a selector
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// CSV file of observations (code,price,value,dividend); "-" reads stdin
    #[arg(long, default_value = "data/data.csv", global = true)]
    pub data: String,

    /// JSON or YAML file replacing the default optimistic/regular/pessimistic scenarios
    #[arg(long, global = true)]
    pub scenarios: Option<String>,

    /// Seed for the random policy
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Refuse exhaustive searches that would score more combinations than this
    #[arg(long, default_value = "10000000", global = true)]
    pub max_combinations: u64,
}

/// Loaded observations, frozen summaries and the random source for one run
pub struct Session {
    pub source: String,
    pub observations: usize,
    /// Time spent summarising, in microseconds
    pub summarize_us: u64,
    pub scenarios: ScenarioModel,
    pub selector: PortfolioSelector,
    rng: StdRng,
    max_combinations: u128,
}

impl Session {
    pub fn open(args: &SessionArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let rows = if args.data == "-" {
            input::stdin::read_stdin_observations()?
        } else {
            input::file::read_observations(&args.data)?
        };

        let scenarios = match &args.scenarios {
            Some(path) => input::file::read_scenario_model(path)?,
            None => ScenarioModel::default(),
        };

        let start = Instant::now();
        let summaries = StatsEngine::new(scenarios.clone()).summarize(&rows)?;
        let summarize_us = start.elapsed().as_micros() as u64;
        info!(
            source = %args.data,
            observations = rows.len(),
            assets = summaries.len(),
            "observations loaded"
        );

        let rng = match args.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            source: args.data.clone(),
            observations: rows.len(),
            summarize_us,
            scenarios,
            selector: PortfolioSelector::new(summaries),
            rng,
            max_combinations: u128::from(args.max_combinations),
        })
    }

    pub fn reads_stdin(&self) -> bool {
        self.source == "-"
    }

    /// Run a policy, refusing exhaustive searches above the combination cap.
    pub fn select(
        &mut self,
        policy: SelectionPolicy,
        portfolio_size: usize,
    ) -> Result<PortfolioSelection, Box<dyn std::error::Error>> {
        let n = self.selector.len();
        if policy.criterion().is_some() && portfolio_size != n {
            let count = combination_count(n, portfolio_size);
            if count.map_or(true, |c| c > self.max_combinations) {
                warn!(policy = %policy, n, portfolio_size, "combination cap exceeded");
                return Err(format!(
                    "{policy} with {portfolio_size} of {n} assets needs {} combinations (cap {}); \
                     raise --max-combinations or choose another size",
                    count.map_or_else(|| "more than 2^128".to_string(), |c| c.to_string()),
                    self.max_combinations
                )
                .into());
            }
        }

        Ok(self.selector.select(policy, portfolio_size, &mut self.rng)?)
    }
}
