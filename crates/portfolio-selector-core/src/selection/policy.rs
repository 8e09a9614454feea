use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PortfolioError;
use crate::types::*;

use super::combinations::Candidate;

/// Field an exhaustive search maximises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    ExpectedReturn,
    EffectiveReturn,
}

impl Criterion {
    pub fn score(&self, candidate: &Candidate<'_>) -> Rate {
        match self {
            Criterion::ExpectedReturn => candidate.expected_return,
            Criterion::EffectiveReturn => candidate.effective_return,
        }
    }
}

/// Portfolio selection policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Uniform sample without replacement
    Random,
    /// Exhaustive search maximising summed expected return
    BruteForce,
    /// Exhaustive search maximising summed effective return.
    ///
    /// Not an incremental heuristic: it scores the same combination universe
    /// as `BruteForce`, only under a different criterion.
    Greedy,
}

impl SelectionPolicy {
    pub const ALL: [SelectionPolicy; 3] = [
        SelectionPolicy::Random,
        SelectionPolicy::BruteForce,
        SelectionPolicy::Greedy,
    ];

    /// Criterion for the exhaustive policies, `None` for random
    pub fn criterion(&self) -> Option<Criterion> {
        match self {
            SelectionPolicy::Random => None,
            SelectionPolicy::BruteForce => Some(Criterion::ExpectedReturn),
            SelectionPolicy::Greedy => Some(Criterion::EffectiveReturn),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::Random => "random",
            SelectionPolicy::BruteForce => "brute_force",
            SelectionPolicy::Greedy => "greedy",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "random" => Ok(SelectionPolicy::Random),
            "brute_force" => Ok(SelectionPolicy::BruteForce),
            "greedy" => Ok(SelectionPolicy::Greedy),
            other => Err(PortfolioError::InvalidInput {
                field: "policy".into(),
                reason: format!("Unknown policy '{other}'. Use: random, brute_force, greedy"),
            }),
        }
    }
}
