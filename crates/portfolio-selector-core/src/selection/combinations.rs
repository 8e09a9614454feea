//! Lexicographic k-combination enumeration and exhaustive scoring.
//!
//! The search space is C(n, k), exponential around k = n/2. Combinations are
//! generated lazily, so memory stays O(k), but every one of them is scored:
//! callers must bound `n` and `k` themselves (see [`combination_count`]).

use rust_decimal::Decimal;

use crate::error::PortfolioError;
use crate::types::*;
use crate::PortfolioResult;

use super::policy::Criterion;

/// Number of k-combinations of n items, `None` on u128 overflow.
pub fn combination_count(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // C(n, i + 1) = C(n, i) * (n - i) / (i + 1), exact at every step
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}

/// Iterator over every k-subset of `0..n`, in lexicographic index order:
/// `[0, 1], [0, 2], ..., [1, 2], ...`
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.indices.clone())
    }
}

/// The slice of an asset summary the exhaustive search needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub asset: &'a str,
    pub expected_return: Rate,
    pub effective_return: Rate,
}

/// Winning combination of an exhaustive search
#[derive(Debug, Clone, PartialEq)]
pub struct BestCombination {
    /// Positions into the candidate slice, ascending
    pub indices: Vec<usize>,
    pub score: Rate,
    /// How many combinations were scored
    pub evaluated: u64,
}

/// Score every `size`-combination of `candidates` by the summed criterion and
/// return the best one. Ties keep the combination enumerated first.
pub fn max_combination_by(
    candidates: &[Candidate<'_>],
    size: usize,
    criterion: Criterion,
) -> PortfolioResult<BestCombination> {
    let mut best: Option<(Vec<usize>, Decimal)> = None;
    let mut evaluated: u64 = 0;

    for combination in Combinations::new(candidates.len(), size) {
        evaluated += 1;
        let score = checked_sum(
            combination.iter().map(|&i| criterion.score(&candidates[i])),
            "combination score",
        )?;

        let improves = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if improves {
            best = Some((combination, score));
        }
    }

    match best {
        Some((indices, score)) => Ok(BestCombination {
            indices,
            score,
            evaluated,
        }),
        None => Err(PortfolioError::NoValidCombination(format!(
            "no combination of {size} from {} assets",
            candidates.len()
        ))),
    }
}
