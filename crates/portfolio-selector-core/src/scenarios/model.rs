use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;
use crate::types::*;
use crate::PortfolioResult;

const OPTIMISTIC_PROBABILITY: Rate = dec!(0.30);
const REGULAR_PROBABILITY: Rate = dec!(0.40);
const PESSIMISTIC_PROBABILITY: Rate = dec!(0.30);

/// The regular scenario anchors the others: optimistic earns 15% more,
/// pessimistic loses a quarter of the regular return.
const REGULAR_MULTIPLIER: Decimal = dec!(1.00);
const OPTIMISTIC_MULTIPLIER: Decimal = dec!(1.15);
const PESSIMISTIC_MULTIPLIER: Decimal = dec!(-0.25);

const PROBABILITY_TOLERANCE: Decimal = dec!(0.001);

/// A named macro outcome with its probability and return multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub probability: Rate,
    pub multiplier: Decimal,
}

impl Scenario {
    pub fn new(name: &str, probability: Rate, multiplier: Decimal) -> Self {
        Self {
            name: name.to_string(),
            probability,
            multiplier,
        }
    }
}

/// One scenario's share of an expected return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReturn {
    pub name: String,
    pub probability: Rate,
    pub multiplier: Decimal,
    /// effective_return * multiplier * probability
    pub contribution: Rate,
}

/// Immutable table of scenarios used to project effective returns.
///
/// Constructed once and handed to the stats engine; validation happens in
/// [`ScenarioModel::new`] and on deserialisation, so a model in hand always
/// has probabilities in `[0, 1]` summing to 1 and a weighted multiplier
/// that fits in a `Decimal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scenario>", into = "Vec<Scenario>")]
pub struct ScenarioModel {
    scenarios: Vec<Scenario>,
}

impl ScenarioModel {
    pub fn new(scenarios: Vec<Scenario>) -> PortfolioResult<Self> {
        if scenarios.is_empty() {
            return Err(PortfolioError::InvalidInput {
                field: "scenarios".into(),
                reason: "At least one scenario required".into(),
            });
        }

        for s in &scenarios {
            if s.probability < Decimal::ZERO || s.probability > Decimal::ONE {
                return Err(PortfolioError::InvalidInput {
                    field: format!("scenario:{} probability", s.name),
                    reason: "Probability must be between 0 and 1".into(),
                });
            }
        }

        let total_prob: Decimal = scenarios.iter().map(|s| s.probability).sum();
        if (total_prob - Decimal::ONE).abs() > PROBABILITY_TOLERANCE {
            return Err(PortfolioError::InvalidInput {
                field: "probabilities".into(),
                reason: format!("Probabilities must sum to 1.0 (got {total_prob})"),
            });
        }

        let weighted = scenarios.iter().try_fold(Decimal::ZERO, |acc, s| {
            acc.checked_add(s.probability.checked_mul(s.multiplier)?)
        });
        if weighted.is_none() {
            return Err(PortfolioError::InvalidInput {
                field: "multipliers".into(),
                reason: "Probability-weighted multiplier overflows".into(),
            });
        }

        Ok(Self { scenarios })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Probability-weighted sum of the scenario multipliers
    pub fn weighted_multiplier(&self) -> Decimal {
        self.scenarios
            .iter()
            .map(|s| s.probability * s.multiplier)
            .sum()
    }

    /// Linear projection of an effective return across the scenarios.
    pub fn expected_return(&self, effective_return: Rate) -> PortfolioResult<Rate> {
        effective_return
            .checked_mul(self.weighted_multiplier())
            .ok_or_else(|| overflow("expected return"))
    }

    /// Per-scenario breakdown of [`ScenarioModel::expected_return`].
    pub fn project(&self, effective_return: Rate) -> PortfolioResult<Vec<ScenarioReturn>> {
        self.scenarios
            .iter()
            .map(|s| {
                let contribution = effective_return
                    .checked_mul(s.multiplier)
                    .and_then(|r| r.checked_mul(s.probability))
                    .ok_or_else(|| overflow(&format!("scenario {} contribution", s.name)))?;
                Ok(ScenarioReturn {
                    name: s.name.clone(),
                    probability: s.probability,
                    multiplier: s.multiplier,
                    contribution,
                })
            })
            .collect()
    }
}

impl Default for ScenarioModel {
    fn default() -> Self {
        Self {
            scenarios: vec![
                Scenario::new("optimistic", OPTIMISTIC_PROBABILITY, OPTIMISTIC_MULTIPLIER),
                Scenario::new("regular", REGULAR_PROBABILITY, REGULAR_MULTIPLIER),
                Scenario::new("pessimistic", PESSIMISTIC_PROBABILITY, PESSIMISTIC_MULTIPLIER),
            ],
        }
    }
}

impl TryFrom<Vec<Scenario>> for ScenarioModel {
    type Error = PortfolioError;

    fn try_from(scenarios: Vec<Scenario>) -> Result<Self, Self::Error> {
        ScenarioModel::new(scenarios)
    }
}

impl From<ScenarioModel> for Vec<Scenario> {
    fn from(model: ScenarioModel) -> Self {
        model.scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weighted_multiplier() {
        // 0.3*1.15 + 0.4*1.0 + 0.3*(-0.25) = 0.345 + 0.4 - 0.075
        let model = ScenarioModel::default();
        assert_eq!(model.weighted_multiplier(), dec!(0.67));
    }

    #[test]
    fn test_default_probabilities_sum_to_one() {
        let model = ScenarioModel::default();
        let total: Decimal = model.scenarios().iter().map(|s| s.probability).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_expected_return_is_linear() {
        let model = ScenarioModel::default();
        assert_eq!(model.expected_return(dec!(0.3)).unwrap(), dec!(0.201));
        assert_eq!(model.expected_return(Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(model.expected_return(dec!(-0.1)).unwrap(), dec!(-0.067));
    }

    #[test]
    fn test_projection_sums_to_expected_return() {
        let model = ScenarioModel::default();
        let parts = model.project(dec!(0.3)).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].contribution, dec!(0.1035));
        assert_eq!(parts[2].contribution, dec!(-0.0225));
        let total: Decimal = parts.iter().map(|p| p.contribution).sum();
        assert_eq!(total, dec!(0.201));
    }

    #[test]
    fn test_probabilities_must_sum_to_one() {
        let result = ScenarioModel::new(vec![
            Scenario::new("a", dec!(0.30), dec!(1)),
            Scenario::new("b", dec!(0.30), dec!(1)),
        ]);
        assert!(matches!(result, Err(PortfolioError::InvalidInput { .. })));
    }

    #[test]
    fn test_probability_out_of_range() {
        let result = ScenarioModel::new(vec![
            Scenario::new("a", dec!(1.5), dec!(1)),
            Scenario::new("b", dec!(-0.5), dec!(1)),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_expected_return_overflow_is_an_error() {
        let model = ScenarioModel::new(vec![Scenario::new("double", dec!(1), dec!(2))]).unwrap();
        assert!(matches!(
            model.expected_return(Decimal::MAX),
            Err(PortfolioError::ArithmeticOverflow { .. })
        ));
        assert!(model.project(Decimal::MAX).is_err());
    }

    #[test]
    fn test_overflowing_multipliers_rejected() {
        let result = ScenarioModel::new(vec![
            // within the probability tolerance, but 1.001 * MAX does not fit
            Scenario::new("a", dec!(0.5005), Decimal::MAX),
            Scenario::new("b", dec!(0.5005), Decimal::MAX),
        ]);
        assert!(matches!(result, Err(PortfolioError::InvalidInput { .. })));
    }

    #[test]
    fn test_empty_model_rejected() {
        assert!(ScenarioModel::new(vec![]).is_err());
    }

    #[test]
    fn test_substitute_model() {
        let model = ScenarioModel::new(vec![Scenario::new("flat", dec!(1), dec!(0.5))]).unwrap();
        assert_eq!(model.expected_return(dec!(0.2)).unwrap(), dec!(0.1));
    }

    #[test]
    fn test_deserialise_validates() {
        let ok: ScenarioModel = serde_json::from_str(
            r#"[{"name":"up","probability":"0.5","multiplier":"2"},
                {"name":"down","probability":"0.5","multiplier":"0"}]"#,
        )
        .unwrap();
        assert_eq!(ok.weighted_multiplier(), dec!(1));

        let bad = serde_json::from_str::<ScenarioModel>(
            r#"[{"name":"up","probability":"0.9","multiplier":"2"}]"#,
        );
        assert!(bad.is_err());
    }
}
