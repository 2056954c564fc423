//! The value function optimized by both selection modes.
//!
//! combined = w₁·propensity + w₂·(profit / max_profit) + w₃·(1 − price / budget)
//!
//! With the default weights (0.5, 0.3, 0.2) and a price that already passed
//! eligibility (price ≤ budget), the price term stays within [0, 0.2].

use moo_core::{
    models::{Catalog, Client, ClientId, FeatureVector, Offer, OfferId},
    ports::ScoringModel,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The weights blending propensity, normalized profit, and price headroom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoringWeights", into = "RawScoringWeights")]
pub struct ScoringWeights {
    propensity: f64,
    profit: f64,
    price: f64,
}

impl ScoringWeights {
    /// Create a set of weights, each of which must be finite and non-negative
    pub fn new(propensity: f64, profit: f64, price: f64) -> Result<Self, WeightError> {
        for (name, value) in [
            ("propensity", propensity),
            ("profit", profit),
            ("price", price),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(WeightError { name, value });
            }
        }
        Ok(Self {
            propensity,
            profit,
            price,
        })
    }

    /// Weight on the model propensity
    pub fn propensity(&self) -> f64 {
        self.propensity
    }

    /// Weight on the profit normalized by the catalog maximum
    pub fn profit(&self) -> f64 {
        self.profit
    }

    /// Weight on the unspent share of the effective budget
    pub fn price(&self) -> f64 {
        self.price
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            propensity: default_propensity(),
            profit: default_profit(),
            price: default_price(),
        }
    }
}

fn default_propensity() -> f64 {
    0.5
}

fn default_profit() -> f64 {
    0.3
}

fn default_price() -> f64 {
    0.2
}

#[derive(Serialize, Deserialize)]
struct RawScoringWeights {
    #[serde(default = "default_propensity")]
    propensity: f64,
    #[serde(default = "default_profit")]
    profit: f64,
    #[serde(default = "default_price")]
    price: f64,
}

impl TryFrom<RawScoringWeights> for ScoringWeights {
    type Error = WeightError;

    fn try_from(value: RawScoringWeights) -> Result<Self, Self::Error> {
        Self::new(value.propensity, value.profit, value.price)
    }
}

impl From<ScoringWeights> for RawScoringWeights {
    fn from(value: ScoringWeights) -> Self {
        Self {
            propensity: value.propensity,
            profit: value.profit,
            price: value.price,
        }
    }
}

/// A weight that is negative, NaN, or infinite
#[derive(Debug, Error, PartialEq)]
#[error("{name} weight must be finite and non-negative, got {value}")]
pub struct WeightError {
    name: &'static str,
    value: f64,
}

/// The score of one (client, offer) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// The model's acceptance probability
    pub propensity: f64,
    /// The blended objective value
    pub combined: f64,
}

/// Scores (client, offer) pairs with a scoring model and a set of weights.
#[derive(Debug, Clone)]
pub struct ScoringFunction<M> {
    model: M,
    weights: ScoringWeights,
}

impl<M: ScoringModel> ScoringFunction<M> {
    /// Score with the given model and weights
    pub fn new(model: M, weights: ScoringWeights) -> Self {
        Self { model, weights }
    }

    /// The underlying scoring model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The blend weights
    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Score offering `offer` to `client`, normalizing price by `effective_budget`.
    ///
    /// The catalog supplies the profit normalization, so it must be non-empty
    /// with a positive maximum profit. Model failures and propensities outside
    /// [0, 1] are returned as errors, never replaced by a default.
    pub fn score(
        &self,
        client: &Client,
        offer: &Offer,
        effective_budget: f64,
        catalog: &Catalog,
    ) -> Result<Score, ScoreError<M::Error>> {
        if !(effective_budget.is_finite() && effective_budget > 0.0) {
            return Err(ScoreError::InvalidBudget(effective_budget));
        }
        let max_profit = catalog.max_profit().ok_or(ScoreError::EmptyCatalog)?;
        if !(max_profit.is_finite() && max_profit > 0.0) {
            return Err(ScoreError::NonPositiveMaxProfit(max_profit));
        }

        let features = FeatureVector::cold(client, offer);
        let propensity =
            self.model
                .predict_propensity(&features)
                .map_err(|source| ScoreError::Model {
                    client: client.id,
                    offer: offer.id,
                    source,
                })?;
        if !(0.0..=1.0).contains(&propensity) {
            return Err(ScoreError::InvalidPropensity {
                client: client.id,
                offer: offer.id,
                value: propensity,
            });
        }

        let normalized_price = offer.price / effective_budget;
        let normalized_profit = offer.estimated_profit / max_profit;
        let combined = self.weights.propensity * propensity
            + self.weights.profit * normalized_profit
            + self.weights.price * (1.0 - normalized_price);

        Ok(Score {
            propensity,
            combined,
        })
    }
}

/// The ways scoring a pair can fail
#[derive(Debug, Error)]
pub enum ScoreError<E> {
    /// There is no maximum profit to normalize against
    #[error("cannot score against an empty catalog")]
    EmptyCatalog,
    /// Normalizing by the maximum profit would divide by zero or flip signs
    #[error("catalog maximum profit {0} is not positive")]
    NonPositiveMaxProfit(f64),
    /// The effective budget cannot normalize a price
    #[error("effective budget {0} must be finite and positive")]
    InvalidBudget(f64),
    /// The scoring model failed to produce an estimate
    #[error("scoring model failed for client {client}, offer {offer}")]
    Model {
        /// The client being scored
        client: ClientId,
        /// The offer being scored
        offer: OfferId,
        /// The model's error
        #[source]
        source: E,
    },
    /// The scoring model produced something that is not a probability
    #[error("scoring model returned {value} for client {client}, offer {offer}")]
    InvalidPropensity {
        /// The client being scored
        client: ClientId,
        /// The offer being scored
        offer: OfferId,
        /// The returned value
        value: f64,
    },
}
