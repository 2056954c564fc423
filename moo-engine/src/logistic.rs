//! A fitted standardize-then-logit propensity model.
//!
//! Each feature is standardized as (x − mean) / scale, then combined linearly
//! and passed through the logistic function. Parameters are produced offline
//! and loaded from JSON:
//!
//! ```json
//! {
//!     "mean": [40.0, 60000.0, 5.0, 300.0, 0.0, 1.0, 1.0, 0.2, 0.0, 0.0],
//!     "scale": [12.0, 25000.0, 4.0, 250.0, 1.0, 0.8, 0.8, 0.4, 1.0, 1.0],
//!     "coefficients": [0.1, 0.4, 0.6, -0.3, 0.0, 0.05, 0.2, 0.5, 0.0, 0.0],
//!     "intercept": -0.2
//! }
//! ```
//!
//! `mean` and `scale` may be omitted for a model fit on raw features.

use moo_core::{
    models::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector},
    ports::ScoringModel,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logistic regression over standardized features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLogisticModel", into = "RawLogisticModel")]
pub struct LogisticModel {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LogisticModel {
    /// Create a model from its fitted parameters.
    ///
    /// Every slice must have one entry per feature, every value must be
    /// finite, and no scale may be zero.
    pub fn new(
        mean: &[f64],
        scale: &[f64],
        coefficients: &[f64],
        intercept: f64,
    ) -> Result<Self, ModelError> {
        let mean = parameter("mean", mean)?;
        let scale = parameter("scale", scale)?;
        let coefficients = parameter("coefficients", coefficients)?;
        if !intercept.is_finite() {
            return Err(ModelError::NonFinite {
                parameter: "intercept",
                index: 0,
            });
        }
        if let Some(index) = scale.iter().position(|&s| s == 0.0) {
            return Err(ModelError::ZeroScale(FEATURE_NAMES[index]));
        }
        Ok(Self {
            mean,
            scale,
            coefficients,
            intercept,
        })
    }

    /// A model fit on unstandardized features
    pub fn unscaled(coefficients: &[f64], intercept: f64) -> Result<Self, ModelError> {
        Self::new(
            &[0.0; FEATURE_COUNT],
            &[1.0; FEATURE_COUNT],
            coefficients,
            intercept,
        )
    }

    /// The linear predictor before the logistic link
    pub fn logit(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.to_array();
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteFeature(FEATURE_NAMES[index]));
        }
        Ok(x.iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .zip(&self.coefficients)
            .map(|(((x, mean), scale), coef)| coef * (x - mean) / scale)
            .sum::<f64>()
            + self.intercept)
    }
}

fn parameter(name: &'static str, values: &[f64]) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let array: [f64; FEATURE_COUNT] =
        values.try_into().map_err(|_| ModelError::Length {
            parameter: name,
            expected: FEATURE_COUNT,
            actual: values.len(),
        })?;
    if let Some(index) = array.iter().position(|v| !v.is_finite()) {
        return Err(ModelError::NonFinite {
            parameter: name,
            index,
        });
    }
    Ok(array)
}

impl ScoringModel for LogisticModel {
    type Error = ModelError;

    fn predict_propensity(&self, features: &FeatureVector) -> Result<f64, Self::Error> {
        let z = self.logit(features)?;
        if z.is_nan() {
            return Err(ModelError::Undefined);
        }
        // Saturates to exactly 0 or 1 for large |z|, which is still a probability
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

#[derive(Serialize, Deserialize)]
struct RawLogisticModel {
    #[serde(default)]
    mean: Option<Vec<f64>>,
    #[serde(default)]
    scale: Option<Vec<f64>>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl TryFrom<RawLogisticModel> for LogisticModel {
    type Error = ModelError;

    fn try_from(value: RawLogisticModel) -> Result<Self, Self::Error> {
        let mean = value.mean.unwrap_or_else(|| vec![0.0; FEATURE_COUNT]);
        let scale = value.scale.unwrap_or_else(|| vec![1.0; FEATURE_COUNT]);
        Self::new(&mean, &scale, &value.coefficients, value.intercept)
    }
}

impl From<LogisticModel> for RawLogisticModel {
    fn from(value: LogisticModel) -> Self {
        Self {
            mean: Some(value.mean.to_vec()),
            scale: Some(value.scale.to_vec()),
            coefficients: value.coefficients.to_vec(),
            intercept: value.intercept,
        }
    }
}

/// The ways loading or evaluating a [`LogisticModel`] can fail
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A parameter vector does not have one entry per feature
    #[error("{parameter} has {actual} entries, expected {expected}")]
    Length {
        /// The offending parameter
        parameter: &'static str,
        /// The number of features
        expected: usize,
        /// The number of entries supplied
        actual: usize,
    },
    /// A parameter holds NaN or an infinity
    #[error("{parameter}[{index}] is not finite")]
    NonFinite {
        /// The offending parameter
        parameter: &'static str,
        /// Position within the parameter
        index: usize,
    },
    /// A feature would be divided by zero during standardization
    #[error("scale for feature {0} is zero")]
    ZeroScale(&'static str),
    /// An input feature holds NaN or an infinity
    #[error("feature {0} is not finite")]
    NonFiniteFeature(&'static str),
    /// The linear predictor is undefined
    #[error("linear predictor is NaN")]
    Undefined,
}
