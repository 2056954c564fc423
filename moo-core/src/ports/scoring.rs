use crate::models::FeatureVector;

/// A fitted classifier estimating the probability a client accepts an offer.
///
/// The engine treats the model as opaque: it knows nothing of how it was
/// trained, only that it maps a [`FeatureVector`] to a probability. A model
/// that cannot produce an estimate must say so through `Error` rather than
/// fall back to a default, since a fabricated propensity would silently
/// corrupt the optimization objective.
pub trait ScoringModel {
    /// Error type for inference failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Estimate the acceptance probability, expected to lie in [0, 1]
    fn predict_propensity(&self, features: &FeatureVector) -> Result<f64, Self::Error>;
}

impl<T: ScoringModel + ?Sized> ScoringModel for &T {
    type Error = T::Error;

    fn predict_propensity(&self, features: &FeatureVector) -> Result<f64, Self::Error> {
        (**self).predict_propensity(features)
    }
}
