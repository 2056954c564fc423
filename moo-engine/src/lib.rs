//! The decision engine for marketing offer selection.
//!
//! Two entry points are exposed through [`RecommendationEngine`]:
//!
//! - [`RecommendationEngine::recommend_single`] picks the one best offer for a
//!   client, filtering and normalizing prices against the client's own budget.
//! - [`RecommendationEngine::optimize_campaign`] picks at most one offer per
//!   client across a population, maximizing the total score while the summed
//!   prices stay within one shared budget. Every client is filtered and
//!   normalized against that shared budget, not their own.
//!
//! Both go through the same pipeline: [`eligibility`] produces candidate
//! pairs, [`scoring`] blends a model propensity with profit and price, and
//! the resulting 0/1 integer program is handed to a
//! [`Solver`](moo_core::ports::Solver).

pub mod campaign;
pub mod eligibility;
pub mod logistic;
pub mod scoring;
pub mod single;

mod engine;
pub use engine::{EngineError, RecommendationEngine};

pub use logistic::{LogisticModel, ModelError};
pub use scoring::{Score, ScoreError, ScoringFunction, ScoringWeights};

use moo_core::models::ProgramError;

/// Scores closer than this are treated as equal when breaking ties.
///
/// Single-offer selection returns the lowest offer id among the best-scoring
/// offers. Campaign selection re-solves among the selections within this
/// tolerance of the optimum, preferring earlier (client id, offer id) pairs.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// A failure while building or solving an optimization program
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError<E> {
    /// The program could not be built from the candidate scores
    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),
    /// The solver could not reach a verdict
    #[error("solver failed: {0}")]
    Solver(#[source] E),
}
