mod directory;
mod scoring;
mod solver;

pub use directory::{ClientDirectory, OfferSource};
pub use scoring::ScoringModel;
pub use solver::Solver;
