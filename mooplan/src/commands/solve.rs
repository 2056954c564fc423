use crate::{AppConfig, OfferFile, config::SolverConfig, read_json};
use clap::ValueEnum;
use moo_core::{
    models::{Assignment, BinaryProgram, Catalog, Client, ClientId, Offer, OfferId},
    ports::{OfferSource as _, Solver},
};
use moo_engine::{LogisticModel, RecommendationEngine, ScoringWeights};
use moo_solver::{exhaustive::ExhaustiveSolver, greedy::GreedySolver, microlp::MicrolpSolver};
use serde::{Deserialize, Serialize};

// This explicitly articulates the available solver backends
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverLib {
    #[default]
    Microlp,
    Exhaustive,
    Greedy,
}

/// Everything an engine is built from, loaded once per invocation
pub struct Inputs {
    pub catalog: Catalog,
    pub model: LogisticModel,
    pub weights: ScoringWeights,
}

impl Inputs {
    pub fn load(config: &AppConfig) -> anyhow::Result<Self> {
        let catalog = OfferFile(&config.data.offers).load_catalog()?;
        let model = read_json(&config.data.model)?;
        tracing::debug!(
            offers = catalog.len(),
            offers_path = %config.data.offers.display(),
            model_path = %config.data.model.display(),
            "loaded inputs"
        );
        Ok(Self {
            catalog,
            model,
            weights: config.scoring,
        })
    }

    fn engine<S: Solver>(self, solver: S) -> RecommendationEngine<LogisticModel, S> {
        RecommendationEngine::with_weights(self.catalog, self.model, solver, self.weights)
    }

    /// Build the campaign program over `clients`, without solving it
    pub fn program(
        self,
        clients: &[Client],
        budget: f64,
    ) -> anyhow::Result<(Vec<(ClientId, OfferId)>, BinaryProgram)> {
        // Building the program never consults the solver
        Ok(self
            .engine(GreedySolver)
            .campaign_program(clients, budget)?)
    }
}

// Conveniently, the configuration can also handle the particulars of calling
// into the various solver implementations
impl SolverConfig {
    pub fn recommend(&self, inputs: Inputs, client: &Client) -> anyhow::Result<Option<Offer>> {
        match self.lib {
            SolverLib::Microlp => recommend(inputs.engine(MicrolpSolver), client),
            SolverLib::Exhaustive => recommend(
                inputs.engine(ExhaustiveSolver::new(self.max_variables)),
                client,
            ),
            SolverLib::Greedy => recommend(inputs.engine(GreedySolver), client),
        }
    }

    pub fn campaign(
        &self,
        inputs: Inputs,
        clients: &[Client],
        budget: f64,
    ) -> anyhow::Result<Vec<Assignment>> {
        match self.lib {
            SolverLib::Microlp => campaign(inputs.engine(MicrolpSolver), clients, budget),
            SolverLib::Exhaustive => campaign(
                inputs.engine(ExhaustiveSolver::new(self.max_variables)),
                clients,
                budget,
            ),
            SolverLib::Greedy => campaign(inputs.engine(GreedySolver), clients, budget),
        }
    }
}

fn recommend<S: Solver>(
    engine: RecommendationEngine<LogisticModel, S>,
    client: &Client,
) -> anyhow::Result<Option<Offer>> {
    Ok(engine.recommend_single(client)?.cloned())
}

fn campaign<S: Solver>(
    engine: RecommendationEngine<LogisticModel, S>,
    clients: &[Client],
    budget: f64,
) -> anyhow::Result<Vec<Assignment>> {
    Ok(engine.optimize_campaign(clients, budget)?)
}
