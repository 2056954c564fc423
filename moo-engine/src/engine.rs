use crate::{
    OptimizeError, campaign,
    eligibility::eligible,
    scoring::{ScoreError, ScoringFunction, ScoringWeights},
    single,
};
use moo_core::{
    models::{Assignment, BinaryProgram, Catalog, Client, ClientId, Offer, OfferId},
    ports::{ScoringModel, Solver},
};
use thiserror::Error;

/// The two caller-facing selection operations, over one catalog.
///
/// The engine owns its catalog, scoring model, and solver, and never mutates
/// any of them, so a shared reference can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct RecommendationEngine<M, S> {
    catalog: Catalog,
    scoring: ScoringFunction<M>,
    solver: S,
}

impl<M: ScoringModel, S: Solver> RecommendationEngine<M, S> {
    /// Create an engine scoring with the default weights
    pub fn new(catalog: Catalog, model: M, solver: S) -> Self {
        Self::with_weights(catalog, model, solver, ScoringWeights::default())
    }

    /// Create an engine scoring with the given weights
    pub fn with_weights(catalog: Catalog, model: M, solver: S, weights: ScoringWeights) -> Self {
        Self {
            catalog,
            scoring: ScoringFunction::new(model, weights),
            solver,
        }
    }

    /// The catalog offers are selected from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Pick the single best offer for `client`, or None if nothing is eligible.
    ///
    /// Eligibility and price normalization use the client's own budget. A zero
    /// budget has nothing to normalize against and yields None; a negative or
    /// non-finite budget is an error.
    #[tracing::instrument(level = "debug", skip_all, fields(client = %client.id))]
    pub fn recommend_single(
        &self,
        client: &Client,
    ) -> Result<Option<&Offer>, EngineError<M::Error, S::Error>> {
        let budget = client.budget;
        if !(budget.is_finite() && budget >= 0.0) {
            return Err(EngineError::InvalidBudget(budget));
        }
        if budget == 0.0 {
            tracing::debug!("client has no budget");
            return Ok(None);
        }

        let candidates = self
            .catalog
            .iter()
            .filter(|offer| eligible(offer, client, budget))
            .map(|offer| {
                self.scoring
                    .score(client, offer, budget, &self.catalog)
                    .map(|score| (offer, score.combined))
            })
            .collect::<Result<Vec<_>, ScoreError<M::Error>>>()?;

        tracing::debug!(eligible = candidates.len(), "scored eligible offers");

        let chosen = single::select_offer(&self.solver, &candidates)?;
        match chosen {
            Some(offer) => tracing::info!(offer = %offer.id, "offer selected"),
            None => tracing::info!("no eligible offer"),
        }
        Ok(chosen)
    }
}

impl<M: ScoringModel + Sync, S: Solver> RecommendationEngine<M, S> {
    /// Allocate at most one offer per client within `total_budget`,
    /// maximizing the total combined score.
    ///
    /// Every client is filtered and scored against `total_budget`; their own
    /// budgets are ignored. Assignments come back ordered by client id. An
    /// empty list is returned when nothing is eligible, the budget is zero, or
    /// no selection fits. A negative or non-finite budget, or a client id
    /// appearing twice, is an error.
    #[tracing::instrument(level = "debug", skip_all, fields(clients = clients.len(), total_budget = total_budget))]
    pub fn optimize_campaign(
        &self,
        clients: &[Client],
        total_budget: f64,
    ) -> Result<Vec<Assignment>, EngineError<M::Error, S::Error>> {
        let population = population(clients, total_budget)?;
        if total_budget == 0.0 {
            tracing::info!("campaign budget is zero");
            return Ok(Vec::new());
        }

        let candidates =
            campaign::candidates(&self.scoring, &population, &self.catalog, total_budget)?;
        if candidates.is_empty() {
            tracing::warn!("no eligible (client, offer) pairs");
            return Ok(Vec::new());
        }

        let program = campaign::program(&candidates, total_budget)
            .map_err(OptimizeError::<S::Error>::from)?;
        tracing::debug!(
            variables = program.len(),
            constraints = program.constraints().len(),
            "solving campaign program"
        );

        let Some(selection) = self
            .solver
            .solve(&program)
            .map_err(OptimizeError::Solver)?
        else {
            tracing::warn!("solver found no feasible campaign selection");
            return Ok(Vec::new());
        };

        let tie_break = campaign::tie_break_program(&candidates, &program, selection.objective())
            .map_err(OptimizeError::<S::Error>::from)?;
        let selection = match self
            .solver
            .solve(&tie_break)
            .map_err(OptimizeError::Solver)?
        {
            Some(settled) => settled,
            None => {
                tracing::debug!("tie-break solve found nothing, keeping the first selection");
                selection
            }
        };

        let assignments = campaign::assignments(&candidates, &selection);
        tracing::info!(
            assigned = assignments.len(),
            spent = assignments.iter().map(|a| a.price).sum::<f64>(),
            "campaign optimized"
        );
        Ok(assignments)
    }

    /// Build the campaign program without solving it.
    ///
    /// Variable k of the program decides whether the k-th returned (client,
    /// offer) pair is selected. Pairs are ordered by client id, then offer id.
    #[allow(clippy::type_complexity)]
    pub fn campaign_program(
        &self,
        clients: &[Client],
        total_budget: f64,
    ) -> Result<(Vec<(ClientId, OfferId)>, BinaryProgram), EngineError<M::Error, S::Error>> {
        let population = population(clients, total_budget)?;
        let candidates = if total_budget == 0.0 {
            Vec::new()
        } else {
            campaign::candidates(&self.scoring, &population, &self.catalog, total_budget)?
        };
        let program = campaign::program(&candidates, total_budget)
            .map_err(OptimizeError::<S::Error>::from)?;
        let pairs = candidates
            .iter()
            .map(|candidate| (candidate.client.id, candidate.offer.id))
            .collect();
        Ok((pairs, program))
    }
}

/// Validate the campaign budget and order the clients by id
fn population<ME, SE>(
    clients: &[Client],
    total_budget: f64,
) -> Result<Vec<&Client>, EngineError<ME, SE>> {
    if !(total_budget.is_finite() && total_budget >= 0.0) {
        return Err(EngineError::InvalidBudget(total_budget));
    }
    let mut population = clients.iter().collect::<Vec<_>>();
    population.sort_by_key(|client| client.id);
    if let Some(pair) = population.windows(2).find(|pair| pair[0].id == pair[1].id) {
        return Err(EngineError::DuplicateClient(pair[0].id));
    }
    Ok(population)
}

/// The ways a selection request can fail
#[derive(Debug, Error)]
pub enum EngineError<ME, SE> {
    /// A pair could not be scored
    #[error(transparent)]
    Score(#[from] ScoreError<ME>),
    /// The optimization program could not be built or solved
    #[error(transparent)]
    Optimize(#[from] OptimizeError<SE>),
    /// The budget is negative, NaN, or infinite
    #[error("budget {0} must be finite and non-negative")]
    InvalidBudget(f64),
    /// The population lists a client id more than once
    #[error("client {0} appears more than once in the population")]
    DuplicateClient(ClientId),
}
