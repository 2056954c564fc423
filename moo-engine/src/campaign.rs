//! Allocating at most one offer per client under one shared budget.
//!
//! This is a budget-constrained generalized assignment problem:
//!
//! maximize Σ scoreₖ·xₖ over every eligible (client, offer) pair k
//! subject to Σ xₖ ≤ 1 over each client's pairs,
//!            Σ priceₖ·xₖ ≤ total_budget,
//!            xₖ ∈ {0, 1}.
//!
//! The number of decision variables is the number of eligible pairs, so an
//! exact solve grows with population × catalog size.
//!
//! Optimal selections are often not unique, for instance when several
//! clients look identical to the model. A second solve over
//! [`tie_break_program`] picks among them, so the result does not depend on
//! which optimum a backend happens to find first.

use crate::{
    TIE_TOLERANCE,
    eligibility::eligible,
    scoring::{Score, ScoreError, ScoringFunction},
};
use moo_core::{
    models::{
        Assignment, BinaryProgram, Catalog, Client, ClientId, Constraint, Map, Offer,
        ProgramError, Selection,
    },
    ports::ScoringModel,
};
use rayon::prelude::*;

/// An eligible (client, offer) pair with its score
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The client
    pub client: &'a Client,
    /// The offer
    pub offer: &'a Offer,
    /// The pair's score under the shared budget
    pub score: Score,
}

/// Enumerate and score every eligible pair, using `total_budget` as every
/// client's effective budget.
///
/// Pairs come out in population order, then catalog order; pass the population
/// sorted by client id to get (client id, offer id) order. Eligibility is
/// checked sequentially, scoring runs in parallel since it only reads the
/// catalog and the model. Any scoring failure fails the whole call.
pub fn candidates<'a, M>(
    scoring: &ScoringFunction<M>,
    population: &[&'a Client],
    catalog: &'a Catalog,
    total_budget: f64,
) -> Result<Vec<Candidate<'a>>, ScoreError<M::Error>>
where
    M: ScoringModel + Sync,
{
    let pairs = population
        .iter()
        .flat_map(|&client| {
            catalog
                .iter()
                .filter(move |offer| eligible(offer, client, total_budget))
                .map(move |offer| (client, offer))
        })
        .collect::<Vec<_>>();

    tracing::debug!(pairs = pairs.len(), "scoring eligible campaign pairs");

    pairs
        .into_par_iter()
        .map(|(client, offer)| {
            scoring
                .score(client, offer, total_budget, catalog)
                .map(|score| Candidate {
                    client,
                    offer,
                    score,
                })
        })
        .collect()
}

/// Build the assignment program over the candidates.
///
/// Variable k corresponds to `candidates[k]` and its objective coefficient is
/// the pair's combined score.
pub fn program(
    candidates: &[Candidate<'_>],
    total_budget: f64,
) -> Result<BinaryProgram, ProgramError> {
    let objective = candidates
        .iter()
        .map(|candidate| candidate.score.combined)
        .collect();
    let mut program = BinaryProgram::new(objective)?;

    let mut by_client = Map::<ClientId, Vec<usize>>::default();
    for (k, candidate) in candidates.iter().enumerate() {
        by_client.entry(candidate.client.id).or_default().push(k);
    }
    for (_, group) in by_client {
        program.add_constraint(Constraint::leq(group.into_iter().map(|k| (k, 1.0)), 1.0))?;
    }

    program.add_constraint(Constraint::leq(
        candidates
            .iter()
            .enumerate()
            .map(|(k, candidate)| (k, candidate.offer.price)),
        total_budget,
    ))?;

    Ok(program)
}

/// Build the follow-up program that settles ties left by a first solve.
///
/// `optimum` is the total score the first solve reached over `base`. The
/// follow-up keeps every row of `base`, requires the total score to stay
/// within [`TIE_TOLERANCE`] of `optimum`, excludes pairs scoring zero or
/// less, and maximizes Σ (n − k) / n over the selected candidates. Among the
/// near-optimal selections, the one leaning on earlier (client id, offer id)
/// pairs wins. The preference weights are spaced 1/n apart.
pub fn tie_break_program(
    candidates: &[Candidate<'_>],
    base: &BinaryProgram,
    optimum: f64,
) -> Result<BinaryProgram, ProgramError> {
    let n = candidates.len();
    let preference = (0..n).map(|k| (n - k) as f64 / n as f64).collect();
    let mut program = BinaryProgram::new(preference)?;
    for constraint in base.constraints() {
        program.add_constraint(constraint.clone())?;
    }

    let (scoring, excluded): (Vec<_>, Vec<_>) = candidates
        .iter()
        .enumerate()
        .partition(|(_, candidate)| candidate.score.combined > 0.0);
    program.add_constraint(Constraint::geq(
        scoring
            .into_iter()
            .map(|(k, candidate)| (k, candidate.score.combined)),
        optimum - TIE_TOLERANCE * optimum.abs().max(1.0),
    ))?;
    if !excluded.is_empty() {
        program.add_constraint(Constraint::leq(
            excluded.into_iter().map(|(k, _)| (k, 1.0)),
            0.0,
        ))?;
    }

    Ok(program)
}

/// Turn the selected variables back into assignments, in candidate order
pub fn assignments(candidates: &[Candidate<'_>], selection: &Selection) -> Vec<Assignment> {
    selection
        .selected()
        .map(|k| {
            let Candidate {
                client,
                offer,
                score,
            } = candidates[k];
            Assignment {
                client_id: client.id,
                offer_id: offer.id,
                offer_name: offer.name.clone(),
                price: offer.price,
                category: offer.category.clone(),
                propensity: score.propensity,
                combined_score: score.combined,
            }
        })
        .collect()
}
