//! Choosing exactly one offer for one client.

use crate::{OptimizeError, TIE_TOLERANCE};
use moo_core::{
    models::{BinaryProgram, Constraint, Offer},
    ports::Solver,
};

/// Choose the best of the scored candidates.
///
/// The choice is posed as maximize Σ scoreᵢ·xᵢ subject to Σ xᵢ = 1, so that it
/// runs through the same solver machinery as campaigns. Whatever optimum the
/// solver lands on, the result is then resolved to the lowest offer id among
/// the candidates scoring within [`TIE_TOLERANCE`] of it, which keeps the
/// answer independent of the solver backend.
///
/// An empty candidate list is a normal outcome and yields `None`.
pub fn select_offer<'o, S: Solver>(
    solver: &S,
    candidates: &[(&'o Offer, f64)],
) -> Result<Option<&'o Offer>, OptimizeError<S::Error>> {
    if candidates.is_empty() {
        return Ok(None);
    }

    let mut program = BinaryProgram::new(candidates.iter().map(|&(_, score)| score).collect())?;
    program.add_constraint(Constraint::eq(
        (0..candidates.len()).map(|idx| (idx, 1.0)),
        1.0,
    ))?;

    let Some(selection) = solver.solve(&program).map_err(OptimizeError::Solver)? else {
        tracing::warn!(
            candidates = candidates.len(),
            "solver found no feasible single-offer selection"
        );
        return Ok(None);
    };
    let Some(chosen) = selection.selected().next() else {
        return Ok(None);
    };

    let best = candidates[chosen].1;
    Ok(candidates
        .iter()
        .filter(|&&(_, score)| score >= best - TIE_TOLERANCE)
        .min_by_key(|&&(offer, _)| offer.id)
        .map(|&(offer, _)| offer))
}
