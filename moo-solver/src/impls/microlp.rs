use good_lp::{
    Expression, ResolutionError, Solution, SolverModel, Variable, solvers::microlp::microlp,
    variable, variables,
};
use moo_core::{
    models::{BinaryProgram, Relation, Selection},
    ports::Solver,
};
use thiserror::Error;

/// An exact solver that hands the program to microlp, a pure-Rust
/// simplex-based branch-and-bound implementation, through good_lp.
///
/// The solve cost grows with the number of decision variables; this is the
/// price of a provable optimum. For programs too large to solve exactly, use
/// [`GreedySolver`](crate::greedy::GreedySolver) instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    type Error = MicrolpError;

    #[tracing::instrument(level = "debug", skip_all, fields(variables = program.len(), constraints = program.constraints().len()))]
    fn solve(&self, program: &BinaryProgram) -> Result<Option<Selection>, Self::Error> {
        // good_lp is not fond of variable-free models, but there is nothing to
        // decide anyway: only the constraints themselves can fail.
        if program.is_empty() {
            return Ok(program
                .is_feasible(&[])
                .then(|| Selection::new(program, Vec::new())));
        }

        let mut vars = variables!();
        let x = (0..program.len())
            .map(|_| vars.add(variable().binary()))
            .collect::<Vec<Variable>>();

        let mut objective = Expression::with_capacity(program.len());
        for (&coef, &var) in program.objective().iter().zip(x.iter()) {
            objective.add_mul(coef, var);
        }

        let mut model = vars.maximise(objective).using(microlp);
        for constraint in program.constraints() {
            let mut lhs = Expression::with_capacity(constraint.terms().len());
            for &(idx, coef) in constraint.terms() {
                lhs.add_mul(coef, x[idx]);
            }
            model = model.with(match constraint.relation() {
                Relation::LessEq => lhs.leq(constraint.rhs()),
                Relation::Eq => lhs.eq(constraint.rhs()),
                Relation::GreaterEq => lhs.geq(constraint.rhs()),
            });
        }

        let solution = match model.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => {
                tracing::debug!("program is infeasible");
                return Ok(None);
            }
            Err(error) => return Err(MicrolpError::Resolution(error)),
        };

        // Binary variables come back as floats; anything past the midpoint is a 1.
        let values = x
            .iter()
            .map(|&var| solution.value(var) > 0.5)
            .collect::<Vec<_>>();

        if !program.is_feasible(&values) {
            return Err(MicrolpError::Rounding);
        }

        let selection = Selection::new(program, values);
        tracing::debug!(objective = selection.objective(), "program solved");
        Ok(Some(selection))
    }
}

/// The ways the microlp backend can fail to reach a verdict
#[derive(Debug, Error)]
pub enum MicrolpError {
    /// The backend reported something other than optimality or infeasibility
    #[error("microlp failed: {0}")]
    Resolution(#[from] ResolutionError),
    /// Rounding the relaxed values to 0/1 broke a constraint
    #[error("rounded solution violates a constraint")]
    Rounding,
}
