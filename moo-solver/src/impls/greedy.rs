use moo_core::{
    models::{BinaryProgram, Relation, Selection},
    ports::Solver,
};
use thiserror::Error;

/// A heuristic solver for packing-style programs.
///
/// Variables are visited in descending objective order (earliest index first
/// among equals). A variable is set to 1 if its coefficient is positive, or if
/// it is needed to meet an equality or lower-bound row that is still short,
/// and only when doing so keeps every row within its upper bound. The result is feasible
/// but not necessarily optimal; it runs in O(n log n + nnz) and scales to
/// populations the exact solvers cannot handle.
///
/// Constraint coefficients must be non-negative, since activity only ever
/// grows as variables are switched on.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl Solver for GreedySolver {
    type Error = GreedyError;

    #[tracing::instrument(level = "debug", skip_all, fields(variables = program.len(), constraints = program.constraints().len()))]
    fn solve(&self, program: &BinaryProgram) -> Result<Option<Selection>, Self::Error> {
        let n = program.len();

        // Transpose the rows so each variable knows which rows it touches
        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
        for (row, constraint) in program.constraints().iter().enumerate() {
            for &(idx, coef) in constraint.terms() {
                if coef < 0.0 {
                    return Err(GreedyError::NegativeCoefficient { row });
                }
                columns[idx].push((row, coef));
            }
        }

        let objective = program.objective();
        let mut order = (0..n).collect::<Vec<_>>();
        order.sort_by(|&a, &b| objective[b].total_cmp(&objective[a]).then(a.cmp(&b)));

        let constraints = program.constraints();
        let mut activity = vec![0.0; constraints.len()];
        let mut values = vec![false; n];

        for idx in order {
            let needed = columns[idx].iter().any(|&(row, coef)| {
                let constraint = &constraints[row];
                coef > 0.0
                    && matches!(constraint.relation(), Relation::Eq | Relation::GreaterEq)
                    && !constraint.is_satisfied_by(activity[row])
            });
            if objective[idx] <= 0.0 && !needed {
                continue;
            }

            let fits = columns[idx]
                .iter()
                .all(|&(row, coef)| constraints[row].within_bound(activity[row] + coef));
            if fits {
                values[idx] = true;
                for &(row, coef) in columns[idx].iter() {
                    activity[row] += coef;
                }
            }
        }

        if program.is_feasible(&values) {
            Ok(Some(Selection::new(program, values)))
        } else {
            tracing::debug!("greedy fill left a constraint unsatisfied");
            Ok(None)
        }
    }
}

/// The ways a program can be unsuitable for the greedy heuristic
#[derive(Debug, Error, PartialEq)]
pub enum GreedyError {
    /// A constraint has a negative coefficient
    #[error("constraint {row} has a negative coefficient")]
    NegativeCoefficient {
        /// The offending constraint
        row: usize,
    },
}
