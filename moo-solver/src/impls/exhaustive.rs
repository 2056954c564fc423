use moo_core::{
    models::{BinaryProgram, Selection},
    ports::Solver,
};
use thiserror::Error;

/// An exact solver that tries every 0/1 assignment.
///
/// Only viable for a handful of variables, but trivially correct, which makes
/// it the reference the other solvers are checked against.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSolver {
    max_variables: usize,
}

impl ExhaustiveSolver {
    /// The largest program the default instance will enumerate
    pub const DEFAULT_MAX_VARIABLES: usize = 20;

    /// Create a solver that refuses programs with more than `max_variables` variables
    pub fn new(max_variables: usize) -> Self {
        Self {
            max_variables: max_variables.min(usize::BITS as usize - 1),
        }
    }
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_VARIABLES)
    }
}

impl Solver for ExhaustiveSolver {
    type Error = ExhaustiveError;

    #[tracing::instrument(level = "debug", skip_all, fields(variables = program.len()))]
    fn solve(&self, program: &BinaryProgram) -> Result<Option<Selection>, Self::Error> {
        let n = program.len();
        if n > self.max_variables {
            return Err(ExhaustiveError::TooLarge {
                variables: n,
                max: self.max_variables,
            });
        }

        let mut best: Option<(f64, Vec<bool>)> = None;
        let mut values = vec![false; n];
        for mask in 0..(1usize << n) {
            for (bit, value) in values.iter_mut().enumerate() {
                *value = mask & (1 << bit) != 0;
            }
            if !program.is_feasible(&values) {
                continue;
            }
            let objective = program.evaluate(&values);
            // Strict improvement only, so the first optimum found is kept
            if best.as_ref().is_none_or(|(incumbent, _)| objective > *incumbent) {
                best = Some((objective, values.clone()));
            }
        }

        Ok(best.map(|(_, values)| Selection::new(program, values)))
    }
}

/// The ways enumeration can refuse a program
#[derive(Debug, Error, PartialEq)]
pub enum ExhaustiveError {
    /// Enumerating 2^n assignments would take too long
    #[error("{variables} variables exceeds the enumeration limit of {max}")]
    TooLarge {
        /// Variables in the program
        variables: usize,
        /// The configured limit
        max: usize,
    },
}
