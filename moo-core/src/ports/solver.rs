use crate::models::{BinaryProgram, Selection};

/// Interface for solvers of 0/1 integer programs.
///
/// A solver takes a [`BinaryProgram`] and produces an assignment of 0/1 values
/// that satisfies every constraint. Exact implementations return a maximizer
/// of the objective; heuristic implementations may return any feasible
/// assignment, trading optimality for solve time on large programs.
///
/// Infeasibility is a normal outcome and is reported as `Ok(None)`. `Error` is
/// reserved for the solver being unable to reach a verdict at all.
pub trait Solver {
    /// Error type for solver failures
    type Error: std::error::Error + Send + Sync + 'static;

    /// Solve the program, returning None when no feasible assignment exists
    fn solve(&self, program: &BinaryProgram) -> Result<Option<Selection>, Self::Error>;
}

impl<T: Solver + ?Sized> Solver for &T {
    type Error = T::Error;

    fn solve(&self, program: &BinaryProgram) -> Result<Option<Selection>, Self::Error> {
        (**self).solve(program)
    }
}
