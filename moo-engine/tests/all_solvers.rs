#![allow(unused_macros)]
use rstest_reuse::template;

// This creates a testing "template" to allow for the injection of each exact
// solver implementation

#[template]
#[rstest]
#[case::microlp(moo_solver::microlp::MicrolpSolver)]
#[case::exhaustive(moo_solver::exhaustive::ExhaustiveSolver::default())]
pub fn all_solvers(#[case] solver: impl moo_solver::Solver) -> () {}
