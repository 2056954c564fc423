use approx::assert_abs_diff_eq;
use moo_core::models::{BinaryProgram, Constraint};
use moo_solver::Solver;
use rstest::*;
use rstest_reuse::{self, *};

use all_solvers::all_solvers;

// Three clients, each with up to two candidate offers, sharing a budget.
// Variables: client 1 -> {0, 1}, client 2 -> {2, 3}, client 3 -> {4}
#[fixture]
fn campaign() -> BinaryProgram {
    let prices = [500.0, 200.0, 300.0, 100.0, 250.0];
    let mut program = BinaryProgram::new(vec![0.9, 0.5, 0.7, 0.4, 0.6]).unwrap();
    for group in [vec![0, 1], vec![2, 3], vec![4]] {
        program
            .add_constraint(Constraint::leq(group.into_iter().map(|idx| (idx, 1.0)), 1.0))
            .unwrap();
    }
    program
        .add_constraint(Constraint::leq(prices.into_iter().enumerate(), 600.0))
        .unwrap();
    program
}

#[apply(all_solvers)]
#[rstest]
fn picks_best_budget_feasible_mix(solver: impl Solver, campaign: BinaryProgram) {
    let selection = solver.solve(&campaign).unwrap().unwrap();

    // {1, 2} = 1.2 at 500, {1, 3, 4} = 1.5 at 550, {0, 3} = 1.3 at 600
    assert_eq!(selection.selected().collect::<Vec<_>>(), vec![1, 3, 4]);
    assert_abs_diff_eq!(selection.objective(), 1.5, epsilon = 1e-9);
    assert!(campaign.is_feasible(selection.values()));
}

#[apply(all_solvers)]
#[rstest]
fn exactly_one_takes_argmax(solver: impl Solver) {
    let mut program = BinaryProgram::new(vec![0.31, 0.72, 0.55]).unwrap();
    program
        .add_constraint(Constraint::eq((0..3).map(|idx| (idx, 1.0)), 1.0))
        .unwrap();

    let selection = solver.solve(&program).unwrap().unwrap();
    assert_eq!(selection.selected().collect::<Vec<_>>(), vec![1]);
}

#[apply(all_solvers)]
#[rstest]
fn exactly_one_of_nothing_is_infeasible(solver: impl Solver) {
    let mut program = BinaryProgram::new(vec![1.0]).unwrap();
    program
        .add_constraint(Constraint::leq([(0, 2.0)], 1.0))
        .unwrap();
    program
        .add_constraint(Constraint::eq([(0, 1.0)], 1.0))
        .unwrap();

    assert!(solver.solve(&program).unwrap().is_none());
}

#[apply(all_solvers)]
#[rstest]
fn nothing_fits_selects_nothing(solver: impl Solver) {
    let mut program = BinaryProgram::new(vec![0.8, 0.6]).unwrap();
    program
        .add_constraint(Constraint::leq([(0, 500.0), (1, 500.0)], 100.0))
        .unwrap();

    let selection = solver.solve(&program).unwrap().unwrap();
    assert_eq!(selection.selected().count(), 0);
    assert_eq!(selection.objective(), 0.0);
}

#[apply(all_solvers)]
#[rstest]
fn empty_program(solver: impl Solver) {
    let program = BinaryProgram::new(Vec::new()).unwrap();
    let selection = solver.solve(&program).unwrap().unwrap();
    assert!(selection.values().is_empty());
}
