use approx::assert_abs_diff_eq;
use moo_core::models::{Assignment, Catalog, Client, FeatureVector, TargetGender};
use moo_engine::{
    EngineError, RecommendationEngine, ScoreError, ScoringFunction, ScoringWeights,
    eligibility::eligible,
};
use moo_solver::Solver;
use rstest::*;
use rstest_reuse::{self, *};

mod all_solvers;
use all_solvers::all_solvers;

mod common;
use common::{Broken, FnModel, client, offer};

// Younger clients and pricier offers respond better
fn responsive(features: &FeatureVector) -> f64 {
    (0.2 + features.age / 100.0 + features.price / 2000.0).min(1.0)
}

fn by_age(features: &FeatureVector) -> f64 {
    if features.age < 35.0 { 0.9 } else { 0.5 }
}

#[fixture]
fn catalog() -> Catalog {
    let mut womens = offer(3, 500.0, "Fashion", 150.0);
    womens.target_gender = TargetGender::from("F");
    let mut young = offer(2, 350.0, "Electronics", 200.0);
    young.max_age = 40;
    Catalog::new([offer(1, 200.0, "Books", 40.0), young, womens]).unwrap()
}

#[fixture]
fn clients() -> Vec<Client> {
    vec![
        client(30, 55, "M", 0.0),
        client(10, 25, "F", 0.0),
        client(20, 35, "F", 0.0),
    ]
}

fn total(assignments: &[Assignment]) -> (f64, f64) {
    assignments.iter().fold((0.0, 0.0), |(spent, score), a| {
        (spent + a.price, score + a.combined_score)
    })
}

fn check_invariants(assignments: &[Assignment], budget: f64) {
    let (spent, _) = total(assignments);
    assert!(spent <= budget + 1e-9, "spent {spent} over {budget}");
    for pair in assignments.windows(2) {
        assert!(pair[0].client_id < pair[1].client_id);
    }
}

// Every way to give each client one eligible offer or nothing
fn brute_force(clients: &[Client], catalog: &Catalog, budget: f64) -> f64 {
    let scoring = ScoringFunction::new(FnModel(responsive), ScoringWeights::default());
    let options = clients
        .iter()
        .map(|client| {
            catalog
                .iter()
                .filter(|offer| eligible(offer, client, budget))
                .map(|offer| {
                    let score = scoring.score(client, offer, budget, catalog).unwrap();
                    (offer.price, score.combined)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    fn walk(options: &[Vec<(f64, f64)>], remaining: f64) -> f64 {
        let Some((first, rest)) = options.split_first() else {
            return 0.0;
        };
        let mut best = walk(rest, remaining);
        for &(price, score) in first {
            if price <= remaining {
                best = best.max(score + walk(rest, remaining - price));
            }
        }
        best
    }

    walk(&options, budget)
}

#[apply(all_solvers)]
#[rstest]
fn shared_offer_goes_to_higher_score(solver: impl Solver) {
    let catalog = Catalog::new([offer(1, 500.0, "Fashion", 100.0)]).unwrap();
    let engine = RecommendationEngine::new(catalog, FnModel(by_age), solver);
    let clients = [client(1, 30, "F", 0.0), client(2, 45, "F", 0.0)];

    let assignments = engine.optimize_campaign(&clients, 600.0).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].client_id, 1.into());
    assert_eq!(assignments[0].offer_id, 1.into());
    assert_eq!(assignments[0].offer_name, "Offer 1");
    assert_eq!(assignments[0].propensity, 0.9);
}

#[apply(all_solvers)]
#[rstest]
fn matches_brute_force(
    solver: impl Solver,
    catalog: Catalog,
    clients: Vec<Client>,
    #[values(0.0, 150.0, 200.0, 550.0, 700.0, 900.0, 1050.0, 5000.0)] budget: f64,
) {
    let expected = brute_force(&clients, &catalog, budget);
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);

    let assignments = engine.optimize_campaign(&clients, budget).unwrap();
    check_invariants(&assignments, budget);
    let (_, score) = total(&assignments);
    assert_abs_diff_eq!(score, expected, epsilon = 1e-6);
}

#[apply(all_solvers)]
#[rstest]
fn ample_budget_serves_everyone(solver: impl Solver, catalog: Catalog, clients: Vec<Client>) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    let assignments = engine.optimize_campaign(&clients, 10_000.0).unwrap();

    check_invariants(&assignments, 10_000.0);
    let served = assignments.iter().map(|a| a.client_id).collect::<Vec<_>>();
    assert_eq!(served, vec![10.into(), 20.into(), 30.into()]);
}

#[apply(all_solvers)]
#[rstest]
fn repeated_runs_agree(solver: impl Solver, catalog: Catalog, clients: Vec<Client>) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    let first = engine.optimize_campaign(&clients, 700.0).unwrap();
    let second = engine.optimize_campaign(&clients, 700.0).unwrap();
    assert_eq!(first, second);
}

#[apply(all_solvers)]
#[rstest]
fn own_budgets_are_ignored(solver: impl Solver, catalog: Catalog) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    // Broke on paper, but campaigns fund from the shared budget
    let clients = [client(1, 25, "F", 0.0)];
    let assignments = engine.optimize_campaign(&clients, 1000.0).unwrap();
    assert_eq!(assignments.len(), 1);
}

#[apply(all_solvers)]
#[rstest]
fn unaffordable_campaign_is_empty(
    solver: impl Solver,
    catalog: Catalog,
    clients: Vec<Client>,
    #[values(0.0, 199.0)] budget: f64,
) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    assert!(engine.optimize_campaign(&clients, budget).unwrap().is_empty());
}

#[apply(all_solvers)]
#[rstest]
fn empty_population_is_empty(solver: impl Solver, catalog: Catalog) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    assert!(engine.optimize_campaign(&[], 1000.0).unwrap().is_empty());
}

#[apply(all_solvers)]
#[rstest]
fn duplicate_client_is_rejected(solver: impl Solver, catalog: Catalog) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    let clients = [
        client(4, 25, "F", 0.0),
        client(2, 30, "M", 0.0),
        client(4, 40, "F", 0.0),
    ];
    let result = engine.optimize_campaign(&clients, 1000.0);
    assert!(matches!(result, Err(EngineError::DuplicateClient(id)) if id == 4.into()));
}

#[apply(all_solvers)]
#[rstest]
fn invalid_budget_is_rejected(
    solver: impl Solver,
    catalog: Catalog,
    clients: Vec<Client>,
    #[values(-1.0, f64::NAN, f64::NEG_INFINITY)] budget: f64,
) {
    let engine = RecommendationEngine::new(catalog, FnModel(responsive), solver);
    let result = engine.optimize_campaign(&clients, budget);
    assert!(matches!(result, Err(EngineError::InvalidBudget(_))));
}

#[apply(all_solvers)]
#[rstest]
fn model_failure_fails_campaign(solver: impl Solver, catalog: Catalog, clients: Vec<Client>) {
    let engine = RecommendationEngine::new(catalog, Broken, solver);
    let result = engine.optimize_campaign(&clients, 1000.0);
    assert!(matches!(
        result,
        Err(EngineError::Score(ScoreError::Model { .. }))
    ));
}

#[rstest]
fn program_pairs_follow_client_then_offer(catalog: Catalog, clients: Vec<Client>) {
    let engine = RecommendationEngine::new(
        catalog,
        FnModel(responsive),
        moo_solver::exhaustive::ExhaustiveSolver::default(),
    );
    let (pairs, program) = engine.campaign_program(&clients, 1000.0).unwrap();

    assert_eq!(pairs.len(), program.len());
    let mut sorted = pairs.clone();
    sorted.sort();
    assert_eq!(pairs, sorted);
    // Client 30 (55, M) only qualifies for offer 1
    assert_eq!(pairs.iter().filter(|(client, _)| *client == 30.into()).count(), 1);
    // One row per client plus the budget row
    assert_eq!(program.constraints().len(), 4);
}

#[apply(all_solvers)]
#[rstest]
fn equal_clients_favor_lowest_id(solver: impl Solver, #[values(3, 5, 8, 12)] n: u64) {
    let catalog = Catalog::new([offer(1, 500.0, "Fashion", 100.0)]).unwrap();
    let engine = RecommendationEngine::new(catalog, FnModel(by_age), solver);
    // Identical to the model, and listed highest id first
    let clients = (1..=n)
        .rev()
        .map(|id| client(id, 30, "F", 0.0))
        .collect::<Vec<_>>();

    let assignments = engine.optimize_campaign(&clients, 600.0).unwrap();
    let served = assignments.iter().map(|a| a.client_id).collect::<Vec<_>>();
    assert_eq!(served, vec![1.into()]);
}

#[test]
fn large_tie_settles_on_earliest_pairs() {
    let catalog = Catalog::new([
        offer(1, 500.0, "Fashion", 100.0),
        offer(2, 500.0, "Fashion", 100.0),
    ])
    .unwrap();
    let engine = RecommendationEngine::new(
        catalog,
        FnModel(by_age),
        moo_solver::microlp::MicrolpSolver,
    );
    let clients = (1..=20)
        .rev()
        .map(|id| client(id, 30, "F", 0.0))
        .collect::<Vec<_>>();

    let assignments = engine.optimize_campaign(&clients, 1000.0).unwrap();
    let served = assignments
        .iter()
        .map(|a| (a.client_id, a.offer_id))
        .collect::<Vec<_>>();
    assert_eq!(
        served,
        vec![(1.into(), 1.into()), (2.into(), 1.into())]
    );
}
