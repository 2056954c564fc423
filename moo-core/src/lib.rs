#![warn(missing_docs)]
//! Typed records and collaborator interfaces for selecting marketing offers.
//!
//! The decision engine itself lives in `moo-engine`; this crate only holds
//! what the engine and its collaborators (scoring models, integer program
//! solvers, record suppliers) need to agree on.

/// Core domain models for offer selection.
///
/// Clients and offers are plain records with named, typed fields. A
/// [`models::Catalog`] is the immutable, read-only snapshot of offers that
/// every optimization call works against, and [`models::BinaryProgram`] is the
/// solver-neutral description of a 0/1 integer program.
pub mod models;

/// Interface traits for the external collaborators.
///
/// These are the "ports" between the decision engine and whatever adapters
/// supply records, estimate propensities, or solve integer programs. Keeping
/// them as traits lets tests substitute deterministic stubs and lets an exact
/// solver be swapped for a heuristic without touching the optimizers.
pub mod ports;
