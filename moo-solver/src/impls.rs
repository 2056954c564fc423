/// Implementation using the microlp branch-and-bound solver through good_lp
#[cfg(feature = "microlp")]
pub mod microlp;

/// Exact implementation by enumeration, for small programs
pub mod exhaustive;

/// Heuristic implementation that fills constraints in descending objective order
pub mod greedy;
