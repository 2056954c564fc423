/**
 * These are implementations of the `Solver` port for binary integer programs.
 */
mod impls;
pub use impls::*;

/**
 * Writers for standard text formats, for inspecting a program with other tools.
 */
pub mod export;

pub use moo_core::{models::BinaryProgram, ports::Solver};
