//! Solver engine: precomputed strategy tree, loader, and traversal.

mod engine;
mod tree;

pub use engine::{Solver, SolverStep};
pub use tree::{StrategyNode, StrategyTree, TreeError};
