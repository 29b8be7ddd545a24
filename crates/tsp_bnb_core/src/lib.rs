//! Parallel branch-and-bound solver for the symmetric TSP on small integer
//! point sets. Recursive fork/join task decomposition with nearest-neighbor
//! branching order and a globally shared best-tour bound for pruning.

mod bound;
mod error;
pub mod logging;
mod matrix;
mod options;
mod point;
mod search;
mod solver;
mod tour;

pub use bound::{GlobalBound, Improvement, ImprovementHook};
pub use error::{Error, Result};
pub use matrix::DistanceMatrix;
pub use options::{LogLevel, SolverOptions};
pub use point::TspPoint;
pub use solver::TspSolver;
pub use tour::Tour;
