//! Exact Pareto and Lorenz fronts for the multi-objective 0/1 knapsack problem.
//!
//! Given items with an integer weight and an integer value per objective,
//! and a capacity `W`, this crate computes:
//!
//! - **Pareto front**: every value vector achievable within the capacity
//!   that no other achievable vector dominates (all objectives maximized).
//! - **Lorenz front**: the Pareto vectors that are also non-dominated after
//!   the Lorenz transform, i.e. the equitable ones.
//!
//! # Components
//!
//! - [`dominance`]: Pareto and Lorenz dominance predicates
//! - [`lorenz`]: the Lorenz transform (sorted cumulative sum)
//! - [`front`]: non-dominated sets with filter and merge operations
//! - [`dp`]: the capacity-indexed dynamic program
//! - [`solver`]: the [`FrontSolver`] seam, DP and exhaustive solvers
//! - [`compare`]: front diffs for cross-validating solvers
//!
//! # Example
//!
//! ```
//! use u_mokp::{solve, Item, KnapsackProblem, Point};
//!
//! let problem = KnapsackProblem::new(2, 2)
//!     .with_item(Item::new(1, vec![2, 3]))
//!     .with_item(Item::new(2, vec![3, 1]));
//!
//! let solution = solve(&problem).unwrap();
//! assert_eq!(solution.pareto.sorted(), vec![Point::from([2, 3]), Point::from([3, 1])]);
//! assert_eq!(solution.lorenz.sorted(), vec![Point::from([2, 3])]);
//! ```
//!
//! # Features
//!
//! - `parallel`: split each item's capacity pass across rayon workers
//! - `serde`: `Serialize`/`Deserialize` for problems, fronts and solutions
//! - `wasm`: a `solveKnapsack` JavaScript binding

pub mod compare;
pub mod dominance;
pub mod dp;
pub mod error;
pub mod front;
pub mod lorenz;
pub mod point;
pub mod problem;
pub mod solver;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use dominance::Dominance;
pub use error::{MokpError, Result};
pub use front::Front;
pub use point::Point;
pub use problem::{Item, KnapsackProblem};
pub use solver::{DpSolver, EnumerationSolver, FrontSolver, Solution};

/// Solves `problem` with the DP under the default configuration.
///
/// # Errors
///
/// Fails fast on invalid input (see [`KnapsackProblem::validate`]), and
/// reports objective overflow or an unallocatable table as errors.
pub fn solve(problem: &KnapsackProblem) -> Result<Solution> {
    DpSolver::default().solve(problem)
}
