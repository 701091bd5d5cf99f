//! Dominance relations over objective vectors.
//!
//! All objectives are **maximized**. Two relations exist:
//!
//! - [`pareto_dominates`]: `x` dominates `y` when `x != y` and `x_k >= y_k`
//!   for every coordinate. This is the weak form: one strictly better
//!   coordinate with the rest tied is enough.
//! - [`lorenz_dominates`]: Pareto dominance between the Lorenz vectors of
//!   `x` and `y` (see [`crate::lorenz`]).
//!
//! [`Dominance`] names the relation a [`Front`](crate::front::Front) is
//! maintained under.

use std::cmp::Ordering;

use crate::lorenz::lorenz_vector;

/// Returns `true` if `x` Pareto-dominates `y` (maximization).
///
/// Both slices must have the same length.
///
/// # Example
///
/// ```
/// use u_mokp::dominance::pareto_dominates;
///
/// assert!(pareto_dominates(&[3, 2], &[3, 1]));
/// assert!(!pareto_dominates(&[3, 2], &[3, 2])); // equal vectors
/// assert!(!pareto_dominates(&[3, 1], &[1, 3])); // incomparable
/// ```
pub fn pareto_dominates<T: Ord>(x: &[T], y: &[T]) -> bool {
    debug_assert_eq!(x.len(), y.len(), "dominance needs equal-length vectors");

    let mut strictly_better_in_some = false;
    for (a, b) in x.iter().zip(y) {
        match a.cmp(b) {
            Ordering::Less => return false,
            Ordering::Greater => strictly_better_in_some = true,
            Ordering::Equal => {}
        }
    }
    strictly_better_in_some
}

/// Returns `true` if `x` Lorenz-dominates `y`.
///
/// # Example
///
/// ```
/// use u_mokp::dominance::lorenz_dominates;
///
/// // Lorenz vectors (2, 5) vs (1, 4)
/// assert!(lorenz_dominates(&[2, 3], &[3, 1]));
/// // Permutations share a Lorenz vector, so neither dominates
/// assert!(!lorenz_dominates(&[1, 0], &[0, 1]));
/// ```
pub fn lorenz_dominates(x: &[i64], y: &[i64]) -> bool {
    pareto_dominates(&lorenz_vector(x), &lorenz_vector(y))
}

/// The dominance relation a front is filtered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dominance {
    /// Componentwise (weak) Pareto dominance.
    #[default]
    Pareto,
    /// Pareto dominance applied to Lorenz vectors.
    Lorenz,
}

impl Dominance {
    /// Returns `true` if `x` dominates `y` under this relation.
    pub fn dominates(self, x: &[i64], y: &[i64]) -> bool {
        match self {
            Dominance::Pareto => pareto_dominates(x, y),
            Dominance::Lorenz => lorenz_dominates(x, y),
        }
    }

    /// Returns the name of this relation.
    pub fn name(self) -> &'static str {
        match self {
            Dominance::Pareto => "pareto",
            Dominance::Lorenz => "lorenz",
        }
    }
}
