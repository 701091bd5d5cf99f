//! Front comparison for cross-validating solvers.
//!
//! Solvers built on an external optimizer typically stop at one point per
//! distinct Lorenz vector, while the DP returns every Lorenz-optimal point.
//! [`CompareMode::LorenzVectors`] compares at that granularity.

use std::collections::HashSet;

use crate::error::Result;
use crate::front::Front;
use crate::point::Point;
use crate::problem::KnapsackProblem;
use crate::solver::FrontSolver;

/// How two fronts are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    /// Point sets must be equal.
    #[default]
    Exact,
    /// Sets of Lorenz vectors must be equal.
    LorenzVectors,
}

/// Differences between a reference front and a candidate front.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontDiff {
    /// Reference points the candidate lacks, in ascending order.
    pub missing: Vec<Point>,
    /// Candidate points absent from the reference, in ascending order.
    pub extra: Vec<Point>,
}

impl FrontDiff {
    /// Compares `candidate` against `reference`.
    ///
    /// In [`CompareMode::LorenzVectors`] a point counts as missing (extra)
    /// when its Lorenz vector appears in no candidate (reference) point.
    ///
    /// # Example
    ///
    /// ```
    /// use u_mokp::compare::{CompareMode, FrontDiff};
    /// use u_mokp::{Dominance, Front, Point};
    ///
    /// let all = Front::non_dominated(vec![Point::from([1, 0]), Point::from([0, 1])], Dominance::Lorenz);
    /// let one = Front::non_dominated(vec![Point::from([1, 0])], Dominance::Lorenz);
    ///
    /// assert!(!FrontDiff::between(&all, &one, CompareMode::Exact).is_match());
    /// assert!(FrontDiff::between(&all, &one, CompareMode::LorenzVectors).is_match());
    /// ```
    pub fn between(reference: &Front, candidate: &Front, mode: CompareMode) -> Self {
        match mode {
            CompareMode::Exact => Self {
                missing: absent(reference, candidate, |p| p.values().to_vec()),
                extra: absent(candidate, reference, |p| p.values().to_vec()),
            },
            CompareMode::LorenzVectors => Self {
                missing: absent(reference, candidate, Point::lorenz_vector),
                extra: absent(candidate, reference, Point::lorenz_vector),
            },
        }
    }

    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Points of `from` whose key occurs in no point of `other`.
fn absent<K, F>(from: &Front, other: &Front, key: F) -> Vec<Point>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Point) -> K,
{
    let present: HashSet<K> = other.iter().map(&key).collect();
    let mut out: Vec<Point> = from
        .iter()
        .filter(|p| !present.contains(&key(*p)))
        .cloned()
        .collect();
    out.sort_unstable();
    out
}

/// Runs two solvers on `problem` and compares their Lorenz fronts.
pub fn cross_validate(
    problem: &KnapsackProblem,
    reference: &dyn FrontSolver,
    candidate: &dyn FrontSolver,
    mode: CompareMode,
) -> Result<FrontDiff> {
    let expected = reference.solve(problem)?;
    let actual = candidate.solve(problem)?;
    let diff = FrontDiff::between(&expected.lorenz, &actual.lorenz, mode);
    if !diff.is_match() {
        tracing::warn!(
            reference = reference.name(),
            candidate = candidate.name(),
            missing = diff.missing.len(),
            extra = diff.extra.len(),
            "lorenz fronts disagree"
        );
    }
    Ok(diff)
}
