//! Solver interface and implementations.
//!
//! A [`FrontSolver`] turns a [`KnapsackProblem`] into a [`Solution`]: the
//! Pareto front, the Lorenz front and the time it took. The DP engine is
//! the production implementation; [`EnumerationSolver`] is an exhaustive
//! reference for small instances. Wrappers around external optimizers can
//! implement the same trait and be checked with
//! [`cross_validate`](crate::compare::cross_validate).

use std::time::{Duration, Instant};

use tracing::debug;

use crate::dominance::Dominance;
use crate::dp::{DpConfig, DpResult, DpRunner};
use crate::error::{MokpError, Result};
use crate::front::Front;
use crate::point::Point;
use crate::problem::KnapsackProblem;

/// Fronts produced for one instance.
///
/// Carries what a result log records: item and objective counts, both
/// fronts, and the run time.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Pareto-optimal value vectors.
    pub pareto: Front,
    /// Lorenz-optimal value vectors (a subset of `pareto`).
    pub lorenz: Front,
    /// Number of items in the instance.
    pub items: usize,
    /// Number of objectives.
    pub objectives: usize,
    /// Solve time.
    pub runtime: Duration,
    /// Whether the solver stopped early; the fronts are then partial.
    pub cancelled: bool,
}

impl Solution {
    /// Whether `point` belongs to the Lorenz front.
    pub fn is_lorenz_optimal(&self, point: &Point) -> bool {
        self.lorenz.contains(point)
    }

    /// Every Pareto vector with its Lorenz-membership flag.
    ///
    /// Lorenz-optimal vectors come first, each group in ascending order.
    pub fn tagged(&self) -> Vec<(Point, bool)> {
        let mut rows: Vec<(Point, bool)> =
            self.lorenz.sorted().into_iter().map(|p| (p, true)).collect();
        rows.extend(
            self.pareto
                .sorted()
                .into_iter()
                .filter(|p| !self.lorenz.contains(p))
                .map(|p| (p, false)),
        );
        rows
    }
}

impl From<DpResult> for Solution {
    fn from(result: DpResult) -> Self {
        Self {
            pareto: result.pareto,
            lorenz: result.lorenz,
            items: result.items,
            objectives: result.objectives,
            runtime: result.runtime,
            cancelled: result.cancelled,
        }
    }
}

/// Trait for front solver implementations.
pub trait FrontSolver {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Solves the instance.
    fn solve(&self, problem: &KnapsackProblem) -> Result<Solution>;
}

/// The capacity-indexed DP as a [`FrontSolver`].
#[derive(Debug, Clone, Default)]
pub struct DpSolver {
    config: DpConfig,
}

impl DpSolver {
    pub fn new(config: DpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DpConfig {
        &self.config
    }
}

impl FrontSolver for DpSolver {
    fn name(&self) -> &str {
        "dp"
    }

    fn solve(&self, problem: &KnapsackProblem) -> Result<Solution> {
        DpRunner::run(problem, &self.config).map(Solution::from)
    }
}

/// Exhaustive subset enumeration.
///
/// Evaluates all `2^m` subsets, so it is only usable for small `m`; it
/// exists to validate other solvers.
///
/// # Limitations
///
/// - Instances with more than `max_items` items are rejected with
///   [`MokpError::TooManyItems`].
/// - `max_items` is clamped to [`EnumerationSolver::HARD_LIMIT`].
#[derive(Debug, Clone)]
pub struct EnumerationSolver {
    max_items: usize,
}

impl EnumerationSolver {
    pub const DEFAULT_MAX_ITEMS: usize = 20;
    pub const HARD_LIMIT: usize = 32;

    pub fn new() -> Self {
        Self {
            max_items: Self::DEFAULT_MAX_ITEMS,
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items.min(Self::HARD_LIMIT);
        self
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }
}

impl Default for EnumerationSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontSolver for EnumerationSolver {
    fn name(&self) -> &str {
        "enumeration"
    }

    fn solve(&self, problem: &KnapsackProblem) -> Result<Solution> {
        problem.validate()?;
        let items = problem.items();
        if items.len() > self.max_items {
            return Err(MokpError::TooManyItems {
                items: items.len(),
                limit: self.max_items,
            });
        }

        let start = Instant::now();
        let capacity = i128::from(problem.capacity());
        let mut feasible = Vec::new();

        for mask in 0u64..(1u64 << items.len()) {
            let mut weight = 0i128;
            let mut total = Point::origin(problem.objectives());
            for (k, item) in items.iter().enumerate() {
                if mask & (1 << k) == 0 {
                    continue;
                }
                weight += i128::from(item.weight());
                if weight > capacity {
                    break;
                }
                total = total
                    .checked_add(item.values())
                    .ok_or(MokpError::ValueOverflow { item: k })?;
            }
            if weight <= capacity {
                feasible.push(total);
            }
        }

        debug!(
            items = items.len(),
            feasible = feasible.len(),
            "enumerated knapsack subsets"
        );

        let pareto = Front::non_dominated(feasible, Dominance::Pareto);
        let lorenz = pareto.filter(Dominance::Lorenz);
        Ok(Solution {
            pareto,
            lorenz,
            items: items.len(),
            objectives: problem.objectives(),
            runtime: start.elapsed(),
            cancelled: false,
        })
    }
}
