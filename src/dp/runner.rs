//! DP execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::DpConfig;
use super::types::{DpObserver, NoopObserver};
use crate::dominance::Dominance;
use crate::error::{MokpError, Result};
use crate::front::Front;
use crate::problem::KnapsackProblem;

/// Result of a DP run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DpResult {
    /// Pareto front of the full-capacity cell after the last processed item.
    pub pareto: Front,

    /// Lorenz front, derived from `pareto`.
    pub lorenz: Front,

    /// Number of items in the instance.
    pub items: usize,

    /// Number of objectives.
    pub objectives: usize,

    /// Items whose generation completed. Equals `items` unless cancelled.
    pub items_processed: usize,

    /// Whether the run stopped early (cancel flag or time limit).
    pub cancelled: bool,

    /// Wall-clock time of the run, Lorenz filtering included.
    pub runtime: Duration,

    /// Size of the full-capacity front after each processed item.
    pub front_size_history: Vec<usize>,

    /// Largest front held by any cell at the end of any generation.
    pub peak_front_size: usize,
}

/// Executes the knapsack DP.
///
/// # Usage
///
/// ```
/// use u_mokp::dp::{DpConfig, DpRunner};
/// use u_mokp::{Item, KnapsackProblem, Point};
///
/// let problem = KnapsackProblem::new(2, 2)
///     .with_item(Item::new(1, vec![2, 3]))
///     .with_item(Item::new(2, vec![3, 1]));
///
/// let result = DpRunner::run(&problem, &DpConfig::default()).unwrap();
/// assert_eq!(result.pareto.sorted(), vec![Point::from([2, 3]), Point::from([3, 1])]);
/// assert_eq!(result.lorenz.sorted(), vec![Point::from([2, 3])]);
/// ```
pub struct DpRunner;

impl DpRunner {
    /// Runs the DP to completion.
    pub fn run(problem: &KnapsackProblem, config: &DpConfig) -> Result<DpResult> {
        Self::run_observed(problem, config, &NoopObserver, None)
    }

    /// Runs the DP with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next item and
    /// returns the fronts of the last completed generation.
    pub fn run_with_cancel(
        problem: &KnapsackProblem,
        config: &DpConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<DpResult> {
        Self::run_observed(problem, config, &NoopObserver, cancel)
    }

    /// Runs the DP, reporting loop boundaries to `observer`.
    ///
    /// # Errors
    ///
    /// - invalid configuration or instance (see [`KnapsackProblem::validate`]);
    /// - [`MokpError::ResourceExhausted`] if the table cannot be allocated;
    /// - [`MokpError::ValueOverflow`] if an objective total leaves `i64`.
    pub fn run_observed<O: DpObserver>(
        problem: &KnapsackProblem,
        config: &DpConfig,
        observer: &O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<DpResult> {
        config.validate().map_err(MokpError::Config)?;
        problem.validate()?;

        let start = Instant::now();
        let deadline = config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));

        let items = problem.item_count();
        let dim = problem.objectives();
        let slots = table_len(problem.capacity())?;

        // Generation 0: every cell is {origin}
        let mut previous = allocate_generation(slots, dim, problem.capacity())?;
        let mut current = allocate_generation(slots, dim, problem.capacity())?;

        let mut items_processed = 0usize;
        let mut cancelled = false;
        let mut front_size_history = Vec::with_capacity(items);
        let mut peak_front_size = 1usize;

        for (idx, item) in problem.items().iter().enumerate() {
            if should_stop(cancel.as_deref(), deadline) {
                cancelled = true;
                break;
            }

            let generation = idx + 1;
            observer.on_item_start(generation, items);

            match usize::try_from(item.weight()) {
                Ok(weight) if weight < slots => {
                    advance(
                        &previous,
                        &mut current,
                        Step {
                            weight,
                            values: item.values(),
                            item: idx,
                            generation,
                        },
                        config,
                        observer,
                    )?;
                    std::mem::swap(&mut previous, &mut current);
                    peak_front_size =
                        peak_front_size.max(previous.iter().map(Front::len).max().unwrap_or(0));
                }
                // Every cell would be a carry-over.
                _ => {}
            }

            let front_len = previous.last().map_or(0, Front::len);
            debug!(
                item = generation,
                weight = item.weight(),
                front = front_len,
                "item processed"
            );
            front_size_history.push(front_len);
            items_processed = generation;
            observer.on_item_done(generation, items, front_len);
        }

        drop(current);
        let pareto = previous.pop().unwrap_or_else(|| Front::origin(dim));
        drop(previous);
        let lorenz = pareto.filter(Dominance::Lorenz);
        let runtime = start.elapsed();

        if cancelled {
            warn!(
                items_processed,
                items,
                pareto = pareto.len(),
                "knapsack DP stopped early"
            );
        } else {
            info!(
                items,
                objectives = dim,
                pareto = pareto.len(),
                lorenz = lorenz.len(),
                runtime_ms = u64::try_from(runtime.as_millis()).unwrap_or(u64::MAX),
                "knapsack DP finished"
            );
        }

        Ok(DpResult {
            pareto,
            lorenz,
            items,
            objectives: dim,
            items_processed,
            cancelled,
            runtime,
            front_size_history,
            peak_front_size,
        })
    }
}

/// The item being added in one generation.
#[derive(Clone, Copy)]
struct Step<'a> {
    weight: usize,
    values: &'a [i64],
    /// 0-based index, used in error reports.
    item: usize,
    /// 1-based generation number, used for observer events.
    generation: usize,
}

/// Writes every cell of `current` from `previous`.
///
/// `current` must not be read until this returns.
fn advance<O: DpObserver>(
    previous: &[Front],
    current: &mut [Front],
    step: Step<'_>,
    config: &DpConfig,
    observer: &O,
) -> Result<()> {
    #[cfg(feature = "parallel")]
    {
        if config.parallel && current.len() >= config.parallel_threshold {
            return current
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(slot, cell)| {
                    transition(previous, slot, step, cell)?;
                    observer.on_slot_done(step.generation, slot);
                    Ok(())
                });
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for (slot, cell) in current.iter_mut().enumerate() {
        transition(previous, slot, step, cell)?;
        observer.on_slot_done(step.generation, slot);
    }
    Ok(())
}

/// Computes one cell of the next generation.
fn transition(previous: &[Front], slot: usize, step: Step<'_>, cell: &mut Front) -> Result<()> {
    if slot < step.weight {
        cell.clone_from(&previous[slot]);
        return Ok(());
    }

    let shifted = previous[slot - step.weight]
        .shifted(step.values)
        .ok_or(MokpError::ValueOverflow { item: step.item })?;
    *cell = shifted.merge(&previous[slot], Dominance::Pareto);
    Ok(())
}

/// Number of cells for capacity `W`: `W + 1`.
fn table_len(capacity: i64) -> Result<usize> {
    usize::try_from(capacity)
        .ok()
        .and_then(|c| c.checked_add(1))
        .ok_or(MokpError::ResourceExhausted { capacity })
}

fn allocate_generation(slots: usize, dim: usize, capacity: i64) -> Result<Vec<Front>> {
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(slots)
        .map_err(|_| MokpError::ResourceExhausted { capacity })?;
    cells.resize(slots, Front::origin(dim));
    Ok(cells)
}

fn should_stop(cancel: Option<&AtomicBool>, deadline: Option<Instant>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
        || deadline.is_some_and(|d| Instant::now() >= d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::problem::Item;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicUsize;

    fn run(problem: &KnapsackProblem) -> DpResult {
        DpRunner::run(problem, &DpConfig::default()).unwrap()
    }

    fn pts(raw: &[&[i64]]) -> Vec<Point> {
        raw.iter().map(|p| Point::new(p.to_vec())).collect()
    }

    /// Exhaustive reference: ND over every feasible subset.
    fn brute_force(problem: &KnapsackProblem) -> Front {
        let items = problem.items();
        let mut points = Vec::new();
        for mask in 0u32..(1u32 << items.len()) {
            let mut weight = 0i64;
            let mut total = vec![0i64; problem.objectives()];
            for (k, item) in items.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    weight += item.weight();
                    for (t, v) in total.iter_mut().zip(item.values()) {
                        *t += v;
                    }
                }
            }
            if weight <= problem.capacity() {
                points.push(Point::new(total));
            }
        }
        Front::non_dominated(points, Dominance::Pareto)
    }

    // ---- Concrete scenarios ----

    #[test]
    fn test_two_items_two_objectives() {
        let problem = KnapsackProblem::new(2, 2)
            .with_item(Item::new(1, vec![2, 3]))
            .with_item(Item::new(2, vec![3, 1]));
        let result = run(&problem);

        assert_eq!(result.pareto.sorted(), pts(&[&[2, 3], &[3, 1]]));
        assert_eq!(result.lorenz.sorted(), pts(&[&[2, 3]]));
        assert_eq!(result.items, 2);
        assert_eq!(result.objectives, 2);
        assert_eq!(result.items_processed, 2);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_single_item_does_not_fit() {
        let problem = KnapsackProblem::new(2, 2).with_item(Item::new(3, vec![5, 5]));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[0, 0]]));
        assert_eq!(result.lorenz.sorted(), pts(&[&[0, 0]]));
    }

    #[test]
    fn test_no_items() {
        for capacity in [0, 1, 17] {
            let result = run(&KnapsackProblem::new(3, capacity));
            assert_eq!(result.pareto.sorted(), pts(&[&[0, 0, 0]]));
            assert_eq!(result.lorenz.sorted(), pts(&[&[0, 0, 0]]));
            assert!(result.front_size_history.is_empty());
        }
    }

    #[test]
    fn test_zero_capacity() {
        let problem = KnapsackProblem::new(2, 0)
            .with_item(Item::new(1, vec![4, 4]))
            .with_item(Item::new(2, vec![1, 9]));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[0, 0]]));
        assert_eq!(result.items_processed, 2);
    }

    #[test]
    fn test_all_weights_exceed_capacity() {
        let problem = KnapsackProblem::new(2, 5)
            .with_items((6..10).map(|w| Item::new(w, vec![w, w])));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[0, 0]]));
        assert_eq!(result.front_size_history, vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_permutation_points_share_lorenz_front() {
        let problem = KnapsackProblem::new(2, 1)
            .with_item(Item::new(1, vec![1, 0]))
            .with_item(Item::new(1, vec![0, 1]));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[0, 1], &[1, 0]]));
        assert_eq!(result.lorenz, result.pareto);
    }

    #[test]
    fn test_lorenz_picks_balanced_solution() {
        // Capacity 2: either the lopsided pair or the balanced item.
        let problem = KnapsackProblem::new(2, 2)
            .with_item(Item::new(1, vec![6, 0]))
            .with_item(Item::new(1, vec![3, 1]))
            .with_item(Item::new(2, vec![5, 5]));
        let result = run(&problem);
        // Lorenz vectors: (5, 10) vs (1, 10)
        assert_eq!(result.pareto.sorted(), pts(&[&[5, 5], &[9, 1]]));
        assert_eq!(result.lorenz.sorted(), pts(&[&[5, 5]]));
    }

    #[test]
    fn test_weak_dominance_prunes_ties() {
        // (5,2) and (5,1): the second is dominated despite the tie.
        let problem = KnapsackProblem::new(2, 1)
            .with_item(Item::new(1, vec![5, 1]))
            .with_item(Item::new(1, vec![5, 2]));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[5, 2]]));
    }

    #[test]
    fn test_equal_vectors_from_different_subsets_collapse() {
        let problem = KnapsackProblem::new(2, 2)
            .with_item(Item::new(1, vec![1, 1]))
            .with_item(Item::new(1, vec![1, 1]))
            .with_item(Item::new(2, vec![2, 2]));
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[2, 2]]));
    }

    #[test]
    fn test_single_objective_is_scalar_knapsack() {
        let problem = KnapsackProblem::new(1, 10).with_items(vec![
            Item::new(5, vec![10]),
            Item::new(4, vec![40]),
            Item::new(6, vec![30]),
            Item::new(3, vec![50]),
        ]);
        let result = run(&problem);
        assert_eq!(result.pareto.sorted(), pts(&[&[90]]));
    }

    #[test]
    fn test_three_objectives_matches_brute_force() {
        let problem = KnapsackProblem::random(10, 3, 12, 20, 337).unwrap();
        let result = run(&problem);
        assert_eq!(result.pareto, brute_force(&problem));
        assert!(result.pareto.is_non_dominated(Dominance::Pareto));
        assert!(result.lorenz.is_non_dominated(Dominance::Lorenz));
    }

    // ---- Errors ----

    #[test]
    fn test_invalid_problem_rejected() {
        let problem = KnapsackProblem::new(2, -3);
        assert_eq!(
            DpRunner::run(&problem, &DpConfig::default()).unwrap_err(),
            MokpError::NegativeCapacity(-3)
        );

        let problem = KnapsackProblem::new(2, 3).with_item(Item::new(1, vec![1]));
        assert!(matches!(
            DpRunner::run(&problem, &DpConfig::default()),
            Err(MokpError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DpConfig::default().with_parallel_threshold(0);
        let err = DpRunner::run(&KnapsackProblem::new(1, 1), &config).unwrap_err();
        assert!(matches!(err, MokpError::Config(_)));
    }

    #[test]
    fn test_value_overflow_reported() {
        let problem = KnapsackProblem::new(1, 2)
            .with_item(Item::new(1, vec![i64::MAX]))
            .with_item(Item::new(1, vec![1]));
        assert_eq!(
            DpRunner::run(&problem, &DpConfig::default()).unwrap_err(),
            MokpError::ValueOverflow { item: 1 }
        );
    }

    #[test]
    fn test_huge_capacity_is_resource_error() {
        let problem = KnapsackProblem::new(2, i64::MAX);
        assert_eq!(
            DpRunner::run(&problem, &DpConfig::default()).unwrap_err(),
            MokpError::ResourceExhausted { capacity: i64::MAX }
        );
    }

    // ---- Cancellation & observers ----

    #[test]
    fn test_cancel_before_start() {
        let problem = KnapsackProblem::random(5, 2, 10, 10, 1).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            DpRunner::run_with_cancel(&problem, &DpConfig::default(), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.items_processed, 0);
        assert_eq!(result.pareto, Front::origin(2));
    }

    struct CancelAfter {
        item: usize,
        flag: Arc<AtomicBool>,
    }

    impl DpObserver for CancelAfter {
        fn on_item_done(&self, item: usize, _items: usize, _front_len: usize) {
            if item == self.item {
                self.flag.store(true, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn test_cancel_mid_run_returns_partial_front() {
        let problem = KnapsackProblem::random(6, 2, 10, 10, 177).unwrap();
        let flag = Arc::new(AtomicBool::new(false));
        let observer = CancelAfter {
            item: 2,
            flag: Arc::clone(&flag),
        };

        let result =
            DpRunner::run_observed(&problem, &DpConfig::default(), &observer, Some(flag)).unwrap();

        assert!(result.cancelled);
        assert_eq!(result.items_processed, 2);
        assert_eq!(result.front_size_history.len(), 2);

        let prefix = KnapsackProblem::new(2, problem.capacity())
            .with_items(problem.items()[..2].iter().cloned());
        assert_eq!(result.pareto, run(&prefix).pareto);
    }

    #[derive(Default)]
    struct Counter {
        starts: AtomicUsize,
        slots: AtomicUsize,
        dones: AtomicUsize,
    }

    impl DpObserver for Counter {
        fn on_item_start(&self, _item: usize, _items: usize) {
            self.starts.fetch_add(1, Ordering::Relaxed);
        }
        fn on_slot_done(&self, _item: usize, _slot: usize) {
            self.slots.fetch_add(1, Ordering::Relaxed);
        }
        fn on_item_done(&self, _item: usize, _items: usize, _front_len: usize) {
            self.dones.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_observer_sees_every_boundary() {
        // Capacity 4 => 5 slots; the weight-9 item is skipped entirely.
        let problem = KnapsackProblem::new(2, 4).with_items(vec![
            Item::new(1, vec![1, 2]),
            Item::new(9, vec![5, 5]),
            Item::new(3, vec![2, 1]),
        ]);
        let counter = Counter::default();
        DpRunner::run_observed(&problem, &DpConfig::default(), &counter, None).unwrap();

        assert_eq!(counter.starts.load(Ordering::Relaxed), 3);
        assert_eq!(counter.dones.load(Ordering::Relaxed), 3);
        assert_eq!(counter.slots.load(Ordering::Relaxed), 2 * 5);
    }

    #[test]
    fn test_history_and_peak() {
        let problem = KnapsackProblem::random(12, 2, 10, 30, 875).unwrap();
        let result = run(&problem);
        assert_eq!(result.front_size_history.len(), 12);
        assert_eq!(*result.front_size_history.last().unwrap(), result.pareto.len());
        assert!(result.peak_front_size >= result.pareto.len());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let problem = KnapsackProblem::random(25, 3, 20, 50, 302).unwrap();
        let sequential = run(&problem);
        let config = DpConfig::default()
            .with_parallel(true)
            .with_parallel_threshold(1);
        let counter = Counter::default();
        let parallel = DpRunner::run_observed(&problem, &config, &counter, None).unwrap();

        assert_eq!(parallel.pareto, sequential.pareto);
        assert_eq!(parallel.lorenz, sequential.lorenz);
        assert_eq!(parallel.front_size_history, sequential.front_size_history);
        assert!(counter.slots.load(Ordering::Relaxed) > 0);
    }

    // ---- Properties ----

    fn small_problems() -> impl Strategy<Value = KnapsackProblem> {
        (1usize..=3, 0i64..=12).prop_flat_map(|(n, capacity)| {
            prop::collection::vec((1i64..=6, prop::collection::vec(-3i64..=9, n)), 0..=8)
                .prop_map(move |raw| {
                    KnapsackProblem::new(n, capacity)
                        .with_items(raw.into_iter().map(|(w, v)| Item::new(w, v)))
                })
        })
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(problem in small_problems()) {
            let result = run(&problem);
            prop_assert_eq!(&result.pareto, &brute_force(&problem));
            prop_assert_eq!(result.lorenz, result.pareto.filter(Dominance::Lorenz));
        }

        #[test]
        fn prop_fronts_are_non_dominated(problem in small_problems()) {
            let result = run(&problem);
            prop_assert!(result.pareto.is_non_dominated(Dominance::Pareto));
            prop_assert!(result.lorenz.is_non_dominated(Dominance::Lorenz));
            for p in &result.lorenz {
                prop_assert!(result.pareto.contains(p));
            }
        }

        #[test]
        fn prop_new_item_never_regresses(
            problem in small_problems(),
            weight in 1i64..=6,
            seed in 0i64..=9,
        ) {
            prop_assume!(weight <= problem.capacity());
            let values: Vec<i64> = (0..problem.objectives() as i64).map(|k| (seed + k) % 7).collect();
            let before = run(&problem);
            let after = run(&problem.clone().with_item(Item::new(weight, values)));

            for p in &before.pareto {
                let covered = after
                    .pareto
                    .iter()
                    .any(|q| q == p || Dominance::Pareto.dominates(q.values(), p.values()));
                prop_assert!(covered, "{} lost after adding an item", p);
            }
        }
    }
}
