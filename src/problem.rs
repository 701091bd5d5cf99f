//! Knapsack instances.
//!
//! A [`KnapsackProblem`] is a list of [`Item`]s sharing one objective
//! count, plus a capacity. Instances are plain data: nothing is checked
//! on construction, and every solver calls [`KnapsackProblem::validate`]
//! before touching the items.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MokpError, Result};

/// An item: integer weight and one integer value per objective.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    weight: i64,
    values: Vec<i64>,
}

impl Item {
    pub fn new(weight: i64, values: Vec<i64>) -> Self {
        Self { weight, values }
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of objective values carried by this item.
    pub fn objectives(&self) -> usize {
        self.values.len()
    }
}

/// A multi-objective 0/1 knapsack instance.
///
/// # Examples
///
/// ```
/// use u_mokp::{Item, KnapsackProblem};
///
/// let problem = KnapsackProblem::new(2, 2)
///     .with_item(Item::new(1, vec![2, 3]))
///     .with_item(Item::new(2, vec![3, 1]));
/// assert!(problem.validate().is_ok());
/// assert_eq!(problem.item_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackProblem {
    objectives: usize,
    capacity: i64,
    items: Vec<Item>,
}

impl KnapsackProblem {
    /// Creates an instance with no items.
    pub fn new(objectives: usize, capacity: i64) -> Self {
        Self {
            objectives,
            capacity,
            items: Vec::new(),
        }
    }

    /// Creates an instance whose objective count is taken from the first
    /// item. The result is validated.
    ///
    /// An empty list is rejected since it says nothing about the number
    /// of objectives; use [`KnapsackProblem::new`] for that case.
    pub fn from_items(items: Vec<Item>, capacity: i64) -> Result<Self> {
        let objectives = items.first().map(Item::objectives).ok_or_else(|| {
            MokpError::InvalidArgument(
                "cannot infer the number of objectives from an empty item list".into(),
            )
        })?;
        let problem = Self {
            objectives,
            capacity,
            items,
        };
        problem.validate()?;
        Ok(problem)
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_items<I: IntoIterator<Item = Item>>(mut self, items: I) -> Self {
        self.items.extend(items);
        self
    }

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn objectives(&self) -> usize {
        self.objectives
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all item weights, widened so it cannot overflow.
    pub fn total_weight(&self) -> i128 {
        self.items.iter().map(|it| i128::from(it.weight)).sum()
    }

    /// Validates the instance.
    ///
    /// Rejects a zero objective count, a negative capacity, weights below
    /// 1, and value vectors of the wrong length. Nothing is coerced.
    pub fn validate(&self) -> Result<()> {
        if self.objectives == 0 {
            return Err(MokpError::NoObjectives);
        }
        if self.capacity < 0 {
            return Err(MokpError::NegativeCapacity(self.capacity));
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.weight < 1 {
                return Err(MokpError::InvalidWeight {
                    item: idx,
                    weight: item.weight,
                });
            }
            if item.values.len() != self.objectives {
                return Err(MokpError::DimensionMismatch {
                    item: idx,
                    expected: self.objectives,
                    found: item.values.len(),
                });
            }
        }
        Ok(())
    }

    /// Draws a benchmark sub-instance.
    ///
    /// Picks `count` distinct items uniformly at random, keeps their first
    /// `objectives` values, and sets the capacity to half the sampled
    /// total weight (rounded down). The same seed yields the same instance.
    ///
    /// # Example
    ///
    /// ```
    /// use u_mokp::KnapsackProblem;
    ///
    /// let pool = KnapsackProblem::random(50, 3, 100, 100, 7).unwrap();
    /// let sub = pool.sample(10, 2, 192).unwrap();
    /// assert_eq!(sub.item_count(), 10);
    /// assert_eq!(sub.objectives(), 2);
    /// assert_eq!(i128::from(sub.capacity()), sub.total_weight() / 2);
    /// ```
    pub fn sample(&self, count: usize, objectives: usize, seed: u64) -> Result<Self> {
        self.validate()?;
        if objectives == 0 {
            return Err(MokpError::NoObjectives);
        }
        if objectives > self.objectives {
            return Err(MokpError::InvalidArgument(format!(
                "cannot keep {objectives} objectives from an instance with {}",
                self.objectives
            )));
        }
        if count > self.items.len() {
            return Err(MokpError::InvalidArgument(format!(
                "cannot sample {count} items from {}",
                self.items.len()
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let items: Vec<Item> = rand::seq::index::sample(&mut rng, self.items.len(), count)
            .into_iter()
            .map(|idx| {
                let src = &self.items[idx];
                Item::new(src.weight, src.values[..objectives].to_vec())
            })
            .collect();

        let capacity = half_total_weight(&items)?;
        Ok(Self {
            objectives,
            capacity,
            items,
        })
    }

    /// Builds a seeded random instance.
    ///
    /// Weights are drawn from `1..=max_weight`, values from `0..=max_value`,
    /// and the capacity is half the total weight (rounded down).
    pub fn random(
        items: usize,
        objectives: usize,
        max_weight: i64,
        max_value: i64,
        seed: u64,
    ) -> Result<Self> {
        if objectives == 0 {
            return Err(MokpError::NoObjectives);
        }
        if max_weight < 1 {
            return Err(MokpError::InvalidArgument(format!(
                "max_weight must be at least 1, got {max_weight}"
            )));
        }
        if max_value < 0 {
            return Err(MokpError::InvalidArgument(format!(
                "max_value must be non-negative, got {max_value}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let items: Vec<Item> = (0..items)
            .map(|_| {
                let weight = rng.random_range(1..=max_weight);
                let values = (0..objectives)
                    .map(|_| rng.random_range(0..=max_value))
                    .collect();
                Item::new(weight, values)
            })
            .collect();

        let capacity = half_total_weight(&items)?;
        Ok(Self {
            objectives,
            capacity,
            items,
        })
    }
}

fn half_total_weight(items: &[Item]) -> Result<i64> {
    let total: i128 = items.iter().map(|it| i128::from(it.weight)).sum();
    i64::try_from(total / 2)
        .map_err(|_| MokpError::InvalidArgument("total item weight overflows i64".into()))
}
