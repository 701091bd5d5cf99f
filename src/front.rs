//! Non-dominated sets.
//!
//! A [`Front`] holds points no one of which dominates another under a
//! given [`Dominance`] relation. Two operations maintain that invariant:
//!
//! - [`Front::non_dominated`]: filter an arbitrary collection (duplicates
//!   and dominated points allowed) down to its non-dominated subset.
//!   `O(k^2)` comparisons for `k` distinct points.
//! - [`Front::merge`]: combine two fronts that are each already
//!   non-dominated. Only cross comparisons are made, since neither side
//!   can contain a point dominated by a sibling. This is the hot path of
//!   the knapsack DP.
//!
//! Lorenz vectors are computed once per point per call, not per comparison.

use std::collections::HashSet;

use crate::dominance::{pareto_dominates, Dominance};
use crate::error::{MokpError, Result};
use crate::point::Point;

/// A set of mutually non-dominated points.
///
/// Point order is an artifact of construction and carries no meaning;
/// equality between fronts is set equality. Use [`Front::sorted`] when a
/// deterministic order is needed.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "Vec<Point>", try_from = "Vec<Point>")
)]
pub struct Front {
    points: Vec<Point>,
}

impl Front {
    /// An empty front.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The front `{origin}` of dimension `dim`.
    pub fn origin(dim: usize) -> Self {
        Self {
            points: vec![Point::origin(dim)],
        }
    }

    /// Builds the non-dominated subset of `points` under `dominance`.
    ///
    /// Exact duplicates collapse to one entry (first occurrence kept). A
    /// point is discarded iff some *different* point of the input
    /// dominates it.
    ///
    /// # Example
    ///
    /// ```
    /// use u_mokp::{Dominance, Front, Point};
    ///
    /// let front = Front::non_dominated(
    ///     vec![
    ///         Point::from([0, 0]),
    ///         Point::from([2, 3]),
    ///         Point::from([3, 1]),
    ///         Point::from([2, 3]),
    ///     ],
    ///     Dominance::Pareto,
    /// );
    /// assert_eq!(front.len(), 2);
    /// assert!(!front.contains(&Point::from([0, 0])));
    /// ```
    pub fn non_dominated<I>(points: I, dominance: Dominance) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points: Vec<Point> = points.into_iter().collect();

        let mut seen = HashSet::with_capacity(points.len());
        let unique: Vec<bool> = points.iter().map(|p| seen.insert(p)).collect();
        drop(seen);
        retain_where(&mut points, &unique);

        let refs: Vec<&Point> = points.iter().collect();
        let keep = self_survivors(&refs, dominance);
        drop(refs);
        retain_where(&mut points, &keep);

        Self { points }
    }

    /// Re-filters this front under another relation.
    ///
    /// Used to derive the Lorenz front from a Pareto front.
    pub fn filter(&self, dominance: Dominance) -> Front {
        Self::non_dominated(self.points.iter().cloned(), dominance)
    }

    /// Merges two fronts, each non-dominated under `dominance`, into the
    /// non-dominated subset of their union.
    ///
    /// Points of `other` equal to a point of `self` are dropped first, so
    /// shared points appear once. A point of `self` survives iff no
    /// remaining point of `other` dominates it, and vice versa. Surviving
    /// points of `self` come first.
    ///
    /// The precondition is not checked; passing a front that violates it
    /// can leave dominated points in the result.
    pub fn merge(self, other: &Front, dominance: Dominance) -> Front {
        let (fresh, keep_own, keep_fresh) = {
            let own: HashSet<&Point> = self.points.iter().collect();
            let fresh: Vec<&Point> = other
                .points
                .iter()
                .filter(|p| !own.contains(*p))
                .collect();
            let own_refs: Vec<&Point> = self.points.iter().collect();
            let (keep_own, keep_fresh) = cross_survivors(&own_refs, &fresh, dominance);
            (fresh, keep_own, keep_fresh)
        };

        let mut points = self.points;
        retain_where(&mut points, &keep_own);
        points.extend(
            fresh
                .into_iter()
                .zip(keep_fresh)
                .filter(|&(_, keep)| keep)
                .map(|(p, _)| p.clone()),
        );

        Front { points }
    }

    /// Translates every point by `delta`.
    ///
    /// Translation preserves Pareto dominance, so a Pareto front stays one.
    /// Returns `None` if any coordinate overflows.
    pub fn shifted(&self, delta: &[i64]) -> Option<Front> {
        self.points
            .iter()
            .map(|p| p.checked_add(delta))
            .collect::<Option<Vec<_>>>()
            .map(|points| Front { points })
    }

    /// Checks the front invariant: no duplicates and no point dominated
    /// by another.
    pub fn is_non_dominated(&self, dominance: Dominance) -> bool {
        let mut seen = HashSet::with_capacity(self.points.len());
        if !self.points.iter().all(|p| seen.insert(p)) {
            return false;
        }
        let refs: Vec<&Point> = self.points.iter().collect();
        self_survivors(&refs, dominance).into_iter().all(|keep| keep)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Points in ascending lexicographic order.
    pub fn sorted(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        points.sort_unstable();
        points
    }

    /// Dimension of the points, or `None` for an empty front.
    pub fn dim(&self) -> Option<usize> {
        self.points.first().map(Point::dim)
    }
}

impl PartialEq for Front {
    fn eq(&self, other: &Self) -> bool {
        if self.points.len() != other.points.len() {
            return false;
        }
        let theirs: HashSet<&Point> = other.points.iter().collect();
        self.points.iter().all(|p| theirs.contains(p))
    }
}

impl Eq for Front {}

impl TryFrom<Vec<Point>> for Front {
    type Error = MokpError;

    /// Accepts `points` only if they already form a Pareto front of a
    /// single dimension. Deserialization goes through here.
    fn try_from(points: Vec<Point>) -> Result<Self> {
        if let Some(dim) = points.first().map(Point::dim) {
            if let Some(p) = points.iter().find(|p| p.dim() != dim) {
                return Err(MokpError::InvalidArgument(format!(
                    "front point {p} has {} objectives, expected {dim}",
                    p.dim()
                )));
            }
        }
        let front = Front { points };
        if !front.is_non_dominated(Dominance::Pareto) {
            return Err(MokpError::InvalidArgument(
                "front contains a duplicate or dominated point".to_string(),
            ));
        }
        Ok(front)
    }
}

impl From<Front> for Vec<Point> {
    fn from(front: Front) -> Self {
        front.points
    }
}

impl IntoIterator for Front {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Front {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Keeps `points[i]` iff `keep[i]`.
fn retain_where<T>(items: &mut Vec<T>, keep: &[bool]) {
    let mut flags = keep.iter();
    items.retain(|_| flags.next().copied().unwrap_or(false));
}

/// For each point, whether no other point of the same set dominates it.
fn self_survivors(points: &[&Point], dominance: Dominance) -> Vec<bool> {
    match dominance {
        Dominance::Pareto => {
            let keys: Vec<&[i64]> = points.iter().map(|p| p.values()).collect();
            undominated::<_, i64>(&keys, &keys)
        }
        Dominance::Lorenz => {
            let keys: Vec<Vec<i128>> = points.iter().map(|p| p.lorenz_vector()).collect();
            undominated::<_, i128>(&keys, &keys)
        }
    }
}

/// Survivor flags for two sets compared only against each other.
fn cross_survivors(
    xs: &[&Point],
    ys: &[&Point],
    dominance: Dominance,
) -> (Vec<bool>, Vec<bool>) {
    match dominance {
        Dominance::Pareto => {
            let kx: Vec<&[i64]> = xs.iter().map(|p| p.values()).collect();
            let ky: Vec<&[i64]> = ys.iter().map(|p| p.values()).collect();
            (
                undominated::<_, i64>(&kx, &ky),
                undominated::<_, i64>(&ky, &kx),
            )
        }
        Dominance::Lorenz => {
            let kx: Vec<Vec<i128>> = xs.iter().map(|p| p.lorenz_vector()).collect();
            let ky: Vec<Vec<i128>> = ys.iter().map(|p| p.lorenz_vector()).collect();
            (
                undominated::<_, i128>(&kx, &ky),
                undominated::<_, i128>(&ky, &kx),
            )
        }
    }
}

/// `result[i]` is true when no key in `rivals` dominates `candidates[i]`.
///
/// A key never dominates itself, so `candidates` and `rivals` may alias.
fn undominated<K, T>(candidates: &[K], rivals: &[K]) -> Vec<bool>
where
    K: AsRef<[T]>,
    T: Ord,
{
    candidates
        .iter()
        .map(|c| {
            !rivals
                .iter()
                .any(|r| pareto_dominates(r.as_ref(), c.as_ref()))
        })
        .collect()
}
