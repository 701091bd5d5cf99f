//! Objective-space points.

use std::fmt;

use crate::lorenz::lorenz_vector;

/// A vector of achieved objective totals.
///
/// Every point produced by the solvers is the sum of the value vectors of
/// some subset of items (the empty subset gives the origin). Equality,
/// hashing and ordering are componentwise/lexicographic, so points can be
/// used as set members and sorted into a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Point(Vec<i64>);

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    /// The all-zero point of dimension `dim`.
    pub fn origin(dim: usize) -> Self {
        Self(vec![0; dim])
    }

    /// Number of objectives.
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[i64] {
        &self.0
    }

    pub fn into_values(self) -> Vec<i64> {
        self.0
    }

    /// Returns `self + delta`, or `None` if any coordinate overflows.
    pub fn checked_add(&self, delta: &[i64]) -> Option<Point> {
        debug_assert_eq!(self.0.len(), delta.len());
        self.0
            .iter()
            .zip(delta)
            .map(|(a, b)| a.checked_add(*b))
            .collect::<Option<Vec<_>>>()
            .map(Point)
    }

    /// The Lorenz vector of this point.
    pub fn lorenz_vector(&self) -> Vec<i128> {
        lorenz_vector(&self.0)
    }
}

impl AsRef<[i64]> for Point {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Point {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[i64; N]> for Point {
    fn from(values: [i64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, v) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}
