//! Lorenz transform.
//!
//! The Lorenz vector of `x` is the running sum of its coordinates sorted
//! in ascending order: `z_k = sum(sorted(x)[..=k])`. It forgets which
//! objective is which and keeps only how achievement is distributed,
//! so comparing Lorenz vectors compares equity.
//!
//! Coordinates are widened to `i128` before summing, so the transform
//! of any `i64` vector is exact.

/// Returns the Lorenz vector of `x`.
///
/// # Example
///
/// ```
/// use u_mokp::lorenz::lorenz_vector;
///
/// assert_eq!(lorenz_vector(&[3, 1]), vec![1, 4]);
/// assert_eq!(lorenz_vector(&[2, 3]), vec![2, 5]);
/// ```
pub fn lorenz_vector(x: &[i64]) -> Vec<i128> {
    let mut sorted = x.to_vec();
    sorted.sort_unstable();

    let mut total = 0i128;
    sorted
        .into_iter()
        .map(|v| {
            total += i128::from(v);
            total
        })
        .collect()
}
