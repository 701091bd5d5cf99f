//! Multi-objective knapsack dynamic programming.
//!
//! The table has one [`Front`](crate::front::Front) per remaining capacity
//! `j in 0..=W`. Cell `j` of generation `i` is the Pareto front of every
//! value vector reachable with items `1..=i` and total weight at most `j`.
//! Generation `i` is computed from generation `i - 1` alone:
//!
//! - `j < w_i`: the cell is carried over unchanged;
//! - otherwise: `merge(previous[j - w_i] + v_i, previous[j])`.
//!
//! Only two generations are live. Each cell of the current generation
//! reads the previous one only, so a single item's pass can be split
//! across threads (`parallel` feature). The Lorenz front is derived
//! afterwards by re-filtering the final Pareto front.
//!
//! # References
//!
//! - Klamroth & Wiecek (2000), "Dynamic programming approaches to the
//!   multiple criteria knapsack problem"

mod config;
mod runner;
mod types;

pub use config::DpConfig;
pub use runner::{DpResult, DpRunner};
pub use types::{DpObserver, NoopObserver};
