//! JavaScript bindings (`wasm` feature).
//!
//! Problems and solutions cross the boundary as plain JS objects, using
//! the `serde` representations of [`KnapsackProblem`] and [`Solution`].

use wasm_bindgen::prelude::*;

use crate::problem::KnapsackProblem;
use crate::solver::Solution;

/// Solves a knapsack instance given as
/// `{ objectives, capacity, items: [{ weight, values }] }`.
///
/// Returns `{ pareto, lorenz, items, objectives, runtime, cancelled }`.
#[wasm_bindgen(js_name = solveKnapsack)]
pub fn solve_knapsack(problem: JsValue) -> Result<JsValue, JsError> {
    let problem: KnapsackProblem = serde_wasm_bindgen::from_value(problem)?;
    let solution: Solution = crate::solve(&problem)?;
    Ok(serde_wasm_bindgen::to_value(&solution)?)
}
