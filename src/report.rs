//! Report lines for estimator results.
//!
//! One line per algorithm with a finite `rop`:
//! `"<tag right-aligned to 8> :: rop: ≈2^x, <key>: <value>, ..."`.
//! Lines are emitted as `info` events under the `pqce_estimator::report`
//! target; the returned cost map stays the authoritative result.

use crate::cost::Cost;
use std::collections::BTreeMap;

/// Format the report line of one algorithm.
pub fn format_line(tag: &str, cost: &Cost) -> String {
    format!("{:>8} :: {}", tag, cost)
}

/// Report lines for every feasible result, in tag order.
pub fn lines(results: &BTreeMap<String, Cost>) -> Vec<String> {
    results
        .iter()
        .filter(|(_, cost)| cost.is_feasible())
        .map(|(tag, cost)| format_line(tag, cost))
        .collect()
}

pub fn emit(results: &BTreeMap<String, Cost>) {
    for line in lines(results) {
        tracing::info!(target: "pqce_estimator::report", "{}", line);
    }
}
