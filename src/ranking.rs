//! Ordering and formatting of ranked scores.

use std::fmt::Write as _;

use crate::model::NodeName;

/// Sort `(node, score)` pairs by score, highest first.
///
/// The sort is stable: equal scores keep their incoming order. Uses the IEEE
/// total order, so a NaN can never make the sort panic.
pub fn sort_by_value(mut scores: Vec<(NodeName, f64)>) -> Vec<(NodeName, f64)> {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
}

/// One `name: 0.123456` line per entry.
pub fn format_ranking(scores: &[(NodeName, f64)]) -> String {
    let mut out = String::new();
    for (node, score) in scores {
        let _ = writeln!(out, "{node}: {score:.6}");
    }
    out
}
