//! PageRank by power iteration.
//!
//! Every node starts at `1/N`. Each sweep computes, for every node `v`,
//!
//! ```text
//! rank'(v) = (1 - d) / N + d * (Σ rank(u) / out(u) + Σ rank(dangling) / N)
//! ```
//!
//! where the first sum runs over every link `u -> v` and the second spreads
//! the mass of nodes without outbound links evenly over the whole graph.
//! Iteration stops when no node moved by more than the convergence
//! threshold, or when the iteration cap is hit. Hitting the cap is not an
//! error; [`PageRankResult::converged`] records which case occurred.

mod reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::model::{Graph, NodeName};
use crate::ranking::sort_by_value;
use crate::{Error, Result};
use reverse::ReverseIndex;

// ============================================================================
// Configuration
// ============================================================================

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRankConfig {
    /// Probability of following a link instead of teleporting. Expected in `(0, 1)`.
    pub damping_factor: f64,
    /// Upper bound on sweeps.
    pub max_iterations: usize,
    /// Largest per-node change still considered converged.
    pub convergence_threshold: f64,
}

impl PageRankConfig {
    pub const DEFAULT_DAMPING_FACTOR: f64 = 0.85;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;
    pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-6;

    pub fn with_damping_factor(mut self, damping_factor: f64) -> Self {
        self.damping_factor = damping_factor;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Caller-side sanity check. The engine itself accepts any value.
    pub fn validate(&self) -> Result<()> {
        let d = self.damping_factor;
        if !(d > 0.0 && d < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "damping factor must be in (0, 1), got {d}"
            )));
        }
        let t = self.convergence_threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "convergence threshold must be a finite non-negative number, got {t}"
            )));
        }
        Ok(())
    }
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: Self::DEFAULT_DAMPING_FACTOR,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            convergence_threshold: Self::DEFAULT_CONVERGENCE_THRESHOLD,
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Final ranking of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankResult {
    /// Scores sorted descending; ties keep graph insertion order.
    pub scores: Vec<(NodeName, f64)>,
    /// Sweeps performed.
    pub iterations: usize,
    /// False when the iteration cap was reached first.
    pub converged: bool,
}

impl PageRankResult {
    fn empty() -> Self {
        Self {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }

    pub fn score(&self, node: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(name, _)| name.as_str() == node)
            .map(|&(_, score)| score)
    }

    /// Sum of all scores; ≈ 1.0 for a closed graph.
    pub fn total_mass(&self) -> f64 {
        self.scores.iter().map(|(_, score)| score).sum()
    }

    /// The `k` highest-ranked nodes (fewer if the graph is smaller).
    pub fn top(&self, k: usize) -> &[(NodeName, f64)] {
        &self.scores[..k.min(self.scores.len())]
    }
}

// ============================================================================
// Engine
// ============================================================================

pub struct PageRank;

impl PageRank {
    /// Rank `graph` with the given parameters.
    ///
    /// Expects a closed graph. Links to undeclared nodes contribute nothing.
    /// An empty graph yields an empty, converged result.
    pub fn run(graph: &Graph, config: &PageRankConfig) -> PageRankResult {
        let n = graph.len();
        if n == 0 {
            return PageRankResult::empty();
        }

        let nf = n as f64;
        let d = config.damping_factor;
        let teleport = (1.0 - d) / nf;

        let reverse = ReverseIndex::build(graph);
        if reverse.unresolved() > 0 {
            debug!(
                unresolved = reverse.unresolved(),
                "graph is not closed; links to undeclared nodes are ignored"
            );
        }
        let dangling: Vec<usize> = graph
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.neighbors.is_empty())
            .map(|(slot, _)| slot)
            .collect();

        let mut current = vec![1.0 / nf; n];
        let mut next = vec![0.0; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < config.max_iterations {
            iterations += 1;

            let dangling_contribution =
                dangling.iter().map(|&slot| current[slot]).sum::<f64>() / nf;

            for (slot, rank) in next.iter_mut().enumerate() {
                let incoming: f64 = reverse
                    .incoming(slot)
                    .iter()
                    .map(|link| current[link.source] / link.out_degree as f64)
                    .sum();
                *rank = teleport + d * (incoming + dangling_contribution);
            }

            let stable = current
                .iter()
                .zip(&next)
                .all(|(old, new)| (new - old).abs() <= config.convergence_threshold);
            std::mem::swap(&mut current, &mut next);

            trace!(iteration = iterations, dangling_contribution, "pagerank sweep");
            if stable {
                converged = true;
                break;
            }
        }

        debug!(
            nodes = n,
            edges = graph.edge_count(),
            iterations,
            converged,
            "pagerank finished"
        );

        let scores = graph.nodes().cloned().zip(current).collect();
        PageRankResult {
            scores: sort_by_value(scores),
            iterations,
            converged,
        }
    }
}

/// Rank `graph` with the default iteration cap and threshold.
///
/// Returns `(node, score)` pairs sorted by score, highest first.
pub fn compute_pagerank(graph: &Graph, damping_factor: f64) -> Vec<(NodeName, f64)> {
    let config = PageRankConfig::default().with_damping_factor(damping_factor);
    PageRank::run(graph, &config).scores
}
