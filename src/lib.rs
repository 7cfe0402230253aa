//! # pagerank-rs — PageRank influence ranking for named directed graphs
//!
//! Ranks the nodes of a directed graph by power-iteration PageRank, with
//! uniform redistribution of dangling-node mass, and reports the scores
//! sorted from most to least influential.
//!
//! ## Design Principles
//!
//! 1. **Plain data**: `Graph` and `NodeName` are DTOs with no I/O and no state
//! 2. **Validate, then rank**: structural problems are caught by `validate`
//!    before the engine ever iterates
//! 3. **Explicit configuration**: damping, iteration cap and convergence
//!    threshold travel in a `PageRankConfig` value
//! 4. **I/O at the edges**: text parsing, interactive entry and Graphviz
//!    export live in their own modules and only touch the core through
//!    its public types
//!
//! ## Quick Start
//!
//! ```rust
//! use pagerank_rs::{Graph, PageRank, PageRankConfig};
//!
//! let mut graph = Graph::new();
//! graph.insert("A", ["B"]);
//! graph.insert("B", ["C"]);
//! graph.insert("C", ["A"]);
//!
//! assert!(pagerank_rs::validate(&graph));
//!
//! let result = PageRank::run(&graph, &PageRankConfig::default());
//! for (node, score) in &result.scores {
//!     println!("{node}: {score:.6}");
//! }
//! assert!(result.converged);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod validate;
pub mod pagerank;
pub mod ranking;
pub mod input;
pub mod export;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{Graph, GraphEntry, Neighbors, NodeName};
pub use validate::{check, validate, ValidationError};
pub use pagerank::{compute_pagerank, PageRank, PageRankConfig, PageRankResult};
pub use ranking::{format_ranking, sort_by_value};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid graph: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
