//! # Graph Model
//!
//! Plain DTOs for a directed graph of named nodes. Edges carry no weight;
//! a neighbor listed twice is two separate links.
//!
//! Design rule: no I/O, no ranking state. The engine reads a `Graph`
//! through shared references only.

pub mod node;
pub mod graph;

pub use node::NodeName;
pub use graph::{Graph, GraphEntry, Neighbors};
