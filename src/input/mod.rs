//! Graph input: the `Node -> N1,N2,...` edge-list format, files, and
//! interactive entry.
//!
//! Every builder here returns a closed graph: neighbors that never get a
//! line of their own become dangling nodes.

mod interactive;

pub use interactive::read_interactive;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::model::{Graph, Neighbors, NodeName};
use crate::{Error, Result};

const ARROW: &str = "->";

/// Parse one `Node -> N1,N2,...` line.
///
/// Returns `None` unless the line holds exactly one `->` and a non-empty
/// node name. Neighbor names are trimmed and empty names dropped, so
/// `A ->` declares `A` with no outbound links.
pub fn parse_line(line: &str) -> Option<(NodeName, Neighbors)> {
    split_line(line).ok()
}

fn split_line(line: &str) -> std::result::Result<(NodeName, Neighbors), &'static str> {
    let mut parts = line.split(ARROW);
    let (Some(lhs), Some(rhs), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("expected exactly one `->`");
    };

    let node = lhs.trim();
    if node.is_empty() {
        return Err("missing node name before `->`");
    }

    let neighbors = rhs
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(NodeName::from)
        .collect();

    Ok((NodeName::from(node), neighbors))
}

/// Blank lines and `#` comments carry no graph data.
fn is_ignorable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse an edge list, skipping malformed lines.
///
/// A node declared on several lines keeps only its last neighbor list.
pub fn parse_edge_list(text: &str) -> Graph {
    let mut graph = Graph::new();
    for (number, line) in text.lines().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        match split_line(line) {
            Ok((node, neighbors)) => graph.insert(node, neighbors),
            Err(reason) => debug!(line = number + 1, reason, "skipping malformed line"),
        }
    }
    graph.close();
    graph
}

/// Like [`parse_edge_list`], but the first malformed line is an error.
pub fn parse_edge_list_strict(text: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (number, line) in text.lines().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        let (node, neighbors) = split_line(line).map_err(|reason| Error::Parse {
            line: number + 1,
            message: reason.to_string(),
        })?;
        graph.insert(node, neighbors);
    }
    graph.close();
    Ok(graph)
}

/// Read and parse an edge-list file. Malformed lines are skipped.
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let graph = parse_edge_list(&text);
    debug!(path = %path.display(), nodes = graph.len(), edges = graph.edge_count(), "loaded graph");
    Ok(graph)
}

/// Read a graph stored as JSON entries (see [`Graph`]'s serde form).
pub fn load_graph_json(path: impl AsRef<Path>) -> Result<Graph> {
    let text = fs::read_to_string(path)?;
    let mut graph: Graph = serde_json::from_str(&text)?;
    graph.close();
    Ok(graph)
}
