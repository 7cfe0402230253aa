//! Directed graph of named nodes.
//!
//! The graph is an insertion-ordered mapping from each node to its outbound
//! neighbor sequence. Order matters: it fixes how ranking ties are broken
//! and makes every traversal reproducible.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::NodeName;

/// Outbound neighbor sequence of a node. Duplicates are kept.
pub type Neighbors = SmallVec<[NodeName; 4]>;

/// One node and its outbound links, as stored and serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEntry {
    pub node: NodeName,
    #[serde(default)]
    pub neighbors: Neighbors,
}

/// A directed, unweighted graph with named nodes.
///
/// Serializes as an ordered list of `{ "node": .., "neighbors": [..] }`
/// entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GraphEntry>", into = "Vec<GraphEntry>")]
pub struct Graph {
    entries: Vec<GraphEntry>,
    /// node name → position in `entries`
    index: HashMap<NodeName, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `node` with its full outbound sequence.
    ///
    /// Redeclaring a node replaces its sequence; the node keeps the position
    /// of its first declaration.
    pub fn insert<I>(&mut self, node: impl Into<NodeName>, neighbors: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        let neighbors: Neighbors = neighbors.into_iter().map(Into::into).collect();
        let slot = self.ensure_node(node);
        self.entries[slot].neighbors = neighbors;
    }

    /// Append a single outbound link `from -> to`, declaring `from` if needed.
    /// `to` is not declared; call [`Graph::close`] once building is done.
    pub fn add_edge(&mut self, from: impl Into<NodeName>, to: impl Into<NodeName>) {
        let slot = self.ensure_node(from);
        self.entries[slot].neighbors.push(to.into());
    }

    /// Declare `node` with no outbound links unless it already exists.
    /// Returns the node's position.
    pub fn ensure_node(&mut self, node: impl Into<NodeName>) -> usize {
        let node = node.into();
        if let Some(&slot) = self.index.get(&node) {
            return slot;
        }
        let slot = self.entries.len();
        self.index.insert(node.clone(), slot);
        self.entries.push(GraphEntry {
            node,
            neighbors: Neighbors::new(),
        });
        slot
    }

    /// Declare every referenced-but-undeclared neighbor as a dangling node,
    /// in order of first reference. Returns how many nodes were added.
    pub fn close(&mut self) -> usize {
        let missing = self.missing_nodes();
        let added = missing.len();
        for node in missing {
            self.ensure_node(node);
        }
        added
    }

    /// Neighbors that have no entry of their own, deduplicated, in order of
    /// first reference.
    pub fn missing_nodes(&self) -> Vec<NodeName> {
        let mut seen: hashbrown::HashSet<&str> = hashbrown::HashSet::new();
        let mut missing = Vec::new();
        for target in self.entries.iter().flat_map(|e| e.neighbors.iter()) {
            if !self.index.contains_key(target.as_str()) && seen.insert(target.as_str()) {
                missing.push(target.clone());
            }
        }
        missing
    }

    /// True when every neighbor is also a node of the graph.
    pub fn is_closed(&self) -> bool {
        self.entries
            .iter()
            .flat_map(|e| e.neighbors.iter())
            .all(|target| self.index.contains_key(target.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    /// Position of `node` in insertion order.
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub fn neighbors(&self, node: &str) -> Option<&[NodeName]> {
        self.index_of(node).map(|slot| self.entries[slot].neighbors.as_slice())
    }

    /// Number of outbound links, duplicates included.
    pub fn out_degree(&self, node: &str) -> Option<usize> {
        self.neighbors(node).map(<[NodeName]>::len)
    }

    pub fn entries(&self) -> &[GraphEntry] {
        &self.entries
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeName> {
        self.entries.iter().map(|e| &e.node)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeName, &[NodeName])> {
        self.entries.iter().map(|e| (&e.node, e.neighbors.as_slice()))
    }

    /// Every `(source, target)` link in order, duplicates included.
    pub fn edges(&self) -> impl Iterator<Item = (&NodeName, &NodeName)> {
        self.entries
            .iter()
            .flat_map(|e| e.neighbors.iter().map(move |target| (&e.node, target)))
    }

    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|e| e.neighbors.len()).sum()
    }

    /// Nodes without outbound links, in insertion order.
    pub fn dangling_nodes(&self) -> Vec<&NodeName> {
        self.entries
            .iter()
            .filter(|e| e.neighbors.is_empty())
            .map(|e| &e.node)
            .collect()
    }
}

impl From<Vec<GraphEntry>> for Graph {
    fn from(entries: Vec<GraphEntry>) -> Self {
        let mut graph = Graph::new();
        for entry in entries {
            graph.insert(entry.node, entry.neighbors);
        }
        graph
    }
}

impl From<Graph> for Vec<GraphEntry> {
    fn from(graph: Graph) -> Self {
        graph.entries
    }
}

impl<K, I> FromIterator<(K, I)> for Graph
where
    K: Into<NodeName>,
    I: IntoIterator,
    I::Item: Into<NodeName>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut graph = Graph::new();
        for (node, neighbors) in iter {
            graph.insert(node, neighbors);
        }
        graph
    }
}
