//! Reverse adjacency: for each node, the links that point at it.

use smallvec::SmallVec;

use crate::model::Graph;

/// One inbound link: who sends rank and how many ways it splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InLink {
    pub source: usize,
    pub out_degree: usize,
}

/// Inbound links per node, indexed by node position.
///
/// Each occurrence of a target in a source's neighbor sequence yields its
/// own `InLink`, and rows list sources in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct ReverseIndex {
    incoming: Vec<SmallVec<[InLink; 4]>>,
    /// links whose target is not a node of the graph
    unresolved: usize,
}

impl ReverseIndex {
    pub fn build(graph: &Graph) -> Self {
        let mut incoming = vec![SmallVec::new(); graph.len()];
        let mut unresolved = 0;

        for (source, entry) in graph.entries().iter().enumerate() {
            let out_degree = entry.neighbors.len();
            for target in &entry.neighbors {
                match graph.index_of(target.as_str()) {
                    Some(slot) => incoming[slot].push(InLink { source, out_degree }),
                    None => unresolved += 1,
                }
            }
        }

        Self { incoming, unresolved }
    }

    pub fn incoming(&self, slot: usize) -> &[InLink] {
        &self.incoming[slot]
    }

    pub fn unresolved(&self) -> usize {
        self.unresolved
    }
}
