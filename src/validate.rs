//! Structural checks run before ranking.
//!
//! A graph is rankable when it has at least one node and no node lists
//! itself as a neighbor. Closure (every neighbor declared) is the builder's
//! job and is not checked here.

use tracing::warn;

use crate::model::{Graph, NodeName};

/// Why a graph was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("graph has no nodes")]
    Empty,

    #[error("self-loop detected at node {node}")]
    SelfLoop { node: NodeName },
}

/// Return the first structural problem, if any.
///
/// Self-loops are reported in node insertion order.
pub fn check(graph: &Graph) -> std::result::Result<(), ValidationError> {
    for (node, neighbors) in graph.iter() {
        if neighbors.contains(node) {
            return Err(ValidationError::SelfLoop { node: node.clone() });
        }
    }
    if graph.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(())
}

/// Boolean form of [`check`]. Emits a warning naming the offending node
/// when the graph is rejected.
pub fn validate(graph: &Graph) -> bool {
    match check(graph) {
        Ok(()) => true,
        Err(ValidationError::SelfLoop { node }) => {
            warn!(node = %node, "self-loop detected");
            false
        }
        Err(err) => {
            warn!("{err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_graph() {
        let mut graph = Graph::new();
        graph.insert("A", ["B"]);
        graph.insert("B", ["A"]);
        assert_eq!(check(&graph), Ok(()));
        assert!(validate(&graph));
    }

    #[test]
    fn test_empty_graph_rejected() {
        let graph = Graph::new();
        assert_eq!(check(&graph), Err(ValidationError::Empty));
        assert!(!validate(&graph));
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = Graph::new();
        graph.insert("A", ["B"]);
        graph.insert("X", ["A", "X"]);
        graph.close();

        assert_eq!(
            check(&graph),
            Err(ValidationError::SelfLoop { node: "X".into() })
        );
        assert!(!validate(&graph));
    }

    #[test]
    fn test_self_loop_warning_names_node_once() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .finish();

        let mut graph = Graph::new();
        graph.insert("Zed", ["Zed"]);
        let valid = tracing::subscriber::with_default(subscriber, || validate(&graph));
        assert!(!valid);

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("self-loop detected"), "{output}");
        assert!(output.contains("node=Zed"), "{output}");
        assert_eq!(output.matches("Zed").count(), 1, "{output}");
    }

    #[test]
    fn test_first_self_loop_reported() {
        let mut graph = Graph::new();
        graph.insert("B", ["B"]);
        graph.insert("A", ["A"]);

        let err = check(&graph).unwrap_err();
        assert_eq!(err.to_string(), "self-loop detected at node B");
    }

    #[test]
    fn test_unclosed_graph_is_not_rejected() {
        let mut graph = Graph::new();
        graph.insert("A", ["Ghost"]);
        assert!(validate(&graph));
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let mut graph = Graph::new();
        graph.insert("A", ["Ghost"]);
        let before = graph.clone();
        validate(&graph);
        assert_eq!(graph, before);
    }
}
