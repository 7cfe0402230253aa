//! End-to-end tests for the ranking pipeline.
//!
//! Each test builds a graph through the public API, validates it, and runs
//! the engine with the default configuration unless stated otherwise.

use pagerank_rs::{
    check, compute_pagerank, sort_by_value, validate, Graph, NodeName, PageRank, PageRankConfig,
    ValidationError,
};
use pretty_assertions::assert_eq;

fn graph_of(lines: &[(&str, &[&str])]) -> Graph {
    let mut graph: Graph = lines.iter().map(|&(node, neighbors)| (node, neighbors.to_vec())).collect();
    graph.close();
    graph
}

fn order(scores: &[(NodeName, f64)]) -> Vec<&str> {
    scores.iter().map(|(node, _)| node.as_str()).collect()
}

fn mass(scores: &[(NodeName, f64)]) -> f64 {
    scores.iter().map(|(_, score)| score).sum()
}

// ============================================================================
// 1. Single node, no edges: score is exactly 1.0
// ============================================================================

#[test]
fn test_single_node_scores_one() {
    let graph = graph_of(&[("only", &[])]);
    assert!(validate(&graph));

    let scores = compute_pagerank(&graph, 0.85);
    assert_eq!(scores, vec![(NodeName::from("only"), 1.0)]);
}

// ============================================================================
// 2. Two-cycle: both nodes converge to 0.5
// ============================================================================

#[test]
fn test_two_cycle_is_even() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["A"])]);
    let result = PageRank::run(&graph, &PageRankConfig::default());

    assert!(result.converged);
    for (node, score) in &result.scores {
        assert!((score - 0.5).abs() < 1e-6, "{node} = {score}");
    }
}

// ============================================================================
// 3. Three-cycle: all nodes converge to 1/3, ties keep insertion order
// ============================================================================

#[test]
fn test_three_cycle_is_even() {
    let graph = graph_of(&[("C", &["A"]), ("A", &["B"]), ("B", &["C"])]);
    let scores = compute_pagerank(&graph, 0.85);

    for (_, score) in &scores {
        assert!((score - 1.0 / 3.0).abs() < 1e-4);
    }
    assert_eq!(order(&scores), vec!["C", "A", "B"]);
}

// ============================================================================
// 4. Dangling nodes: mass is redistributed, total stays at 1
// ============================================================================

#[test]
fn test_dangling_node_conserves_mass() {
    let graph = graph_of(&[("A", &["B", "D"]), ("B", &["C"]), ("C", &["A", "D"])]);
    assert_eq!(graph.dangling_nodes(), vec![&NodeName::from("D")]);

    let result = PageRank::run(&graph, &PageRankConfig::default());
    assert!((mass(&result.scores) - 1.0).abs() < 1e-4);
    assert!(result.scores.iter().all(|&(_, score)| score > 0.0));
}

#[test]
fn test_dangling_graph_matches_reference_scores() {
    let graph = graph_of(&[("A", &["B", "C"]), ("B", &["C"])]);
    let result = PageRank::run(&graph, &PageRankConfig::default());

    assert!(result.converged);
    assert_eq!(order(&result.scores), vec!["C", "B", "A"]);
    for (node, expected) in [("C", 0.520869), ("B", 0.281551), ("A", 0.197580)] {
        let score = result.score(node).unwrap();
        assert!((score - expected).abs() < 1e-5, "{node} = {score}, expected {expected}");
    }
}

#[test]
fn test_all_dangling_is_uniform() {
    let graph = graph_of(&[("A", &[]), ("B", &[]), ("C", &[]), ("D", &[])]);
    let result = PageRank::run(&graph, &PageRankConfig::default());

    assert_eq!(result.iterations, 1);
    for (_, score) in &result.scores {
        assert!((score - 0.25).abs() < 1e-12);
    }
}

// ============================================================================
// 5. Self-loops are rejected before ranking
// ============================================================================

#[test]
fn test_self_loop_blocks_ranking() {
    let graph = graph_of(&[("A", &["B"]), ("X", &["X"])]);

    assert!(!validate(&graph));
    assert_eq!(
        check(&graph),
        Err(ValidationError::SelfLoop { node: NodeName::from("X") })
    );
}

#[test]
fn test_empty_graph_rejected() {
    assert!(!validate(&Graph::new()));
    let err = pagerank_rs::Error::from(check(&Graph::new()).unwrap_err());
    assert_eq!(err.to_string(), "Invalid graph: graph has no nodes");
}

// ============================================================================
// 6. Structure shows up in the ranking
// ============================================================================

#[test]
fn test_hub_ranks_first() {
    let graph = graph_of(&[
        ("a", &["hub"]),
        ("b", &["hub"]),
        ("c", &["hub"]),
        ("hub", &["a"]),
    ]);
    let scores = compute_pagerank(&graph, 0.85);

    assert_eq!(order(&scores)[0], "hub");
    assert_eq!(order(&scores)[1], "a");
}

#[test]
fn test_duplicate_links_carry_weight() {
    let graph = graph_of(&[("A", &["B", "B", "C"]), ("B", &["A"]), ("C", &["A"])]);
    let result = PageRank::run(&graph, &PageRankConfig::default());

    let b = result.score("B").unwrap();
    let c = result.score("C").unwrap();
    assert!(b > c, "B = {b}, C = {c}");
}

#[test]
fn test_lower_damping_flattens_scores() {
    let graph = graph_of(&[("a", &["hub"]), ("b", &["hub"]), ("hub", &[])]);

    let spread = |d: f64| {
        let scores = compute_pagerank(&graph, d);
        scores[0].1 - scores[scores.len() - 1].1
    };
    assert!(spread(0.5) < spread(0.85));
}

// ============================================================================
// 7. Determinism and sorting
// ============================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let graph = graph_of(&[
        ("A", &["B", "C"]),
        ("B", &["C"]),
        ("C", &["A"]),
        ("D", &["C", "E"]),
    ]);
    let config = PageRankConfig::default();

    let first = PageRank::run(&graph, &config);
    let second = PageRank::run(&graph, &config);
    assert_eq!(first, second);
    for ((_, a), (_, b)) in first.scores.iter().zip(&second.scores) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_sort_twice_same_as_once() {
    let graph = graph_of(&[("A", &["B"]), ("B", &["C", "A"]), ("C", &[])]);
    let scores = compute_pagerank(&graph, 0.85);
    assert_eq!(sort_by_value(scores.clone()), scores);
}

// ============================================================================
// 8. Iteration cap
// ============================================================================

#[test]
fn test_cap_returns_last_vector() {
    let graph = graph_of(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &["A"])]);

    let capped = PageRank::run(&graph, &PageRankConfig::default().with_max_iterations(3));
    assert_eq!(capped.iterations, 3);
    assert!(!capped.converged);
    assert!((mass(&capped.scores) - 1.0).abs() < 1e-9);

    let full = PageRank::run(&graph, &PageRankConfig::default());
    assert!(full.converged);
    assert!(full.iterations > 3);
    assert!(full.iterations <= 100);
}
