// Tests for the link graph, in-degree and most-linked ranking

use linkmap_core::config::NodeSizing;
use linkmap_core::graph::LinkGraph;
use linkmap_core::model::{EdgeRecord, RankedTarget};
use linkmap_core::ranking::rank_targets;

fn edges(pairs: &[(&str, &str)]) -> Vec<EdgeRecord> {
    pairs
        .iter()
        .map(|(s, t)| EdgeRecord::new(*s, *t, None))
        .collect()
}

fn ranked(target: &str, count: usize) -> RankedTarget {
    RankedTarget {
        target: target.to_string(),
        count,
    }
}

// ============================================================================
// Graph construction
// ============================================================================

#[test]
fn test_nodes_are_union_of_sources_and_targets() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "b"), ("c", "b"), ("b", "d")]));
    let nodes: Vec<&str> = graph.nodes().collect();
    assert_eq!(nodes, vec!["a", "b", "c", "d"]);
    assert_eq!(graph.edge_count(), 3);
    assert!(graph.contains("d"));
    assert!(!graph.contains("e"));
}

#[test]
fn test_duplicate_records_collapse_to_one_edge() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "b"), ("a", "b"), ("a", "b")]));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.in_degree("b"), 1);
    assert_eq!(graph.out_degree("a"), 1);
}

#[test]
fn test_in_degree_counts_distinct_sources() {
    let graph = LinkGraph::from_edges(&edges(&[
        ("a", "x"),
        ("b", "x"),
        ("a", "x"),
        ("c", "x"),
        ("x", "a"),
    ]));
    assert_eq!(graph.in_degree("x"), 3);
    assert_eq!(graph.in_degree("a"), 1);
    assert_eq!(graph.in_degree("b"), 0);
    assert_eq!(graph.in_degree("missing"), 0);
}

#[test]
fn test_self_link_counts_once() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "a"), ("a", "a")]));
    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.in_degree("a"), 1);
}

#[test]
fn test_degree_map_covers_every_node() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "b"), ("c", "b")]));
    let degrees = graph.degree_map();
    assert_eq!(degrees.len(), 3);
    assert_eq!(degrees["a"], 0);
    assert_eq!(degrees["b"], 2);
    assert_eq!(degrees["c"], 0);
}

#[test]
fn test_links_lists_distinct_pairs_in_order() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "b"), ("b", "c"), ("a", "b")]));
    let links: Vec<(&str, &str)> = graph.links().collect();
    assert_eq!(links, vec![("a", "b"), ("b", "c")]);
}

// ============================================================================
// Node sizing
// ============================================================================

#[test]
fn test_node_size_grows_with_in_degree() {
    let sizing = NodeSizing::default();
    assert_eq!(sizing.size_for(0), 10);
    assert_eq!(sizing.size_for(1), 13);
    assert_eq!(sizing.size_for(5), 25);
}

#[test]
fn test_node_stats_use_sizing() {
    let graph = LinkGraph::from_edges(&edges(&[("a", "b"), ("c", "b")]));
    let stats = graph.node_stats(&NodeSizing { base: 1, scale: 10 });
    let b = stats.iter().find(|n| n.id == "b").unwrap();
    assert_eq!(b.in_degree, 2);
    assert_eq!(b.out_degree, 0);
    assert_eq!(b.size, 21);
}

// ============================================================================
// Ranking
// ============================================================================

#[test]
fn test_ranking_counts_raw_records() {
    let records = edges(&[("a", "x"), ("a", "x"), ("b", "x"), ("a", "y")]);
    let ranking = rank_targets(&records, 20);
    assert_eq!(ranking, vec![ranked("x", 3), ranked("y", 1)]);
}

#[test]
fn test_ranking_ties_keep_first_seen_order() {
    let records = edges(&[("s", "c"), ("s", "a"), ("s", "b"), ("t", "b"), ("t", "c")]);
    let ranking = rank_targets(&records, 20);
    assert_eq!(ranking, vec![ranked("c", 2), ranked("b", 2), ranked("a", 1)]);
}

#[test]
fn test_ranking_truncates_to_top_n_even_on_ties() {
    let pairs: Vec<(String, String)> = (0..25)
        .map(|i| ("src".to_string(), format!("page-{}", i)))
        .collect();
    let records: Vec<EdgeRecord> = pairs
        .iter()
        .map(|(s, t)| EdgeRecord::new(s.as_str(), t.as_str(), None))
        .collect();

    let ranking = rank_targets(&records, 20);
    assert_eq!(ranking.len(), 20);
    assert_eq!(ranking[0].target, "page-0");
    assert_eq!(ranking[19].target, "page-19");
}

#[test]
fn test_ranking_is_sorted_descending() {
    let records = edges(&[
        ("a", "low"),
        ("a", "high"),
        ("b", "high"),
        ("c", "high"),
        ("a", "mid"),
        ("b", "mid"),
    ]);
    let ranking = rank_targets(&records, 20);
    for pair in ranking.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert_eq!(ranking[0], ranked("high", 3));
}
