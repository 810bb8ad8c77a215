use crate::config::NodeSizing;
use crate::model::{EdgeRecord, NodeStats};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Directed link graph. Duplicate (source, target) records collapse to one edge.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: &[EdgeRecord]) -> Self {
        let mut link_graph = Self::new();
        for edge in edges {
            link_graph.add_link(&edge.source, &edge.target);
        }
        debug!(
            "Built link graph: {} nodes, {} edges from {} records",
            link_graph.node_count(),
            link_graph.edge_count(),
            edges.len()
        );
        link_graph
    }

    pub fn add_link(&mut self, source: &str, target: &str) {
        let source_idx = self.get_or_create_node(source);
        let target_idx = self.get_or_create_node(target);
        self.graph.update_edge(source_idx, target_idx, ());
    }

    fn get_or_create_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Node ids in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Distinct (source, target) links in insertion order
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_indices().filter_map(|e| {
            self.graph
                .edge_endpoints(e)
                .map(|(s, t)| (self.graph[s].as_str(), self.graph[t].as_str()))
        })
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, Direction::Outgoing)
    }

    fn degree(&self, id: &str, direction: Direction) -> usize {
        self.node_map
            .get(id)
            .map(|&idx| self.graph.neighbors_directed(idx, direction).count())
            .unwrap_or(0)
    }

    /// Pages `id` links to, in the order the links were first seen
    pub fn outgoing(&self, id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest-first
        let mut targets: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        targets.reverse();
        targets
    }

    pub fn degree_map(&self) -> HashMap<String, usize> {
        self.graph
            .node_indices()
            .map(|idx| {
                (
                    self.graph[idx].clone(),
                    self.graph.neighbors_directed(idx, Direction::Incoming).count(),
                )
            })
            .collect()
    }

    /// Per-node degrees and visual size, in first-seen order
    pub fn node_stats(&self, sizing: &NodeSizing) -> Vec<NodeStats> {
        self.graph
            .node_indices()
            .map(|idx| {
                let in_degree = self.graph.neighbors_directed(idx, Direction::Incoming).count();
                NodeStats {
                    id: self.graph[idx].clone(),
                    in_degree,
                    out_degree: self.graph.neighbors_directed(idx, Direction::Outgoing).count(),
                    size: sizing.size_for(in_degree),
                }
            })
            .collect()
    }
}

/// Short display label for a page URL: host + path, or the raw id for non-URLs
pub fn display_label(id: &str) -> String {
    match url::Url::parse(id) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            let path = parsed.path();
            if path.is_empty() || path == "/" {
                format!("{}/", host)
            } else {
                format!("{}{}", host, path)
            }
        }
        Err(_) => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outgoing_keeps_insertion_order() {
        let mut graph = LinkGraph::new();
        graph.add_link("a", "b");
        graph.add_link("a", "c");
        graph.add_link("a", "d");
        assert_eq!(graph.outgoing("a"), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_display_label() {
        assert_eq!(display_label("https://example.com/blog/post"), "example.com/blog/post");
        assert_eq!(display_label("https://example.com"), "example.com/");
        assert_eq!(display_label("/relative/page"), "/relative/page");
    }
}
