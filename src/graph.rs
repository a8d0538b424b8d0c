//! The premolecule similarity graph.
//!
//! Nodes are premolecule identifiers, edges carry an inverse-distance
//! weight: the closer two premolecules sit, the stronger the pull toward
//! sharing a community.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

/// Undirected weighted graph over premolecule identifiers.
///
/// At most one edge exists per unordered node pair; inserting the same pair
/// again overwrites the previous weight instead of accumulating it.
#[derive(Debug, Default)]
pub struct SimilarityGraph {
    graph: UnGraph<String, f64>,
    indices: HashMap<String, NodeIndex>,
}

impl SimilarityGraph {
    /// Create an empty similarity graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge between two premolecules, creating either node if absent.
    ///
    /// The weight must already be the final edge weight (an inverse
    /// distance). A later insertion for the same unordered pair replaces the
    /// stored weight.
    pub fn upsert_edge(&mut self, source: &str, target: &str, weight: f64) {
        let a = self.node(source);
        let b = self.node(target);
        self.graph.update_edge(a, b, weight);
    }

    fn node(&mut self, premolecule: &str) -> NodeIndex {
        if let Some(&index) = self.indices.get(premolecule) {
            index
        } else {
            let index = self.graph.add_node(premolecule.to_string());
            self.indices.insert(premolecule.to_string(), index);
            index
        }
    }

    /// Number of premolecule nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a premolecule became a graph node.
    pub fn contains(&self, premolecule: &str) -> bool {
        self.indices.contains_key(premolecule)
    }

    /// Current weight between two premolecules, if both exist and are
    /// connected.
    pub fn weight_between(&self, a: &str, b: &str) -> Option<f64> {
        let a = *self.indices.get(a)?;
        let b = *self.indices.get(b)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// The underlying petgraph structure, for partitioning and projection.
    pub fn inner(&self) -> &UnGraph<String, f64> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_weight_is_stored_as_given() {
        let mut graph = SimilarityGraph::new();
        graph.upsert_edge("P1", "P2", 1.0 / 4.0);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight_between("P1", "P2"), Some(0.25));
    }

    #[test]
    fn duplicate_pair_overwrites_weight() {
        let mut graph = SimilarityGraph::new();
        graph.upsert_edge("P1", "P2", 0.5);
        graph.upsert_edge("P2", "P1", 0.125);

        // Last write wins, regardless of pair orientation, no accumulation.
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight_between("P1", "P2"), Some(0.125));
        assert_eq!(graph.weight_between("P2", "P1"), Some(0.125));
    }

    #[test]
    fn n_rows_bound_nodes_and_edges() {
        let mut graph = SimilarityGraph::new();
        graph.upsert_edge("P1", "P2", 1.0);
        graph.upsert_edge("P2", "P3", 1.0);
        graph.upsert_edge("P1", "P3", 1.0);

        assert!(graph.edge_count() <= 3);
        assert!(graph.node_count() <= 6);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn contains_tracks_nodes() {
        let mut graph = SimilarityGraph::new();
        graph.upsert_edge("P1", "P2", 1.0);

        assert!(graph.contains("P1"));
        assert!(!graph.contains("P3"));
        assert_eq!(graph.weight_between("P1", "P3"), None);
    }
}
