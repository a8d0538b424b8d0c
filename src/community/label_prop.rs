//! Weighted label propagation.
//!
//! A fast approximate alternative to modularity optimization: each node
//! repeatedly adopts the label carrying the largest total incident edge
//! weight until no label changes. O(E) per sweep, but no modularity
//! guarantee.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::prelude::*;

use super::compact_labels;
use super::traits::CommunityPartitioner;
use crate::error::Result;

/// Weighted label propagation partitioner.
#[derive(Debug, Clone)]
pub struct LabelPropagation {
    max_iter: usize,
    seed: Option<u64>,
}

impl LabelPropagation {
    /// Create a partitioner with default settings.
    pub fn new() -> Self {
        Self { max_iter: 100, seed: None }
    }

    /// Set the maximum number of sweeps.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Seed the RNG driving sweep order and tie-breaking, for reproducible
    /// runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityPartitioner for LabelPropagation {
    fn partition<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut labels: Vec<usize> = (0..n).collect();
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(rand::rng()),
        };
        let mut order: Vec<usize> = (0..n).collect();

        for _ in 0..self.max_iter {
            let mut changed = false;
            order.shuffle(&mut rng);

            for &node in &order {
                // Each neighboring label votes with its total edge weight.
                let mut votes: HashMap<usize, f64> = HashMap::new();
                for edge in graph.edges(NodeIndex::new(node)) {
                    *votes.entry(labels[edge.target().index()]).or_insert(0.0) += *edge.weight();
                }
                if votes.is_empty() {
                    // Isolated node, keeps its own label.
                    continue;
                }

                let heaviest = votes.values().fold(f64::NEG_INFINITY, |best, &w| best.max(w));
                let candidates: Vec<usize> = votes
                    .iter()
                    .filter(|(_, &w)| w == heaviest)
                    .map(|(&label, _)| label)
                    .collect();
                let winner = if candidates.len() == 1 {
                    candidates[0]
                } else {
                    candidates[rng.random_range(0..candidates.len())]
                };

                if labels[node] != winner {
                    labels[node] = winner;
                    changed = true;
                }
            }

            if !changed {
                break;
            }
        }

        Ok(compact_labels(labels))
    }
}
