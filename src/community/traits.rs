//! The partitioner contract.

use crate::error::Result;
use petgraph::graph::UnGraph;

/// A graph partitioner assigning every node to exactly one community.
///
/// Implementations are heuristic: bit-for-bit determinism across runs is
/// not part of the contract, but every node must receive exactly one
/// non-negative community id, isolated nodes included (they end up in
/// singleton communities), and the algorithm must terminate on any finite
/// graph.
pub trait CommunityPartitioner {
    /// Partition a weighted undirected graph.
    ///
    /// Returns one community id per node, indexed by `NodeIndex::index()`.
    /// An empty graph yields an empty partition.
    fn partition<N>(&self, graph: &UnGraph<N, f64>) -> Result<Vec<usize>>;

    /// Resolution parameter, for algorithms that have one.
    fn resolution(&self) -> f64 {
        1.0
    }
}
