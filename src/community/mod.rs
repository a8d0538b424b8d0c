//! Community detection over the premolecule similarity graph.
//!
//! The partitioners here optimize (or approximate) **modularity**: the
//! total weight of intra-community edges compared against the weight
//! expected in a random graph with the same degree sequence,
//!
//! ```text
//! Q = (1/2m) × Σ[A_ij - γ(k_i × k_j)/(2m)] × δ(c_i, c_j)
//! ```
//!
//! where m is the total edge weight, A_ij the weight between i and j, k_i
//! the weighted degree of i, and γ the resolution parameter (γ > 1 favors
//! smaller communities). Since this graph's weights are inverse distances,
//! premolecules separated by small distances carry heavy edges and are
//! pulled into the same community.
//!
//! Any type implementing [`CommunityPartitioner`] can drive the pipeline.
//! Two implementations ship:
//!
//! - [`Louvain`] — multi-level greedy modularity optimization
//!   (Blondel et al. 2008), the default.
//! - [`LabelPropagation`] — O(E) weighted label spreading, fast but
//!   approximate.
//!
//! Community ids carry no meaning beyond identity: they are consecutive
//! non-negative integers in first-seen node order, and two runs may number
//! (or even shape) communities differently.

mod label_prop;
mod louvain;
mod traits;

pub use label_prop::LabelPropagation;
pub use louvain::Louvain;
pub use traits::CommunityPartitioner;

use std::collections::HashMap;

/// Renumber arbitrary labels to consecutive ids starting at zero, in
/// first-seen order.
pub(crate) fn compact_labels(labels: Vec<usize>) -> Vec<usize> {
    let mut ids: HashMap<usize, usize> = HashMap::new();
    labels
        .into_iter()
        .map(|label| {
            let next = ids.len();
            *ids.entry(label).or_insert(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_labels_renumbers_in_first_seen_order() {
        assert_eq!(compact_labels(vec![7, 7, 3, 7, 3, 9]), vec![0, 0, 1, 0, 1, 2]);
        assert_eq!(compact_labels(vec![]), vec![]);
    }
}
