//! # premolecule2community
//!
//! Assign community labels to linked reads by partitioning a premolecule
//! similarity graph.
//!
//! A premolecule is a provisional grouping of reads believed to originate
//! from one source molecule. Given an edge list of premolecule pairs with
//! distances, and a table assigning reads to premolecules, this crate:
//!
//! 1. builds an undirected graph weighted by inverse distance
//!    ([`SimilarityGraph`]),
//! 2. partitions it into communities with a modularity-based algorithm
//!    (the [`community`] module, [`Louvain`] by default), and
//! 3. projects the community labels back onto every read and its barcode
//!    (the [`project`] module).
//!
//! Reads whose premolecule never appears in the edge list receive no
//! label; this exclusion is intentional, not an error.

pub mod community;
pub mod error;
pub mod graph;
pub mod index;
pub mod parse;
pub mod project;

pub use community::{CommunityPartitioner, LabelPropagation, Louvain};
pub use error::{Error, Result};
pub use graph::SimilarityGraph;
pub use index::ReadIndex;
pub use project::OutputRow;
