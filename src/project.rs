//! Projection of community labels back onto reads and barcodes.
//!
//! The projector walks the partition (one community id per graph node) and
//! expands each premolecule node to the reads assigned to it, joining the
//! barcode of every read along the way. Premolecules that never became
//! graph nodes are therefore never visited: reads assigned to them produce
//! no output, by design. The reverse gap — a graph node whose premolecule
//! has no assigned reads — contributes zero rows and is not an error
//! either.

use std::collections::HashSet;
use std::io::Write;

use crate::error::{Error, Result};
use crate::graph::SimilarityGraph;
use crate::index::ReadIndex;

/// One projected assignment: a read, its barcode, and the community of its
/// premolecule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// Barcode identifier.
    pub barcode: String,
    /// Read identifier.
    pub read: String,
    /// Community id assigned to the read's premolecule.
    pub community: usize,
}

/// Join a partition against the read index.
///
/// `partition` must carry exactly one label per graph node, indexed by
/// `NodeIndex::index()`. Row order follows graph node order, then the
/// (unordered) read set of each premolecule.
pub fn assignments(
    graph: &SimilarityGraph,
    partition: &[usize],
    index: &ReadIndex,
) -> Result<Vec<OutputRow>> {
    let inner = graph.inner();
    if partition.len() != inner.node_count() {
        return Err(Error::PartitionMismatch {
            nodes: inner.node_count(),
            labels: partition.len(),
        });
    }

    let mut rows = Vec::new();
    for node in inner.node_indices() {
        let premolecule = &inner[node];
        let community = partition[node.index()];

        let Some(reads) = index.reads_of(premolecule) else {
            // Graph node without assigned reads: nothing to emit.
            continue;
        };

        for read in reads {
            let barcode = index.barcode_of(read).ok_or_else(|| Error::UnknownRead {
                read: read.clone(),
                premolecule: premolecule.clone(),
            })?;
            rows.push(OutputRow {
                barcode: barcode.to_string(),
                read: read.clone(),
                community,
            });
        }
    }

    Ok(rows)
}

/// Number of distinct communities referenced by a partition.
pub fn community_count(partition: &[usize]) -> usize {
    partition.iter().collect::<HashSet<_>>().len()
}

/// Write rows as headerless tab-separated `barcode read community` lines.
pub fn write_tsv<W: Write>(rows: &[OutputRow], mut out: W) -> Result<()> {
    for row in rows {
        writeln!(out, "{}\t{}\t{}", row.barcode, row.read, row.community)
            .map_err(|source| Error::Io { context: "output stream".to_string(), source })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (SimilarityGraph, ReadIndex) {
        let mut graph = SimilarityGraph::new();
        graph.upsert_edge("AAA_1", "AAA_2", 0.5);

        let mut index = ReadIndex::new();
        index.record("r1", "AAA_1");
        index.record("r2", "AAA_1");
        index.record("r3", "AAA_2");
        (graph, index)
    }

    #[test]
    fn every_partitioned_read_appears_exactly_once() {
        let (graph, index) = fixture();
        let rows = assignments(&graph, &[0, 0], &index).unwrap();

        assert_eq!(rows.len(), 3);
        let mut reads: Vec<&str> = rows.iter().map(|r| r.read.as_str()).collect();
        reads.sort_unstable();
        assert_eq!(reads, vec!["r1", "r2", "r3"]);
        assert!(rows.iter().all(|r| r.barcode == "AAA" && r.community == 0));
    }

    #[test]
    fn premolecule_absent_from_partition_is_silently_excluded() {
        let (graph, mut index) = fixture();
        // Reads assigned to a premolecule that never made it into the graph.
        index.record("r9", "ZZZ_9");

        let rows = assignments(&graph, &[0, 1], &index).unwrap();
        assert!(rows.iter().all(|r| r.read != "r9"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn graph_node_without_reads_emits_nothing() {
        let (mut graph, index) = fixture();
        graph.upsert_edge("AAA_2", "CCC_5", 1.0);

        let rows = assignments(&graph, &[0, 0, 1], &index).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.barcode == "AAA"));
    }

    #[test]
    fn missing_barcode_mapping_is_fatal() {
        let (graph, mut index) = fixture();
        index.forget_barcode("r2");

        let err = assignments(&graph, &[0, 0], &index).unwrap_err();
        match err {
            Error::UnknownRead { read, premolecule } => {
                assert_eq!(read, "r2");
                assert_eq!(premolecule, "AAA_1");
            }
            other => panic!("expected UnknownRead, got {other:?}"),
        }
    }

    #[test]
    fn partition_must_cover_the_graph() {
        let (graph, index) = fixture();
        let err = assignments(&graph, &[0], &index).unwrap_err();
        assert!(matches!(err, Error::PartitionMismatch { nodes: 2, labels: 1 }));
    }

    #[test]
    fn rows_render_as_tab_separated_lines() {
        let rows = vec![
            OutputRow { barcode: "AAA".into(), read: "r1".into(), community: 0 },
            OutputRow { barcode: "BBB".into(), read: "r2".into(), community: 12 },
        ];
        let mut out = Vec::new();
        write_tsv(&rows, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "AAA\tr1\t0\nBBB\tr2\t12\n");
    }

    #[test]
    fn community_count_ignores_label_values() {
        assert_eq!(community_count(&[0, 0, 3, 7, 3]), 3);
        assert_eq!(community_count(&[]), 0);
    }
}
