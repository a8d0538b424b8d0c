//! CSV input layer for the two pipeline inputs.
//!
//! The edge list is comma-separated with a header naming `Source`, `Target`
//! and `Weight` columns; the weight field is a distance and the stored edge
//! weight is its inverse. The read-assignment table is headerless with
//! `read_id,premolecule_id` rows. Both files may be gzip, bzip2 or xz
//! compressed; the format is sniffed from the file content.

use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::SimilarityGraph;
use crate::index::ReadIndex;

const SOURCE_COLUMN: &str = "Source";
const TARGET_COLUMN: &str = "Target";
const WEIGHT_COLUMN: &str = "Weight";

/// Build the similarity graph from an edge-list file.
pub fn similarity_graph_from_path(path: &Path) -> Result<SimilarityGraph> {
    let (reader, _format) = niffler::from_path(path)
        .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    similarity_graph_from_reader(reader)
}

/// Build the similarity graph from edge-list CSV content.
///
/// Required columns are resolved by name so extra columns and arbitrary
/// column order are accepted. Fails with [`Error::InvalidWeight`] on any
/// distance that is not a positive finite number.
pub fn similarity_graph_from_reader<R: Read>(reader: R) -> Result<SimilarityGraph> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rows.headers()?.clone();
    let source_at = column(&headers, SOURCE_COLUMN)?;
    let target_at = column(&headers, TARGET_COLUMN)?;
    let weight_at = column(&headers, WEIGHT_COLUMN)?;
    let required = source_at.max(target_at).max(weight_at) + 1;

    let mut graph = SimilarityGraph::new();
    for row in rows.records() {
        let record = row?;
        let line = record.position().map_or(0, |p| p.line());

        let (Some(source), Some(target)) = (record.get(source_at), record.get(target_at)) else {
            return Err(Error::MalformedRow { line, expected: required, found: record.len() });
        };

        let raw = record.get(weight_at).unwrap_or("");
        let distance: f64 = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidWeight { line, value: raw.to_string() })?;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(Error::InvalidWeight { line, value: raw.to_string() });
        }

        graph.upsert_edge(source, target, 1.0 / distance);
    }

    Ok(graph)
}

/// Build the read index from a read-assignment file.
pub fn read_index_from_path(path: &Path) -> Result<ReadIndex> {
    let (reader, _format) = niffler::from_path(path)
        .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    read_index_from_reader(reader)
}

/// Build the read index from headerless `read_id,premolecule_id` rows.
///
/// Rows may carry extra trailing columns; fewer than two fields is a
/// [`Error::MalformedRow`].
pub fn read_index_from_reader<R: Read>(reader: R) -> Result<ReadIndex> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut index = ReadIndex::new();
    for row in rows.records() {
        let record = row?;
        let line = record.position().map_or(0, |p| p.line());

        let (Some(read), Some(premolecule)) = (record.get(0), record.get(1)) else {
            return Err(Error::MalformedRow { line, expected: 2, found: record.len() });
        };

        index.record(read, premolecule);
    }

    Ok(index)
}

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or(Error::MissingColumn { column: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn edge_list_builds_inverse_distance_graph() {
        let input = "Source,Target,Weight\nP1,P2,2.0\nP2,P3,4.0\n";
        let graph = similarity_graph_from_reader(input.as_bytes()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight_between("P1", "P2"), Some(0.5));
        assert_eq!(graph.weight_between("P2", "P3"), Some(0.25));
    }

    #[test]
    fn columns_are_resolved_by_name() {
        let input = "Weight,Extra,Target,Source\n2.0,x,P2,P1\n";
        let graph = similarity_graph_from_reader(input.as_bytes()).unwrap();

        assert_eq!(graph.weight_between("P1", "P2"), Some(0.5));
    }

    #[test]
    fn missing_column_is_rejected() {
        let input = "Source,Target\nP1,P2\n";
        let err = similarity_graph_from_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MissingColumn { column: "Weight" }));
    }

    #[test]
    fn duplicate_pair_takes_later_distance() {
        let input = "Source,Target,Weight\nP1,P2,2.0\nP2,P1,8.0\n";
        let graph = similarity_graph_from_reader(input.as_bytes()).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight_between("P1", "P2"), Some(0.125));
    }

    #[test]
    fn zero_distance_is_fatal() {
        let input = "Source,Target,Weight\nP1,P2,0\n";
        let err = similarity_graph_from_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::InvalidWeight { line: 2, .. }));
    }

    #[test]
    fn negative_and_non_numeric_distances_are_fatal() {
        for bad in ["-3.0", "abc", "inf", "nan", ""] {
            let input = format!("Source,Target,Weight\nP1,P2,{bad}\n");
            let err = similarity_graph_from_reader(input.as_bytes()).unwrap_err();
            assert!(
                matches!(err, Error::InvalidWeight { .. }),
                "distance '{bad}' should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn short_edge_row_is_malformed() {
        let input = "Source,Target,Weight\nP1\n";
        let err = similarity_graph_from_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MalformedRow { line: 2, found: 1, .. }));
    }

    #[test]
    fn assignment_rows_fill_the_index() {
        let input = "r1,AAA_1\nr2,AAA_1\nr3,BBB_2,extra\n";
        let index = read_index_from_reader(input.as_bytes()).unwrap();

        assert_eq!(index.read_count(), 3);
        assert_eq!(index.barcode_of("r3"), Some("BBB"));
        assert_eq!(index.reads_of("AAA_1").unwrap().len(), 2);
    }

    #[test]
    fn single_field_assignment_row_is_malformed() {
        let input = "r1,AAA_1\nr2\n";
        let err = read_index_from_reader(input.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::MalformedRow { line: 2, expected: 2, found: 1 }));
    }

    #[test]
    fn gzip_compressed_edge_list_is_read_transparently() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edges.csv.gz");

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = niffler::get_writer(
            Box::new(file),
            niffler::compression::Format::Gzip,
            niffler::Level::One,
        )
        .unwrap();
        writer.write_all(b"Source,Target,Weight\nP1,P2,2.0\n").unwrap();
        drop(writer);

        let graph = similarity_graph_from_path(&path).unwrap();
        assert_eq!(graph.weight_between("P1", "P2"), Some(0.5));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = similarity_graph_from_path(Path::new("/no/such/edges.csv")).unwrap_err();

        match err {
            Error::Open { path, .. } => assert!(path.ends_with("edges.csv")),
            other => panic!("expected Open error, got {other:?}"),
        }
    }
}
