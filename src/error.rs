use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias for `premolecule2community`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, partitioning, or projecting the
/// premolecule similarity graph.
#[derive(Debug)]
pub enum Error {
    /// A distance in the edge list was zero, negative, non-finite, or not a
    /// number at all. The graph cannot be partitioned safely after this.
    InvalidWeight {
        /// Line of the edge list holding the bad value.
        line: u64,
        /// The raw field as it appeared in the input.
        value: String,
    },

    /// An input row carries fewer fields than the format requires.
    MalformedRow {
        /// Line of the offending row.
        line: u64,
        /// Minimum number of fields required.
        expected: usize,
        /// Number of fields found.
        found: usize,
    },

    /// A read referenced through the partition has no barcode assignment.
    /// Indicates the edge list and the assignment table disagree.
    UnknownRead {
        /// Read identifier.
        read: String,
        /// Premolecule the read was reached through.
        premolecule: String,
    },

    /// The edge list header lacks a required named column.
    MissingColumn {
        /// Column name.
        column: &'static str,
    },

    /// A partition does not cover the graph it is being projected from.
    PartitionMismatch {
        /// Nodes in the graph.
        nodes: usize,
        /// Labels in the partition.
        labels: usize,
    },

    /// An input file could not be opened or its compression decoded.
    Open {
        /// Offending path.
        path: PathBuf,
        /// Underlying niffler error.
        source: niffler::Error,
    },

    /// I/O failure on an already-open stream.
    Io {
        /// What was being read or written.
        context: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// CSV machinery failure (unbalanced quotes, invalid UTF-8, ...).
    Csv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidWeight { line, value } => write!(
                f,
                "invalid distance '{value}' at line {line}: distances must be positive finite numbers"
            ),
            Error::MalformedRow { line, expected, found } => write!(
                f,
                "malformed row at line {line}: expected at least {expected} fields, found {found}"
            ),
            Error::UnknownRead { read, premolecule } => write!(
                f,
                "read '{read}' of premolecule '{premolecule}' has no barcode assignment"
            ),
            Error::MissingColumn { column } => {
                write!(f, "edge list header is missing required column '{column}'")
            }
            Error::PartitionMismatch { nodes, labels } => {
                write!(f, "partition carries {labels} labels for a graph of {nodes} nodes")
            }
            Error::Open { path, .. } => write!(f, "cannot open '{}'", path.display()),
            Error::Io { context, .. } => write!(f, "i/o failure on {context}"),
            Error::Csv(_) => write!(f, "invalid csv data"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Io { source, .. } => Some(source),
            Error::Csv(source) => Some(source),
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(source: csv::Error) -> Self {
        Error::Csv(source)
    }
}
