//! Read index: read to barcode, premolecule to reads.

use std::collections::{HashMap, HashSet};

/// Derive the barcode from a premolecule identifier.
///
/// The barcode is the prefix up to the first `_`; a premolecule id without
/// the delimiter is its own barcode.
pub fn barcode_of_premolecule(premolecule: &str) -> &str {
    premolecule.split('_').next().unwrap_or(premolecule)
}

/// Lookup structures built from the read-assignment table.
///
/// Both maps are filled together from (read, premolecule) pairs. A read
/// seen twice keeps its last barcode; a read listed twice under the same
/// premolecule collapses to one membership.
#[derive(Debug, Default)]
pub struct ReadIndex {
    read_to_barcode: HashMap<String, String>,
    premolecule_to_reads: HashMap<String, HashSet<String>>,
}

impl ReadIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one read-to-premolecule assignment.
    pub fn record(&mut self, read: &str, premolecule: &str) {
        let barcode = barcode_of_premolecule(premolecule);
        self.read_to_barcode.insert(read.to_string(), barcode.to_string());
        self.premolecule_to_reads
            .entry(premolecule.to_string())
            .or_default()
            .insert(read.to_string());
    }

    /// Barcode assigned to a read, if the read was ever seen.
    pub fn barcode_of(&self, read: &str) -> Option<&str> {
        self.read_to_barcode.get(read).map(String::as_str)
    }

    /// Reads belonging to a premolecule, if any were assigned to it.
    pub fn reads_of(&self, premolecule: &str) -> Option<&HashSet<String>> {
        self.premolecule_to_reads.get(premolecule)
    }

    /// Number of distinct reads.
    pub fn read_count(&self) -> usize {
        self.read_to_barcode.len()
    }

    /// Number of distinct premolecules.
    pub fn premolecule_count(&self) -> usize {
        self.premolecule_to_reads.len()
    }

    #[cfg(test)]
    pub(crate) fn forget_barcode(&mut self, read: &str) {
        self.read_to_barcode.remove(read);
    }
}
