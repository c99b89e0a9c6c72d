//! Port module - reference table and name resolution
//!
//! Resolution is exact-then-fuzzy. The fuzzy pass scans names in the order
//! they first appeared in the reference list and returns the first hit, so
//! the ordering of the reference file decides ambiguous matches. Callers rely
//! on those resolutions staying stable; do not reorder or rank the scan.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A canonical port entry from the reference table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortReference {
    /// Port code (e.g. "INNSA")
    pub code: String,

    /// Canonical display name (e.g. "Nhava Sheva")
    pub name: String,
}

impl PortReference {
    /// Create a new port reference
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Read-only lookup from lowercased port name to the references sharing it
///
/// Keys keep the order in which each lowercased name was first seen, and the
/// references under a key keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct PortIndex {
    entries: Vec<(String, Vec<PortReference>)>,
    positions: HashMap<String, usize>,
}

impl PortIndex {
    /// Build the index from the reference list
    pub fn new<I>(references: I) -> Self
    where
        I: IntoIterator<Item = PortReference>,
    {
        let mut index = Self::default();
        for reference in references {
            let key = reference.name.to_lowercase();
            match index.positions.get(&key) {
                Some(&pos) => index.entries[pos].1.push(reference),
                None => {
                    index.positions.insert(key.clone(), index.entries.len());
                    index.entries.push((key, vec![reference]));
                }
            }
        }
        index
    }

    /// Number of distinct lowercased names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no names at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a free-text port name to its canonical reference
    ///
    /// Returns `None` for missing, empty or unmatched input. Never fails.
    /// A blank name trims to "", which every key contains, so it resolves to
    /// the first reference.
    pub fn resolve(&self, name: Option<&str>) -> Option<&PortReference> {
        let name = name?;
        if name.is_empty() {
            return None;
        }
        let needle = name.trim().to_lowercase();

        if let Some(&pos) = self.positions.get(&needle) {
            return self.entries[pos].1.first();
        }

        self.entries
            .iter()
            .find(|(key, _)| needle.contains(key.as_str()) || key.contains(needle.as_str()))
            .and_then(|(_, references)| references.first())
    }
}

impl FromIterator<PortReference> for PortIndex {
    fn from_iter<I: IntoIterator<Item = PortReference>>(iter: I) -> Self {
        Self::new(iter)
    }
}
