//! Result tables

use mention_types::{ScoredResolution, SurfaceFormOccurrence};
use serde::Serialize;

/// Resolutions for one mention, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub occurrence: SurfaceFormOccurrence,
    pub resolutions: Vec<ScoredResolution>,
}

/// Final disambiguation output.
///
/// Entries are ordered by ascending mention offset and each entry's
/// resolutions by descending score. Only the assembler builds tables, so
/// the ordering always holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    entries: Vec<ResultEntry>,
}

impl ResultTable {
    /// Caller guarantees the ordering invariant
    pub(crate) fn from_sorted(entries: Vec<ResultEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, occurrence: &SurfaceFormOccurrence) -> Option<&[ScoredResolution]> {
        self.entries
            .iter()
            .find(|e| &e.occurrence == occurrence)
            .map(|e| e.resolutions.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter()
    }

    pub fn mentions(&self) -> impl Iterator<Item = &SurfaceFormOccurrence> {
        self.entries.iter().map(|e| &e.occurrence)
    }

    /// Total resolutions across all mentions
    pub fn total_resolutions(&self) -> usize {
        self.entries.iter().map(|e| e.resolutions.len()).sum()
    }

    /// Best resolution per mention, in offset order. Mentions without any
    /// resolution are left out.
    pub fn into_best(self) -> Vec<ScoredResolution> {
        self.entries
            .into_iter()
            .filter_map(|e| e.resolutions.into_iter().next())
            .collect()
    }
}
