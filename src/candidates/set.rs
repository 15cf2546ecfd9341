//! Per-request candidate sets
//!
//! A `CandidateSet` maps each mention to its ordered candidate list. Mentions
//! keep their insertion order and candidates keep their lookup order, so a
//! given input always produces the same set.

use mention_types::{CandidateEntity, SurfaceFormOccurrence};
use std::collections::HashMap;

/// One mention with its candidates
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEntry {
    pub occurrence: SurfaceFormOccurrence,
    pub candidates: Vec<CandidateEntity>,
}

/// Ordered mapping mention → candidates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: Vec<CandidateEntry>,
    /// Position of each mention in `entries`
    index: HashMap<SurfaceFormOccurrence, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert a mention with its candidates.
    ///
    /// A mention that is already present keeps its position and has its
    /// candidates replaced. Returns true when the mention was new.
    pub fn insert(
        &mut self,
        occurrence: SurfaceFormOccurrence,
        candidates: Vec<CandidateEntity>,
    ) -> bool {
        if let Some(&pos) = self.index.get(&occurrence) {
            self.entries[pos].candidates = candidates;
            return false;
        }
        self.index.insert(occurrence.clone(), self.entries.len());
        self.entries.push(CandidateEntry {
            occurrence,
            candidates,
        });
        true
    }

    pub fn contains(&self, occurrence: &SurfaceFormOccurrence) -> bool {
        self.index.contains_key(occurrence)
    }

    /// Candidates for a mention
    pub fn get(&self, occurrence: &SurfaceFormOccurrence) -> Option<&[CandidateEntity]> {
        self.index
            .get(occurrence)
            .map(|&pos| self.entries[pos].candidates.as_slice())
    }

    /// Number of mentions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CandidateEntry> {
        self.entries.iter()
    }

    pub fn mentions(&self) -> impl Iterator<Item = &SurfaceFormOccurrence> {
        self.entries.iter().map(|e| &e.occurrence)
    }

    /// Total candidates across all mentions
    pub fn total_candidates(&self) -> usize {
        self.entries.iter().map(|e| e.candidates.len()).sum()
    }

    /// True when at least one mention has a candidate left
    pub fn has_candidates(&self) -> bool {
        self.entries.iter().any(|e| !e.candidates.is_empty())
    }

    /// Build a new set with the same mentions in the same order, each
    /// candidate list replaced by `f(entry)`.
    pub fn map_candidates<F>(&self, mut f: F) -> CandidateSet
    where
        F: FnMut(&CandidateEntry) -> Vec<CandidateEntity>,
    {
        CandidateSet {
            entries: self
                .entries
                .iter()
                .map(|entry| CandidateEntry {
                    occurrence: entry.occurrence.clone(),
                    candidates: f(entry),
                })
                .collect(),
            index: self.index.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a CandidateEntry;
    type IntoIter = std::slice::Iter<'a, CandidateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
