//! Model adapter
//!
//! Bidirectional mapping between the mention model and the generic graph
//! model:
//!
//! ```text
//! SurfaceFormOccurrence  ◄──►  MentionSurfaceForm   (identity incl. offset)
//! CandidateEntity        ◄──►  ResourceSense        (decoded URI + back-reference)
//! ScoredResolution       ◄───  SenseScore
//! ```
//!
//! The way back never re-encodes a URI: every sense carries the entity it
//! was built from.

pub mod decode;
pub mod model;

pub use decode::{
    decoder_for, PercentDecoder, SelectiveDecoder, UriDecoder, VerbatimDecoder,
    DEFAULT_SELECTIVE_ESCAPES,
};
pub use model::{MentionSurfaceForm, ResourceModelFactory, ResourceSense};

use crate::candidates::CandidateSet;
use crate::disambiguate::assembler::assemble;
use crate::disambiguate::ResultTable;
use crate::graph::{SurfaceFormSenseScores, SurfaceFormSenses};

/// Candidate set in the generic model
pub type GenericCandidateSet = SurfaceFormSenses<MentionSurfaceForm, ResourceSense>;

/// Strategy output in the generic model
pub type GenericResultTable = SurfaceFormSenseScores<MentionSurfaceForm, ResourceSense>;

/// Converts between the mention model and the generic graph model
#[derive(Debug, Clone)]
pub struct ModelAdapter {
    factory: ResourceModelFactory,
}

impl ModelAdapter {
    pub fn new(factory: ResourceModelFactory) -> Self {
        Self { factory }
    }

    /// Wrap every mention and candidate, keeping the set's order
    pub fn to_generic(&self, candidates: &CandidateSet) -> GenericCandidateSet {
        let mut generic = GenericCandidateSet::with_capacity(candidates.len());
        for entry in candidates {
            let senses = entry
                .candidates
                .iter()
                .map(|c| self.factory.new_sense(c))
                .collect();
            generic.push(self.factory.new_surface_form(&entry.occurrence), senses);
        }
        generic
    }

    /// Unwrap strategy output and assemble it into an ordered table
    pub fn from_generic(&self, results: GenericResultTable) -> ResultTable {
        let rows = results
            .into_iter()
            .map(|(surface_form, scores)| {
                let resolutions = scores
                    .into_iter()
                    .map(|s| self.factory.to_resolution(s))
                    .collect();
                (surface_form.occurrence().clone(), resolutions)
            })
            .collect();
        assemble(rows)
    }
}
