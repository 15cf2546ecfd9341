//! Mention model implementations of the generic graph model

use mention_types::{CandidateEntity, ScoredResolution, SurfaceFormOccurrence};
use std::sync::Arc;

use super::decode::UriDecoder;
use crate::graph::{Sense, SenseScore, SurfaceForm};

/// Generic surface form wrapping exactly one mention.
///
/// Equality and hashing go through the occurrence, so two mentions with the
/// same text at different offsets remain distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MentionSurfaceForm {
    occurrence: SurfaceFormOccurrence,
}

impl MentionSurfaceForm {
    pub fn occurrence(&self) -> &SurfaceFormOccurrence {
        &self.occurrence
    }
}

impl SurfaceForm for MentionSurfaceForm {
    fn name(&self) -> &str {
        self.occurrence.surface_form()
    }
}

/// Generic sense for a candidate entity.
///
/// Holds the decoded URI for graph lookups and the original entity, which is
/// what comes back out of the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSense {
    full_uri: String,
    resource: CandidateEntity,
}

impl ResourceSense {
    /// The entity exactly as the lookup returned it
    pub fn resource(&self) -> &CandidateEntity {
        &self.resource
    }
}

impl Sense for ResourceSense {
    fn full_uri(&self) -> &str {
        &self.full_uri
    }
}

/// Creates generic model values for the mention model.
///
/// Stateless apart from the URI decoder; cheap to clone and share.
#[derive(Clone)]
pub struct ResourceModelFactory {
    decoder: Arc<dyn UriDecoder>,
}

impl ResourceModelFactory {
    pub fn new(decoder: Arc<dyn UriDecoder>) -> Self {
        Self { decoder }
    }

    pub fn new_surface_form(&self, occurrence: &SurfaceFormOccurrence) -> MentionSurfaceForm {
        MentionSurfaceForm {
            occurrence: occurrence.clone(),
        }
    }

    pub fn new_sense(&self, resource: &CandidateEntity) -> ResourceSense {
        ResourceSense {
            full_uri: self.decoder.decode(&resource.uri).into_owned(),
            resource: resource.clone(),
        }
    }

    /// Back to the mention model, using the retained entity (never the
    /// decoded URI)
    pub fn to_resolution(
        &self,
        score: SenseScore<MentionSurfaceForm, ResourceSense>,
    ) -> ScoredResolution {
        let (surface_form, sense, score) = score.into_parts();
        ScoredResolution::new(surface_form.occurrence, sense.resource, score)
    }
}

impl std::fmt::Debug for ResourceModelFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceModelFactory").finish_non_exhaustive()
    }
}
