//! Mention Types - Level 1 Foundation Types
//!
//! Immutable value types shared by every layer of the collective
//! disambiguation engine.
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! This crate depends on nothing else in the workspace. The engine crate
//! builds candidate sets, filter stages and result tables on top of these
//! three values:
//!
//! - [`SurfaceFormOccurrence`] - one mention of a surface form at an offset
//! - [`CandidateEntity`] - a knowledge base entity with lookup statistics
//! - [`ScoredResolution`] - a mention resolved to an entity with a score
//!
//! ## Rules
//!
//! 1. **NO BUSINESS LOGIC** - constructors, accessors and Display only
//! 2. **SERIALIZABLE** - all types support serde
//! 3. **THREAD SAFE** - all types are Send + Sync

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// SURFACE FORM OCCURRENCE
// ============================================================================

/// One occurrence of a surface form in a document.
///
/// Identity is the pair (surface text, text offset). Two occurrences of
/// "Paris" at offsets 0 and 20 are different mentions and never merge.
/// The context is carried along for downstream consumers but does not take
/// part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceFormOccurrence {
    surface_form: String,
    #[serde(default)]
    context: String,
    text_offset: usize,
}

impl SurfaceFormOccurrence {
    /// Create a new occurrence
    pub fn new(
        surface_form: impl Into<String>,
        context: impl Into<String>,
        text_offset: usize,
    ) -> Self {
        Self {
            surface_form: surface_form.into(),
            context: context.into(),
            text_offset,
        }
    }

    /// Literal surface text of the mention
    pub fn surface_form(&self) -> &str {
        &self.surface_form
    }

    /// Surrounding text the mention was spotted in
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Character offset of the mention in the source document
    pub fn text_offset(&self) -> usize {
        self.text_offset
    }
}

impl PartialEq for SurfaceFormOccurrence {
    fn eq(&self, other: &Self) -> bool {
        self.text_offset == other.text_offset && self.surface_form == other.surface_form
    }
}

impl Eq for SurfaceFormOccurrence {}

impl Hash for SurfaceFormOccurrence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.surface_form.hash(state);
        self.text_offset.hash(state);
    }
}

impl fmt::Display for SurfaceFormOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.surface_form, self.text_offset)
    }
}

// ============================================================================
// CANDIDATE ENTITY
// ============================================================================

/// A knowledge base entity returned by the candidate lookup.
///
/// `uri` is kept exactly as the lookup returned it, which may be
/// percent-encoded (`Company_%28military_unit%29`). Decoding happens in the
/// graph model adapter, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntity {
    /// Canonical entity URI as returned by the lookup
    pub uri: String,
    /// Corpus frequency of this entity as the target of any mention
    #[serde(default)]
    pub support: u64,
    /// P(entity | surface form) or P(entity)
    #[serde(default)]
    pub prior: f64,
}

impl CandidateEntity {
    /// Create a new candidate entity
    pub fn new(uri: impl Into<String>, support: u64, prior: f64) -> Self {
        Self {
            uri: uri.into(),
            support,
            prior,
        }
    }
}

impl fmt::Display for CandidateEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (support={})", self.uri, self.support)
    }
}

// ============================================================================
// SCORED RESOLUTION
// ============================================================================

/// A mention resolved to one candidate entity.
///
/// The score scale belongs to the scoring strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResolution {
    pub occurrence: SurfaceFormOccurrence,
    pub entity: CandidateEntity,
    pub score: f64,
}

impl ScoredResolution {
    pub fn new(occurrence: SurfaceFormOccurrence, entity: CandidateEntity, score: f64) -> Self {
        Self {
            occurrence,
            entity,
            score,
        }
    }
}

impl fmt::Display for ScoredResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:.4})",
            self.occurrence, self.entity.uri, self.score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_occurrence_identity_includes_offset() {
        let first = SurfaceFormOccurrence::new("Paris", "Paris is nice", 0);
        let second = SurfaceFormOccurrence::new("Paris", "Paris is nice", 20);
        assert_ne!(first, second);

        let set: HashSet<_> = [first.clone(), second.clone()].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_occurrence_context_not_part_of_identity() {
        let a = SurfaceFormOccurrence::new("Berlin", "in Berlin", 3);
        let b = SurfaceFormOccurrence::new("Berlin", "", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_candidate_defaults_from_yaml() {
        let entity: CandidateEntity =
            serde_yaml::from_str("uri: http://dbpedia.org/resource/Paris").unwrap();
        assert_eq!(entity.support, 0);
        assert_eq!(entity.prior, 0.0);
    }

    #[test]
    fn test_resolution_serializable() {
        let resolution = ScoredResolution::new(
            SurfaceFormOccurrence::new("Paris", "", 4),
            CandidateEntity::new("http://dbpedia.org/resource/Paris", 500, 0.9),
            0.5,
        );

        let json = serde_json::to_string(&resolution).expect("Should serialize");
        let parsed: ScoredResolution = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(parsed, resolution);
        assert_eq!(parsed.occurrence.text_offset(), 4);
    }
}
