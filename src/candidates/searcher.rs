//! Candidate lookup service boundary
//!
//! The engine only depends on [`CandidateSearcher`]. The in-memory searcher
//! is a lookup table loaded from YAML, used by the CLI and by tests.

use mention_types::CandidateEntity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, LookupError};

/// Surface form → candidate entities
pub trait CandidateSearcher: Send + Sync {
    /// Candidates for a surface form, in lookup order.
    ///
    /// Fails with [`LookupError::NotFound`] when the surface form is unknown
    /// and [`LookupError::Unavailable`] when the backing store can't be reached.
    fn get_candidates(&self, surface_form: &str) -> Result<Vec<CandidateEntity>, LookupError>;
}

/// Lookup table of candidates per surface form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCandidateSearcher {
    #[serde(default)]
    surface_forms: HashMap<String, Vec<CandidateEntity>>,
}

impl InMemoryCandidateSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates for a surface form (builder style)
    pub fn with_candidates(
        mut self,
        surface_form: impl Into<String>,
        candidates: Vec<CandidateEntity>,
    ) -> Self {
        self.surface_forms.insert(surface_form.into(), candidates);
        self
    }

    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_str(&content)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.surface_forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surface_forms.is_empty()
    }
}

impl CandidateSearcher for InMemoryCandidateSearcher {
    fn get_candidates(&self, surface_form: &str) -> Result<Vec<CandidateEntity>, LookupError> {
        self.surface_forms
            .get(surface_form)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                surface_form: surface_form.to_string(),
            })
    }
}
