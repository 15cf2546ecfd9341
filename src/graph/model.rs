//! Generic graph disambiguation model
//!
//! Strategies work on these types only. They know a surface form by its name
//! and a sense by its (canonical) URI; everything else stays on the caller's
//! side of the adapter.

use std::fmt;
use std::hash::Hash;

/// A mention as seen by graph strategies
pub trait SurfaceForm: Clone + Eq + Hash + fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// A candidate sense as seen by graph strategies
pub trait Sense: Clone + fmt::Debug + Send + Sync {
    /// Canonical URI, used for knowledge graph vertex lookups
    fn full_uri(&self) -> &str;
}

/// A sense scored for a surface form
#[derive(Debug, Clone, PartialEq)]
pub struct SenseScore<F, S> {
    surface_form: F,
    sense: S,
    score: f64,
}

impl<F, S> SenseScore<F, S> {
    pub fn new(surface_form: F, sense: S, score: f64) -> Self {
        Self {
            surface_form,
            sense,
            score,
        }
    }

    pub fn surface_form(&self) -> &F {
        &self.surface_form
    }

    pub fn sense(&self) -> &S {
        &self.sense
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn into_parts(self) -> (F, S, f64) {
        (self.surface_form, self.sense, self.score)
    }
}

impl<F: SurfaceForm, S: Sense> fmt::Display for SenseScore<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} --> {}",
            self.surface_form.name(),
            self.sense.full_uri(),
            self.score
        )
    }
}

/// Candidate senses per surface form, in mention order
#[derive(Debug, Clone)]
pub struct SurfaceFormSenses<F, S> {
    entries: Vec<(F, Vec<S>)>,
}

impl<F, S> Default for SurfaceFormSenses<F, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: SurfaceForm, S: Sense> SurfaceFormSenses<F, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, surface_form: F, senses: Vec<S>) {
        self.entries.push((surface_form, senses));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &[S])> {
        self.entries.iter().map(|(f, s)| (f, s.as_slice()))
    }

    pub fn total_senses(&self) -> usize {
        self.entries.iter().map(|(_, s)| s.len()).sum()
    }
}

/// Strategy output: scored senses per surface form
#[derive(Debug, Clone)]
pub struct SurfaceFormSenseScores<F, S> {
    entries: Vec<(F, Vec<SenseScore<F, S>>)>,
}

impl<F, S> Default for SurfaceFormSenseScores<F, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<F: SurfaceForm, S: Sense> SurfaceFormSenseScores<F, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface_form: F, scores: Vec<SenseScore<F, S>>) {
        self.entries.push((surface_form, scores));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, surface_form: &F) -> Option<&[SenseScore<F, S>]> {
        self.entries
            .iter()
            .find(|(f, _)| f == surface_form)
            .map(|(_, s)| s.as_slice())
    }

    /// All scores, mention by mention
    pub fn flatten(self) -> Vec<SenseScore<F, S>> {
        self.entries.into_iter().flat_map(|(_, s)| s).collect()
    }
}

impl<F, S> IntoIterator for SurfaceFormSenseScores<F, S> {
    type Item = (F, Vec<SenseScore<F, S>>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
