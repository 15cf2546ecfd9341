//! Collective scoring strategies
//!
//! A [`GraphDisambiguator`] scores every candidate sense of every mention
//! against the shared relevance subgraph, so a sense connected to the
//! candidates of other mentions wins over an isolated one.

use std::cmp::Ordering;

use super::model::{Sense, SenseScore, SurfaceForm, SurfaceFormSenseScores, SurfaceFormSenses};
use super::subgraph::Subgraph;
use crate::error::GraphError;

/// Scores candidate senses using the relevance subgraph
pub trait GraphDisambiguator<F: SurfaceForm, S: Sense>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Up to `k` best scored senses per surface form, best first
    fn best_k(
        &self,
        candidates: &SurfaceFormSenses<F, S>,
        subgraph: &Subgraph,
        k: usize,
    ) -> Result<SurfaceFormSenseScores<F, S>, GraphError>;

    /// Single best sense per surface form
    fn disambiguate(
        &self,
        candidates: &SurfaceFormSenses<F, S>,
        subgraph: &Subgraph,
    ) -> Result<Vec<SenseScore<F, S>>, GraphError> {
        Ok(self.best_k(candidates, subgraph, 1)?.flatten())
    }
}

/// Degree centrality: a sense scores its number of subgraph neighbours
/// divided by `|V| - 1`. Senses missing from the subgraph score 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DegreeCentrality;

impl DegreeCentrality {
    fn score(subgraph: &Subgraph, uri: &str) -> f64 {
        let n = subgraph.vertex_count();
        if n <= 1 {
            return 0.0;
        }
        subgraph.degree(uri) as f64 / (n - 1) as f64
    }
}

impl<F: SurfaceForm, S: Sense> GraphDisambiguator<F, S> for DegreeCentrality {
    fn name(&self) -> &'static str {
        "degree_centrality"
    }

    fn best_k(
        &self,
        candidates: &SurfaceFormSenses<F, S>,
        subgraph: &Subgraph,
        k: usize,
    ) -> Result<SurfaceFormSenseScores<F, S>, GraphError> {
        let mut results = SurfaceFormSenseScores::new();

        for (surface_form, senses) in candidates.iter() {
            let mut scores: Vec<SenseScore<F, S>> = senses
                .iter()
                .map(|sense| {
                    SenseScore::new(
                        surface_form.clone(),
                        sense.clone(),
                        Self::score(subgraph, sense.full_uri()),
                    )
                })
                .collect();
            scores.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));
            scores.truncate(k);
            results.push(surface_form.clone(), scores);
        }

        Ok(results)
    }
}
