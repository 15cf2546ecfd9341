//! Candidate filter pipeline
//!
//! Bounds the candidate space before the graph strategies run. Three stage
//! kinds are available, each enabled by a positive threshold:
//!
//! | Stage            | Keeps                                              |
//! |------------------|----------------------------------------------------|
//! | `min_support`    | candidates with `support >= threshold`             |
//! | `best_k_support` | the k candidates with highest support per mention  |
//! | `best_k_prior`   | the k candidates with highest prior per mention    |
//!
//! Stages never mutate their input. Each returns a new [`CandidateSet`] with
//! the same mentions in the same order, so any ordering of stages is
//! well-defined. Best-k ties go to the candidate seen first in lookup order,
//! and retained candidates keep their lookup order.

use mention_types::CandidateEntity;
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, info, warn};

use super::set::CandidateSet;
use crate::config::{FilterConfig, FilterKind};

/// A single filter stage
pub trait CandidateFilter: Send + Sync + fmt::Debug {
    /// Stage name used in logs
    fn name(&self) -> &'static str;

    /// Produce a filtered copy of `set`. Must keep every mention.
    fn filter(&self, set: &CandidateSet) -> CandidateSet;
}

/// Drops candidates whose support is strictly below `min_support`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinSupportFilter {
    pub min_support: u64,
}

impl CandidateFilter for MinSupportFilter {
    fn name(&self) -> &'static str {
        FilterKind::MinSupport.as_str()
    }

    fn filter(&self, set: &CandidateSet) -> CandidateSet {
        set.map_candidates(|entry| {
            entry
                .candidates
                .iter()
                .filter(|c| c.support >= self.min_support)
                .cloned()
                .collect()
        })
    }
}

/// Keeps the `k` candidates with highest support per mention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestKBySupport {
    pub k: usize,
}

impl CandidateFilter for BestKBySupport {
    fn name(&self) -> &'static str {
        FilterKind::BestKSupport.as_str()
    }

    fn filter(&self, set: &CandidateSet) -> CandidateSet {
        set.map_candidates(|entry| {
            keep_best_k(&entry.candidates, self.k, |a, b| b.support.cmp(&a.support))
        })
    }
}

/// Keeps the `k` candidates with highest prior per mention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestKByPrior {
    pub k: usize,
}

impl CandidateFilter for BestKByPrior {
    fn name(&self) -> &'static str {
        FilterKind::BestKPrior.as_str()
    }

    fn filter(&self, set: &CandidateSet) -> CandidateSet {
        set.map_candidates(|entry| {
            keep_best_k(&entry.candidates, self.k, |a, b| b.prior.total_cmp(&a.prior))
        })
    }
}

/// Select the first `k` candidates under `rank` (a stable sort, so equal
/// ranks keep lookup order) and return them in their original order.
fn keep_best_k<F>(candidates: &[CandidateEntity], k: usize, rank: F) -> Vec<CandidateEntity>
where
    F: Fn(&CandidateEntity, &CandidateEntity) -> Ordering,
{
    if candidates.len() <= k {
        return candidates.to_vec();
    }

    let mut ranked: Vec<usize> = (0..candidates.len()).collect();
    ranked.sort_by(|&a, &b| rank(&candidates[a], &candidates[b]));
    ranked.truncate(k);
    ranked.sort_unstable();

    ranked.into_iter().map(|i| candidates[i].clone()).collect()
}

/// Ordered chain of filter stages
#[derive(Debug, Default)]
pub struct CandidateFilterPipeline {
    stages: Vec<Box<dyn CandidateFilter>>,
}

impl CandidateFilterPipeline {
    /// Empty pipeline (passes candidates through unchanged)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn with_stage(mut self, stage: Box<dyn CandidateFilter>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Build the enabled stages in the configured order
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut pipeline = Self::new();

        for kind in &config.order {
            let Some(threshold) = config.threshold(*kind) else {
                continue;
            };
            let stage: Box<dyn CandidateFilter> = match kind {
                FilterKind::MinSupport => Box::new(MinSupportFilter {
                    min_support: threshold,
                }),
                FilterKind::BestKSupport => Box::new(BestKBySupport {
                    k: threshold as usize,
                }),
                FilterKind::BestKPrior => Box::new(BestKByPrior {
                    k: threshold as usize,
                }),
            };
            pipeline = pipeline.with_stage(stage);
        }

        for kind in [
            FilterKind::MinSupport,
            FilterKind::BestKSupport,
            FilterKind::BestKPrior,
        ] {
            if config.threshold(kind).is_some() && !config.order.contains(&kind) {
                warn!(
                    "Filter '{}' has a threshold but is not in the stage order; it will not run",
                    kind.as_str()
                );
            }
        }

        pipeline
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage in order, logging how many candidates each dropped
    pub fn apply(&self, set: &CandidateSet) -> CandidateSet {
        let mut current = set.clone();

        for stage in &self.stages {
            let before = current.total_candidates();
            let next = stage.filter(&current);
            debug_assert_eq!(next.len(), current.len(), "filter stage removed a mention");
            let dropped = before.saturating_sub(next.total_candidates());

            if dropped > 0 {
                info!(
                    "Filter '{}' dropped {} of {} candidates",
                    stage.name(),
                    dropped,
                    before
                );
            } else {
                debug!("Filter '{}' kept all {} candidates", stage.name(), before);
            }
            current = next;
        }

        current
    }
}
