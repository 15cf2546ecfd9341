//! Candidate gathering
//!
//! Looks up candidates for every mention. An unknown surface form is not an
//! error: the mention stays in the set with no candidates and the other
//! mentions are still looked up. Any other lookup failure aborts the request.

use mention_types::SurfaceFormOccurrence;
use std::time::Instant;
use tracing::{info, warn};

use super::searcher::CandidateSearcher;
use super::set::CandidateSet;
use crate::error::{LookupError, Result};

/// Gather candidates for `mentions`, one entry per distinct mention.
pub fn gather(
    mentions: &[SurfaceFormOccurrence],
    searcher: &dyn CandidateSearcher,
) -> Result<CandidateSet> {
    let timer = Instant::now();
    let mut set = CandidateSet::with_capacity(mentions.len());

    for occurrence in mentions {
        if set.contains(occurrence) {
            continue;
        }

        let candidates = match searcher.get_candidates(occurrence.surface_form()) {
            Ok(candidates) => candidates,
            Err(LookupError::NotFound { surface_form }) => {
                warn!(
                    "No candidates found for '{}' at offset {}",
                    surface_form,
                    occurrence.text_offset()
                );
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        set.insert(occurrence.clone(), candidates);
    }

    info!(
        "Found {} total resource candidates for {} surface forms. Elapsed time: {:?}",
        set.total_candidates(),
        set.len(),
        timer.elapsed()
    );

    Ok(set)
}
