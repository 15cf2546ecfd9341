//! Candidate gathering and filtering
//!
//! ```text
//! mentions ──► gather() ──► CandidateSet ──► CandidateFilterPipeline ──► CandidateSet
//!                 │                              │
//!          CandidateSearcher              min_support / best_k_prior / best_k_support
//!          (NotFound → empty)             (order from configuration)
//! ```
//!
//! Every step keeps exactly one entry per distinct mention. Filters only
//! shrink candidate lists, they never remove mentions.

pub mod filter;
pub mod gatherer;
pub mod searcher;
pub mod set;

pub use filter::{
    BestKByPrior, BestKBySupport, CandidateFilter, CandidateFilterPipeline, MinSupportFilter,
};
pub use gatherer::gather;
pub use searcher::{CandidateSearcher, InMemoryCandidateSearcher};
pub use set::{CandidateEntry, CandidateSet};
