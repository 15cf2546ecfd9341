//! Collective Linker - Graph-based Collective Entity Disambiguation
//!
//! Resolves all mentions of a document together: candidates that are
//! connected to the candidates of other mentions in a knowledge graph win
//! over isolated ones.
//!
//! ## Call Chain
//! mentions -> gather candidates -> filter pipeline -> model adapter
//! -> subgraph construction -> scoring strategy -> result assembly
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collective_linker::{
//!     CandidateEntity, CollectiveDisambiguator, CollectiveDisambiguatorService,
//!     DisambiguatorConfig, InMemoryCandidateSearcher, InMemoryKnowledgeGraph,
//!     SurfaceFormOccurrence,
//! };
//! use std::sync::Arc;
//!
//! let searcher = InMemoryCandidateSearcher::new().with_candidates(
//!     "Paris",
//!     vec![CandidateEntity::new("http://dbpedia.org/resource/Paris", 5000, 0.9)],
//! );
//! let graph = InMemoryKnowledgeGraph::new();
//! let service = CollectiveDisambiguatorService::from_config(
//!     &DisambiguatorConfig::default(),
//!     Arc::new(searcher),
//!     Arc::new(graph),
//! )?;
//!
//! let mentions = vec![SurfaceFormOccurrence::new("Paris", "Paris is in France", 0)];
//! let table = service.resolve(&mentions, 3)?;
//! assert_eq!(table.len(), 1);
//! # Ok::<(), collective_linker::DisambiguationError>(())
//! ```

// Core error handling
pub mod error;

// Configuration loading
pub mod config;

// Candidate gathering and filtering
pub mod candidates;

// Generic graph model and strategies
pub mod graph;

// Mention model <-> graph model
pub mod adapter;

// Orchestration and result assembly
pub mod disambiguate;

// Public re-exports
pub use adapter::{ModelAdapter, ResourceModelFactory, UriDecoder};
pub use candidates::{
    gather, CandidateFilter, CandidateFilterPipeline, CandidateSearcher, CandidateSet,
    InMemoryCandidateSearcher,
};
pub use config::{DisambiguatorConfig, FilterConfig, FilterKind, SubgraphConfig, UriDecoding};
pub use disambiguate::{
    CollectiveDisambiguator, CollectiveDisambiguatorService, ResultEntry, ResultTable,
};
pub use error::{ConfigError, DisambiguationError, GraphError, LookupError, Result};
pub use graph::{
    DegreeCentrality, GraphDisambiguator, InMemoryKnowledgeGraph, KnowledgeGraph,
    PathSubgraphConstruction, SubgraphConstruction,
};

// Shared mention model
pub use mention_types::{CandidateEntity, ScoredResolution, SurfaceFormOccurrence};
