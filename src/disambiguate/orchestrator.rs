//! Disambiguation orchestrator
//!
//! ## Flow
//!
//! ```text
//! mentions, k
//!     │
//!     ├─► 1. validate k (before any lookup)
//!     ├─► 2. gather()                       CandidateSearcher
//!     ├─► 3. CandidateFilterPipeline
//!     ├─► 4. ModelAdapter::to_generic
//!     ├─► 5. SubgraphConstruction           (once)   None → empty table
//!     ├─► 6. GraphDisambiguator::best_k     (once)
//!     └─► 7. ModelAdapter::from_generic → assemble → ResultTable
//! ```
//!
//! Every distinct input mention appears in the returned table, with an empty
//! sequence when nothing survived. Each strategy runs at most once per
//! request and not at all when no mention has a candidate left.

use mention_types::{ScoredResolution, SurfaceFormOccurrence};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::assembler::assemble;
use super::result::ResultTable;
use crate::adapter::{
    decoder_for, MentionSurfaceForm, ModelAdapter, ResourceModelFactory, ResourceSense,
};
use crate::candidates::{gather, CandidateFilterPipeline, CandidateSearcher, CandidateSet};
use crate::config::DisambiguatorConfig;
use crate::error::{DisambiguationError, Result};
use crate::graph::{
    DegreeCentrality, GraphDisambiguator, KnowledgeGraph, PathSubgraphConstruction,
    SubgraphConstruction,
};

/// Collective disambiguation API
pub trait CollectiveDisambiguator: Send + Sync {
    /// Up to `k` scored resolutions per mention.
    ///
    /// Fails with [`DisambiguationError::InvalidInput`] when `k` is 0 and with
    /// [`DisambiguationError::SearchInfrastructure`] when the lookup service
    /// or the knowledge graph is unreachable.
    fn resolve(&self, mentions: &[SurfaceFormOccurrence], k: usize) -> Result<ResultTable>;

    /// Best resolution per mention, in offset order.
    ///
    /// Mentions with no surviving candidate are omitted, so the result can be
    /// shorter than `mentions`.
    fn resolve_best(&self, mentions: &[SurfaceFormOccurrence]) -> Result<Vec<ScoredResolution>> {
        Ok(self.resolve(mentions, 1)?.into_best())
    }
}

/// Subgraph construction over the generic mention model
pub type MentionSubgraphConstruction = dyn SubgraphConstruction<MentionSurfaceForm, ResourceSense>;

/// Scoring strategy over the generic mention model
pub type MentionGraphDisambiguator = dyn GraphDisambiguator<MentionSurfaceForm, ResourceSense>;

/// Graph-based collective disambiguator
pub struct CollectiveDisambiguatorService {
    searcher: Arc<dyn CandidateSearcher>,
    filters: CandidateFilterPipeline,
    adapter: ModelAdapter,
    subgraph_construction: Arc<MentionSubgraphConstruction>,
    disambiguator: Arc<MentionGraphDisambiguator>,
}

impl CollectiveDisambiguatorService {
    pub fn new(
        searcher: Arc<dyn CandidateSearcher>,
        filters: CandidateFilterPipeline,
        adapter: ModelAdapter,
        subgraph_construction: Arc<MentionSubgraphConstruction>,
        disambiguator: Arc<MentionGraphDisambiguator>,
    ) -> Self {
        Self {
            searcher,
            filters,
            adapter,
            subgraph_construction,
            disambiguator,
        }
    }

    /// Wire filters, URI decoding and path-based subgraph construction from
    /// configuration, scoring with degree centrality
    pub fn from_config(
        config: &DisambiguatorConfig,
        searcher: Arc<dyn CandidateSearcher>,
        knowledge_graph: Arc<dyn KnowledgeGraph>,
    ) -> Result<Self> {
        if config.subgraph.max_distance == 0 {
            return Err(DisambiguationError::Misconfiguration(
                "subgraph.max_distance must be at least 1".to_string(),
            ));
        }

        let filters = CandidateFilterPipeline::from_config(&config.filters);
        let adapter = ModelAdapter::new(ResourceModelFactory::new(decoder_for(config)));
        let construction = PathSubgraphConstruction::new(knowledge_graph, config.subgraph);

        info!(
            "Collective disambiguator configured: filters {:?}, decoding {:?}, max distance {}",
            filters.stage_names(),
            config.uri_decoding,
            config.subgraph.max_distance
        );

        Ok(Self::new(
            searcher,
            filters,
            adapter,
            Arc::new(construction),
            Arc::new(DegreeCentrality),
        ))
    }

    /// Load configuration from a YAML file, then [`Self::from_config`]
    pub fn from_config_file(
        path: &Path,
        searcher: Arc<dyn CandidateSearcher>,
        knowledge_graph: Arc<dyn KnowledgeGraph>,
    ) -> Result<Self> {
        let config = DisambiguatorConfig::load_from_file(path)?;
        Self::from_config(&config, searcher, knowledge_graph)
    }

    /// Replace the scoring strategy
    pub fn with_disambiguator(mut self, disambiguator: Arc<MentionGraphDisambiguator>) -> Self {
        self.disambiguator = disambiguator;
        self
    }

    /// Replace the subgraph construction strategy
    pub fn with_subgraph_construction(
        mut self,
        construction: Arc<MentionSubgraphConstruction>,
    ) -> Self {
        self.subgraph_construction = construction;
        self
    }

    pub fn filters(&self) -> &CandidateFilterPipeline {
        &self.filters
    }
}

/// Table with every mention of `candidates` and no resolutions
fn unresolved_table(candidates: &CandidateSet) -> ResultTable {
    assemble(candidates.mentions().map(|m| (m.clone(), Vec::new())).collect())
}

impl CollectiveDisambiguator for CollectiveDisambiguatorService {
    fn resolve(&self, mentions: &[SurfaceFormOccurrence], k: usize) -> Result<ResultTable> {
        if k == 0 {
            return Err(DisambiguationError::invalid_input("k must be at least 1"));
        }
        info!(
            "Resolving {} mentions with {} (k={})",
            mentions.len(),
            self.disambiguator.name(),
            k
        );

        let gathered = gather(mentions, self.searcher.as_ref())?;
        let filtered = self.filters.apply(&gathered);

        if !filtered.has_candidates() {
            info!("No candidates left after filtering; skipping graph strategies");
            return Ok(unresolved_table(&filtered));
        }

        let generic = self.adapter.to_generic(&filtered);

        let timer = Instant::now();
        let Some(subgraph) = self.subgraph_construction.create_subgraph(&generic)? else {
            info!("No usable subgraph for {} candidate senses", generic.total_senses());
            return Ok(unresolved_table(&filtered));
        };
        debug!(
            "Subgraph with {} vertices and {} edges built in {:?}",
            subgraph.vertex_count(),
            subgraph.edge_count(),
            timer.elapsed()
        );

        let timer = Instant::now();
        let mut scored = self.disambiguator.best_k(&generic, &subgraph, k)?;
        debug!("{} scored in {:?}", self.disambiguator.name(), timer.elapsed());

        for (surface_form, _) in generic.iter() {
            if scored.get(surface_form).is_none() {
                scored.push(surface_form.clone(), Vec::new());
            }
        }

        Ok(self.adapter.from_generic(scored))
    }
}
