//! Graph disambiguation layer
//!
//! Generic model types plus the two pluggable strategies the engine calls:
//!
//! ```text
//! SurfaceFormSenses ──► SubgraphConstruction ──► Subgraph
//!        │                                         │
//!        └──────────────► GraphDisambiguator ◄─────┘
//!                                │
//!                                ▼
//!                      SurfaceFormSenseScores
//! ```
//!
//! The in-memory knowledge graph, the path-based subgraph construction and
//! degree centrality are reference implementations; production deployments
//! plug their own in behind the same traits.

pub mod centrality;
pub mod model;
pub mod store;
pub mod subgraph;

pub use centrality::{DegreeCentrality, GraphDisambiguator};
pub use model::{Sense, SenseScore, SurfaceForm, SurfaceFormSenseScores, SurfaceFormSenses};
pub use store::{InMemoryKnowledgeGraph, KnowledgeGraph, Neighbour, Triple};
pub use subgraph::{PathSubgraphConstruction, Subgraph, SubgraphConstruction};
