//! Knowledge graph store boundary
//!
//! Subgraph construction reads the knowledge graph through
//! [`KnowledgeGraph`]. [`InMemoryKnowledgeGraph`] keeps the whole graph in a
//! petgraph `DiGraph` and is loaded from a list of triples.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ConfigError, GraphError};

/// An adjacent vertex together with the predicate linking it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbour {
    pub uri: String,
    pub predicate: String,
}

/// Read-only access to the entity relationship graph
pub trait KnowledgeGraph: Send + Sync {
    /// Whether a vertex exists for `uri`
    fn contains_vertex(&self, uri: &str) -> Result<bool, GraphError>;

    /// Vertices adjacent to `uri`, ignoring edge direction.
    ///
    /// Fails with [`GraphError::VertexNotFound`] for unknown URIs.
    fn neighbours(&self, uri: &str) -> Result<Vec<Neighbour>, GraphError>;
}

/// (subject, predicate, object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple(pub String, pub String, pub String);

#[derive(Debug, Default, Serialize, Deserialize)]
struct TripleFile {
    #[serde(default)]
    triples: Vec<Triple>,
}

/// Whole knowledge graph held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeGraph {
    graph: DiGraph<String, String>,
    vertices: HashMap<String, NodeIndex>,
}

impl InMemoryKnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = Triple>,
    {
        let mut graph = Self::new();
        for Triple(subject, predicate, object) in triples {
            graph.add_triple(&subject, &predicate, &object);
        }
        graph
    }

    /// Load from a YAML file with a `triples:` list
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: TripleFile =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self::from_triples(file.triples))
    }

    /// Add a vertex, returning the existing one if already present
    pub fn add_vertex(&mut self, uri: &str) -> NodeIndex {
        if let Some(&idx) = self.vertices.get(uri) {
            return idx;
        }
        let idx = self.graph.add_node(uri.to_string());
        self.vertices.insert(uri.to_string(), idx);
        idx
    }

    pub fn add_triple(&mut self, subject: &str, predicate: &str, object: &str) {
        let s = self.add_vertex(subject);
        let o = self.add_vertex(object);
        self.graph.add_edge(s, o, predicate.to_string());
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl KnowledgeGraph for InMemoryKnowledgeGraph {
    fn contains_vertex(&self, uri: &str) -> Result<bool, GraphError> {
        Ok(self.vertices.contains_key(uri))
    }

    fn neighbours(&self, uri: &str) -> Result<Vec<Neighbour>, GraphError> {
        let &idx = self.vertices.get(uri).ok_or_else(|| GraphError::VertexNotFound {
            uri: uri.to_string(),
        })?;

        let mut adjacent: Vec<(NodeIndex, &String)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .chain(
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .map(|e| (e.source(), e.weight())),
            )
            .collect();
        // petgraph yields edges newest first; sort for a stable traversal order
        adjacent.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

        Ok(adjacent
            .into_iter()
            .map(|(node, predicate)| Neighbour {
                uri: self.graph[node].clone(),
                predicate: predicate.clone(),
            })
            .collect())
    }
}
