//! Relevance subgraphs
//!
//! A [`SubgraphConstruction`] turns the request's candidate senses into the
//! small part of the knowledge graph the scoring strategy looks at.
//!
//! [`PathSubgraphConstruction`] follows the classic path-based approach:
//!
//! ```text
//! for each candidate sense s of mention i:
//!     breadth-first search from s, up to max_distance edges
//!     every time a candidate sense of another mention j != i is reached,
//!     add the path s ... t to the subgraph (and stop expanding at t)
//! ```
//!
//! All candidate vertices known to the knowledge graph are part of the
//! subgraph even when no path touches them, so an isolated sense still gets
//! a (zero) score instead of disappearing.

use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::debug;

use super::model::{Sense, SurfaceForm, SurfaceFormSenses};
use super::store::KnowledgeGraph;
use crate::config::SubgraphConfig;
use crate::error::GraphError;

/// Undirected relevance subgraph keyed by sense URI
#[derive(Debug, Clone, Default)]
pub struct Subgraph {
    graph: UnGraph<String, String>,
    vertices: HashMap<String, NodeIndex>,
}

impl Subgraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, uri: &str) -> NodeIndex {
        if let Some(&idx) = self.vertices.get(uri) {
            return idx;
        }
        let idx = self.graph.add_node(uri.to_string());
        self.vertices.insert(uri.to_string(), idx);
        idx
    }

    /// Add an edge unless the two vertices are already linked
    pub fn add_edge(&mut self, from: &str, to: &str, predicate: &str) {
        let a = self.add_vertex(from);
        let b = self.add_vertex(to);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, predicate.to_string());
        }
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.vertices.contains_key(uri)
    }

    /// Number of distinct neighbours of `uri`, 0 if absent
    pub fn degree(&self, uri: &str) -> usize {
        self.vertices
            .get(uri)
            .map(|&idx| self.graph.neighbors(idx).collect::<HashSet<_>>().len())
            .unwrap_or(0)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

/// Builds the relevance subgraph for a request
pub trait SubgraphConstruction<F: SurfaceForm, S: Sense>: Send + Sync {
    /// `Ok(None)` means there is no usable subgraph (e.g. none of the
    /// candidates exist in the knowledge graph). That is a legitimate
    /// outcome, not an error.
    fn create_subgraph(
        &self,
        candidates: &SurfaceFormSenses<F, S>,
    ) -> Result<Option<Subgraph>, GraphError>;
}

/// Bounded-depth path search between candidate senses of different mentions
pub struct PathSubgraphConstruction {
    graph: Arc<dyn KnowledgeGraph>,
    max_distance: usize,
}

impl PathSubgraphConstruction {
    pub fn new(graph: Arc<dyn KnowledgeGraph>, settings: SubgraphConfig) -> Self {
        Self {
            graph,
            max_distance: settings.max_distance,
        }
    }

    /// Breadth-first search from `start`; adds every path ending in a
    /// candidate of a mention other than those in `own`.
    fn expand(
        &self,
        start: &str,
        own: &HashSet<usize>,
        owners: &HashMap<&str, HashSet<usize>>,
        subgraph: &mut Subgraph,
    ) -> Result<(), GraphError> {
        // child uri -> (parent uri, predicate)
        let mut parents: HashMap<String, (String, String)> = HashMap::new();
        let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
        let mut queue: VecDeque<(String, usize)> = VecDeque::from([(start.to_string(), 0)]);

        while let Some((uri, depth)) = queue.pop_front() {
            if depth >= self.max_distance {
                continue;
            }
            for neighbour in self.graph.neighbours(&uri)? {
                if !visited.insert(neighbour.uri.clone()) {
                    continue;
                }
                parents.insert(
                    neighbour.uri.clone(),
                    (uri.clone(), neighbour.predicate.clone()),
                );

                let reaches_other_mention = owners
                    .get(neighbour.uri.as_str())
                    .map(|mentions| mentions.iter().any(|m| !own.contains(m)))
                    .unwrap_or(false);

                if reaches_other_mention {
                    let mut current = neighbour.uri.clone();
                    while let Some((parent, predicate)) = parents.get(&current) {
                        subgraph.add_edge(parent, &current, predicate);
                        current = parent.clone();
                    }
                } else {
                    queue.push_back((neighbour.uri, depth + 1));
                }
            }
        }

        Ok(())
    }
}

impl<F: SurfaceForm, S: Sense> SubgraphConstruction<F, S> for PathSubgraphConstruction {
    fn create_subgraph(
        &self,
        candidates: &SurfaceFormSenses<F, S>,
    ) -> Result<Option<Subgraph>, GraphError> {
        // sense uri -> mentions it is a candidate for
        let mut owners: HashMap<&str, HashSet<usize>> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for (mention, (_, senses)) in candidates.iter().enumerate() {
            for sense in senses {
                let uri = sense.full_uri();
                let entry = owners.entry(uri).or_default();
                if entry.is_empty() {
                    order.push(uri);
                }
                entry.insert(mention);
            }
        }

        let mut subgraph = Subgraph::new();
        for uri in &order {
            if self.graph.contains_vertex(uri)? {
                subgraph.add_vertex(uri);
            } else {
                debug!("Candidate '{}' has no vertex in the knowledge graph", uri);
            }
        }

        for uri in &order {
            if !subgraph.contains(uri) {
                continue;
            }
            let own = owners.get(uri).cloned().unwrap_or_default();
            self.expand(uri, &own, &owners, &mut subgraph)?;
        }

        debug!(
            "Subgraph built: {} vertices, {} edges for {} candidate senses",
            subgraph.vertex_count(),
            subgraph.edge_count(),
            order.len()
        );

        if subgraph.is_empty() {
            return Ok(None);
        }
        Ok(Some(subgraph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::store::{InMemoryKnowledgeGraph, Triple};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Form(&'static str);

    impl SurfaceForm for Form {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[derive(Debug, Clone)]
    struct Uri(&'static str);

    impl Sense for Uri {
        fn full_uri(&self) -> &str {
            self.0
        }
    }

    fn triple(s: &str, p: &str, o: &str) -> Triple {
        Triple(s.to_string(), p.to_string(), o.to_string())
    }

    fn knowledge_graph() -> Arc<dyn KnowledgeGraph> {
        Arc::new(InMemoryKnowledgeGraph::from_triples([
            triple("Jaguar_Cars", "parent", "Tata_Motors"),
            triple("Tata_Motors", "product", "Land_Rover"),
            triple("Jaguar_animal", "habitat", "Amazon_rainforest"),
            triple("Amazon_rainforest", "country", "Brazil"),
            triple("Brazil", "hosted", "Olympics_2016"),
            triple("Land_Rover", "manufacturer", "Land_Rover_company"),
        ]))
    }

    fn candidates() -> SurfaceFormSenses<Form, Uri> {
        let mut set = SurfaceFormSenses::new();
        set.push(Form("Jaguar"), vec![Uri("Jaguar_Cars"), Uri("Jaguar_animal")]);
        set.push(Form("Land Rover"), vec![Uri("Land_Rover"), Uri("Unknown_thing")]);
        set
    }

    #[test]
    fn test_paths_between_mentions() {
        let construction =
            PathSubgraphConstruction::new(knowledge_graph(), SubgraphConfig { max_distance: 2 });
        let subgraph = construction.create_subgraph(&candidates()).unwrap().unwrap();

        // Jaguar_Cars - Tata_Motors - Land_Rover
        assert_eq!(subgraph.degree("Jaguar_Cars"), 1);
        assert_eq!(subgraph.degree("Tata_Motors"), 2);
        assert_eq!(subgraph.degree("Land_Rover"), 1);
        // candidate present but unconnected
        assert!(subgraph.contains("Jaguar_animal"));
        assert_eq!(subgraph.degree("Jaguar_animal"), 0);
        // not a candidate, not on any path
        assert!(!subgraph.contains("Brazil"));
        assert!(!subgraph.contains("Unknown_thing"));
    }

    #[test]
    fn test_distance_bound() {
        let construction =
            PathSubgraphConstruction::new(knowledge_graph(), SubgraphConfig { max_distance: 1 });
        let subgraph = construction.create_subgraph(&candidates()).unwrap().unwrap();
        assert_eq!(subgraph.edge_count(), 0);
        assert_eq!(subgraph.vertex_count(), 3);
    }

    #[test]
    fn test_no_known_candidates_is_none() {
        let mut set = SurfaceFormSenses::new();
        set.push(Form("Xyzzy"), vec![Uri("Xyzzy_thing")]);

        let construction =
            PathSubgraphConstruction::new(knowledge_graph(), SubgraphConfig::default());
        assert!(construction.create_subgraph(&set).unwrap().is_none());
    }
}
