use super::{EdgeQuery, GraphStore, NodeQuery};
use crate::error::Result;
use crate::model::{Direction, Edge, Node, RelationType};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// In-memory graph store for tests and embedded hosts. Build it mutably,
/// then share it; the trait surface is read-only so the shared graph is a
/// fixed snapshot and needs no locking.
///
/// Edges are returned in insertion order per node, which gives every
/// traversal a stable expansion order.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    nodes: FxHashMap<Uuid, Node>,
    edges: Vec<Edge>,
    adjacency: FxHashMap<Uuid, Vec<usize>>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Uuid {
        let id = node.id;
        self.adjacency.entry(id).or_default();
        self.nodes.insert(id, node);
        id
    }

    /// Registers the edge under both endpoints. Weight is clamped to [0,1].
    pub fn add_edge(&mut self, source: Uuid, target: Uuid, relation: RelationType, weight: f64) {
        let index = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            relation,
            weight: weight.clamp(0.0, 1.0),
        });
        self.adjacency.entry(source).or_default().push(index);
        if target != source {
            self.adjacency.entry(target).or_default().push(index);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge_matches(edge: &Edge, node: Uuid, query: &EdgeQuery) -> bool {
        if let Some(relations) = &query.relations {
            if !relations.contains(&edge.relation) {
                return false;
            }
        }
        if let Some(min_weight) = query.min_weight {
            if edge.weight < min_weight {
                return false;
            }
        }
        // A symmetric edge counts as both outgoing and incoming from either
        // endpoint; directed relations only match their actual orientation.
        match query.direction {
            Direction::Both => true,
            Direction::Outgoing => edge.source == node || edge.relation.is_symmetric(),
            Direction::Incoming => edge.target == node || edge.relation.is_symmetric(),
        }
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn fetch_node(&self, id: Uuid) -> Result<Option<Node>> {
        Ok(self.nodes.get(&id).cloned())
    }

    async fn fetch_edges(&self, node: Uuid, query: &EdgeQuery) -> Result<Vec<Edge>> {
        let Some(indices) = self.adjacency.get(&node) else {
            return Ok(Vec::new());
        };
        Ok(indices
            .iter()
            .map(|&index| &self.edges[index])
            .filter(|edge| Self::edge_matches(edge, node, query))
            .cloned()
            .collect())
    }

    async fn list_nodes(&self, query: &NodeQuery) -> Result<Vec<Node>> {
        let mut nodes: Vec<Node> = self
            .nodes
            .values()
            .filter(|node| query.kind.is_none_or(|kind| node.kind == kind))
            .filter(|node| match &query.country {
                Some(country) => node
                    .country
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(country)),
                None => true,
            })
            .cloned()
            .collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        if let Some(limit) = query.limit {
            nodes.truncate(limit);
        }
        Ok(nodes)
    }
}
