mod bfs;
mod influence;

use crate::error::Result;
use crate::limits::{self, MAX_SEARCH_DEPTH, TimeoutGuard};
use crate::model::{Edge, GraphPath, RelationType};
use crate::store::{EdgeQuery, GraphStore};
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Knobs for a single path search. Depth is clamped to `MAX_SEARCH_DEPTH`;
/// node/edge budgets cap total expansion in dense graphs.
#[derive(Debug, Clone)]
pub struct PathOptions {
    pub max_depth: usize,
    pub timeout_ms: u64,
    pub max_nodes: usize,
    pub max_edges: usize,
    /// Restrict traversal to these relation types (all types when None).
    pub relations: Option<Vec<RelationType>>,
    /// Influence-path preferences: higher weight means the relation type is
    /// cheaper to traverse. Unlisted types default to 1.0.
    pub relation_weights: FxHashMap<RelationType, f64>,
}

impl PathOptions {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub(crate) fn clamped_depth(&self) -> usize {
        self.max_depth.min(MAX_SEARCH_DEPTH)
    }

    pub(crate) fn edge_query(&self) -> EdgeQuery {
        EdgeQuery {
            relations: self.relations.clone(),
            ..EdgeQuery::default()
        }
    }

    pub(crate) fn relation_cost(&self, relation: RelationType) -> f64 {
        let weight = self
            .relation_weights
            .get(&relation)
            .copied()
            .unwrap_or(1.0);
        if weight > 0.0 { 1.0 / weight } else { f64::INFINITY }
    }
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_SEARCH_DEPTH,
            timeout_ms: limits::DEFAULT_TIMEOUT_MS,
            max_nodes: limits::DEFAULT_MAX_NODES,
            max_edges: limits::DEFAULT_MAX_EDGES,
            relations: None,
            relation_weights: FxHashMap::default(),
        }
    }
}

/// Minimum-hop path between two nodes: breadth-first in store edge order,
/// first path found wins. Returns None when unreachable within the depth
/// bound, when a node/edge budget trips, or when the timeout expires; a
/// timed-out search never reports a partial path.
pub async fn find_shortest_path<S: GraphStore + ?Sized>(
    store: &S,
    from: Uuid,
    to: Uuid,
    options: &PathOptions,
) -> Result<Option<GraphPath>> {
    let guard = TimeoutGuard::new(options.timeout_ms);
    match bfs::run_bfs(store, from, to, options, &guard).await? {
        Some(edges) => materialize_path(store, from, edges).await,
        None => Ok(None),
    }
}

/// Weighted path favoring preferred relation types: traversal cost per edge
/// is 1 / relation weight, while the returned path still reports the sum of
/// edge weights. Same depth/timeout/budget guards as `find_shortest_path`.
pub async fn find_influence_path<S: GraphStore + ?Sized>(
    store: &S,
    from: Uuid,
    to: Uuid,
    options: &PathOptions,
) -> Result<Option<GraphPath>> {
    let guard = TimeoutGuard::new(options.timeout_ms);
    match influence::run_influence(store, from, to, options, &guard).await? {
        Some(edges) => materialize_path(store, from, edges).await,
        None => Ok(None),
    }
}

/// Hop count of the shortest path, Some(0) when from == to, None when
/// unreachable within `max_depth`.
pub async fn degrees_of_separation<S: GraphStore + ?Sized>(
    store: &S,
    from: Uuid,
    to: Uuid,
    max_depth: usize,
) -> Result<Option<usize>> {
    let options = PathOptions::with_depth(max_depth);
    let path = find_shortest_path(store, from, to, &options).await?;
    Ok(path.map(|path| path.degrees_of_separation()))
}

/// Hydrates a traced edge sequence into a full path. Bails to None if any
/// node on the walk has vanished from the store.
async fn materialize_path<S: GraphStore + ?Sized>(
    store: &S,
    start: Uuid,
    edges: Vec<Edge>,
) -> Result<Option<GraphPath>> {
    let mut ids = Vec::with_capacity(edges.len() + 1);
    ids.push(start);
    let mut current = start;
    for edge in &edges {
        current = edge.other(current);
        ids.push(current);
    }

    let mut found = store.fetch_nodes(&ids).await?;
    let mut nodes = Vec::with_capacity(ids.len());
    for id in &ids {
        match found.remove(id) {
            Some(node) => nodes.push(node),
            None => return Ok(None),
        }
    }
    Ok(Some(GraphPath { nodes, edges }))
}
