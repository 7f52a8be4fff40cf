use super::PathOptions;
use crate::error::Result;
use crate::limits::TimeoutGuard;
use crate::model::Edge;
use crate::store::GraphStore;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, warn};
use uuid::Uuid;

struct BfsState {
    queue: VecDeque<(Uuid, usize)>,
    visited: FxHashSet<Uuid>,
    parents: FxHashMap<Uuid, (Uuid, Edge)>,
    edges_seen: usize,
}

impl BfsState {
    fn new(start: Uuid) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();

        queue.push_back((start, 0));
        visited.insert(start);

        Self {
            queue,
            visited,
            parents: FxHashMap::default(),
            edges_seen: 0,
        }
    }

    fn visit_neighbor(&mut self, neighbor: Uuid, current: Uuid, edge: Edge, depth: usize) {
        if !self.visited.contains(&neighbor) {
            self.visited.insert(neighbor);
            self.parents.insert(neighbor, (current, edge));
            self.queue.push_back((neighbor, depth));
        }
    }
}

/// Walks the parent map back from target to start and returns the edge
/// sequence in path order.
pub(super) fn trace_edges(
    parents: &FxHashMap<Uuid, (Uuid, Edge)>,
    start: Uuid,
    target: Uuid,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut current = target;

    while current != start {
        let (parent, edge) = &parents[&current];
        edges.push(edge.clone());
        current = *parent;
    }

    edges.reverse();
    edges
}

pub(super) async fn run_bfs<S: GraphStore + ?Sized>(
    store: &S,
    start: Uuid,
    target: Uuid,
    options: &PathOptions,
    guard: &TimeoutGuard,
) -> Result<Option<Vec<Edge>>> {
    let max_depth = options.clamped_depth();
    let edge_query = options.edge_query();
    let mut state = BfsState::new(start);

    while let Some((current, depth)) = state.queue.pop_front() {
        if guard.is_expired() {
            warn!(
                elapsed_ms = guard.elapsed_ms(),
                visited = state.visited.len(),
                "shortest-path search timed out"
            );
            return Ok(None);
        }
        if current == target {
            return Ok(Some(trace_edges(&state.parents, start, target)));
        }
        if depth >= max_depth {
            continue;
        }
        if state.visited.len() > options.max_nodes || state.edges_seen > options.max_edges {
            warn!(
                visited = state.visited.len(),
                edges_seen = state.edges_seen,
                "shortest-path search exceeded expansion budget"
            );
            return Ok(None);
        }

        let edges = store.fetch_edges(current, &edge_query).await?;
        state.edges_seen += edges.len();
        for edge in edges {
            let neighbor = edge.other(current);
            state.visit_neighbor(neighbor, current, edge, depth + 1);
        }
    }

    debug!(
        visited = state.visited.len(),
        elapsed_ms = guard.elapsed_ms(),
        "no path within depth bound"
    );
    Ok(None)
}
