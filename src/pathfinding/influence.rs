use super::PathOptions;
use super::bfs::trace_edges;
use crate::error::Result;
use crate::limits::TimeoutGuard;
use crate::model::Edge;
use crate::store::GraphStore;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone)]
struct SearchNode {
    cost: f64,
    depth: usize,
    node: Uuid,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost
    }
}

impl Eq for SearchNode {}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default)
        // Handle NaN by treating it as Equal
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

struct InfluenceState {
    heap: BinaryHeap<SearchNode>,
    costs: FxHashMap<Uuid, f64>,
    parents: FxHashMap<Uuid, (Uuid, Edge)>,
    visited: FxHashSet<Uuid>,
    edges_seen: usize,
}

impl InfluenceState {
    fn new(start: Uuid) -> Self {
        let mut heap = BinaryHeap::new();
        let mut costs = FxHashMap::default();

        heap.push(SearchNode {
            cost: 0.0,
            depth: 0,
            node: start,
        });
        costs.insert(start, 0.0);

        Self {
            heap,
            costs,
            parents: FxHashMap::default(),
            visited: FxHashSet::default(),
            edges_seen: 0,
        }
    }

    fn relax(&mut self, neighbor: Uuid, current: Uuid, edge: Edge, new_cost: f64, depth: usize) {
        if let Some(&existing) = self.costs.get(&neighbor) {
            if new_cost >= existing {
                return;
            }
        }

        self.costs.insert(neighbor, new_cost);
        self.parents.insert(neighbor, (current, edge));
        self.heap.push(SearchNode {
            cost: new_cost,
            depth,
            node: neighbor,
        });
    }
}

pub(super) async fn run_influence<S: GraphStore + ?Sized>(
    store: &S,
    start: Uuid,
    target: Uuid,
    options: &PathOptions,
    guard: &TimeoutGuard,
) -> Result<Option<Vec<Edge>>> {
    let max_depth = options.clamped_depth();
    let edge_query = options.edge_query();
    let mut state = InfluenceState::new(start);

    while let Some(SearchNode {
        cost,
        depth,
        node: current,
    }) = state.heap.pop()
    {
        if guard.is_expired() {
            warn!(
                elapsed_ms = guard.elapsed_ms(),
                visited = state.visited.len(),
                "influence-path search timed out"
            );
            return Ok(None);
        }
        if current == target {
            return Ok(Some(trace_edges(&state.parents, start, target)));
        }
        if state.visited.contains(&current) {
            continue;
        }
        state.visited.insert(current);

        if depth >= max_depth {
            continue;
        }
        if state.visited.len() > options.max_nodes || state.edges_seen > options.max_edges {
            warn!(
                visited = state.visited.len(),
                edges_seen = state.edges_seen,
                "influence-path search exceeded expansion budget"
            );
            return Ok(None);
        }

        let edges = store.fetch_edges(current, &edge_query).await?;
        state.edges_seen += edges.len();
        for edge in edges {
            let neighbor = edge.other(current);
            let step = options.relation_cost(edge.relation);
            state.relax(neighbor, current, edge, cost + step, depth + 1);
        }
    }

    debug!(
        visited = state.visited.len(),
        elapsed_ms = guard.elapsed_ms(),
        "no influence path within depth bound"
    );
    Ok(None)
}
