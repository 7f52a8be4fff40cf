mod memory;

pub use memory::MemoryGraphStore;

use crate::error::Result;
use crate::model::{Direction, Edge, Node, NodeKind, RelationType};
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Filters for `fetch_edges`. Defaults select every edge touching the node.
#[derive(Debug, Clone, Default)]
pub struct EdgeQuery {
    pub relations: Option<Vec<RelationType>>,
    pub direction: Direction,
    pub min_weight: Option<f64>,
}

/// Filters for `list_nodes`. Results are ordered by display name ascending.
#[derive(Debug, Clone, Default)]
pub struct NodeQuery {
    pub kind: Option<NodeKind>,
    pub country: Option<String>,
    pub limit: Option<usize>,
}

/// Read-only boundary to the external graph store. Reads are idempotent and
/// uncached at this layer; missing entities come back as `Ok(None)` or an
/// empty vec, while transient outages surface as `Error::StoreUnavailable`.
///
/// The per-node edge order returned by `fetch_edges` must be stable: it is
/// what makes traversal and ranking deterministic for identical graph state.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn fetch_node(&self, id: Uuid) -> Result<Option<Node>>;

    async fn fetch_edges(&self, node: Uuid, query: &EdgeQuery) -> Result<Vec<Edge>>;

    async fn list_nodes(&self, query: &NodeQuery) -> Result<Vec<Node>>;

    /// Bulk node lookup; unknown ids are simply absent from the result.
    async fn fetch_nodes(&self, ids: &[Uuid]) -> Result<FxHashMap<Uuid, Node>> {
        let mut nodes = FxHashMap::default();
        for &id in ids {
            if let Some(node) = self.fetch_node(id).await? {
                nodes.insert(id, node);
            }
        }
        Ok(nodes)
    }
}
