use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the engine. Missing entities are a normal outcome for
/// recommendation and pathfinding calls (empty results); `NotFound` is only
/// raised where a single-entity answer is demanded, i.e. pulse snapshots.
#[derive(Debug, Error)]
pub enum Error {
    #[error("entity not found: {0}")]
    NotFound(Uuid),

    /// Transient upstream failure, propagated unchanged; retry policy is the
    /// host application's concern.
    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
