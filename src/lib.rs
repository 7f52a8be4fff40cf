pub mod config;
pub mod error;
pub mod limits;
pub mod model;
pub mod pathfinding;
pub mod pulse;
pub mod recommend;
pub mod scoring;
pub mod store;

// Re-export commonly used items
pub use config::PulseConfig;
pub use error::{Error, Result};
pub use limits::{MAX_SEARCH_DEPTH, TimeoutGuard};
pub use model::{Direction, Edge, GraphPath, Node, NodeKind, Recommendation, RelationType};
pub use pathfinding::{PathOptions, degrees_of_separation, find_influence_path, find_shortest_path};
pub use pulse::{CacheStats, PulseClass, PulseEngine, PulseSignal, PulseSnapshot};
pub use recommend::{RecommendOptions, recommend_pitch_targets, recommend_similar_artists};
pub use store::{EdgeQuery, GraphStore, MemoryGraphStore, NodeQuery};
