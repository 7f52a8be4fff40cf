mod signals;

pub use signals::{crossover_score, growth_rate, momentum_score, reach_score, weighted_average};

use crate::config::PulseConfig;
use crate::error::{Error, Result};
use crate::model::{Node, NodeKind};
use crate::recommend::{self, RecommendOptions};
use crate::scoring;
use crate::store::{EdgeQuery, GraphStore, NodeQuery};
use futures::stream::{self, StreamExt};
use moka::future::Cache;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

const MOMENTUM_WEIGHT: f64 = 0.30;
const REACH_WEIGHT: f64 = 0.25;
const CROSSOVER_WEIGHT: f64 = 0.20;
const PEER_WEIGHT: f64 = 0.25;

/// Composite for entities with no usable signal at all.
const NEUTRAL_COMPOSITE: f64 = 0.5;

/// How many similar artists feed the peer-strength signal.
const PEER_SAMPLE: usize = 5;

/// Health label from composite score plus growth trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PulseClass {
    Emerging,
    Hot,
    Stable,
    Cooling,
    Dormant,
    Niche,
}

impl PulseClass {
    pub fn as_str(self) -> &'static str {
        match self {
            PulseClass::Emerging => "Emerging",
            PulseClass::Hot => "Hot",
            PulseClass::Stable => "Stable",
            PulseClass::Cooling => "Cooling",
            PulseClass::Dormant => "Dormant",
            PulseClass::Niche => "Niche",
        }
    }
}

impl fmt::Display for PulseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered threshold rules, evaluated top to bottom; first match wins.
pub fn classify(composite: f64, growth: f64) -> PulseClass {
    if composite < 0.4 && growth > 0.3 {
        PulseClass::Emerging
    } else if composite >= 0.7 && growth > 0.1 {
        PulseClass::Hot
    } else if composite >= 0.6 && growth.abs() < 0.1 {
        PulseClass::Stable
    } else if composite >= 0.5 && growth < -0.2 {
        PulseClass::Cooling
    } else if composite < 0.3 {
        PulseClass::Dormant
    } else {
        PulseClass::Niche
    }
}

/// One contributing sub-signal; weight is renormalized over the signals
/// that were actually present.
#[derive(Debug, Clone, Serialize)]
pub struct PulseSignal {
    pub name: String,
    pub score: f64,
    pub weight: f64,
}

/// Cached per-entity health rollup.
#[derive(Debug, Clone, Serialize)]
pub struct PulseSnapshot {
    pub entity: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub composite: f64,
    pub classification: PulseClass,
    pub growth_rate: f64,
    pub signals: Vec<PulseSignal>,
    pub generated_at: i64,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
    pub capacity: u64,
}

/// TTL-cached pulse computation over a shared graph store. The cache is the
/// only mutable state in the crate; everything else is pure per call.
pub struct PulseEngine<S> {
    store: Arc<S>,
    cache: Cache<Uuid, PulseSnapshot>,
    config: PulseConfig,
}

impl<S: GraphStore> PulseEngine<S> {
    pub fn new(store: Arc<S>, config: PulseConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_cache_entries)
            .time_to_live(config.snapshot_ttl)
            .build();
        Self {
            store,
            cache,
            config,
        }
    }

    /// Returns the cached snapshot when present and unexpired (unless
    /// `skip_cache`), otherwise computes one, stores it with the TTL, and
    /// returns it. Unknown entities are `Error::NotFound` here; batch calls
    /// isolate that per entity.
    pub async fn snapshot(&self, entity: Uuid, skip_cache: bool) -> Result<PulseSnapshot> {
        if !skip_cache {
            if let Some(snapshot) = self.cache.get(&entity).await {
                debug!(%entity, "pulse cache hit");
                return Ok(snapshot);
            }
        }
        let snapshot = self.compute_snapshot(entity).await?;
        self.cache.insert(entity, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Pulse snapshots for artists in one country, strongest first.
    pub async fn region_snapshots(
        &self,
        region: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PulseSnapshot>> {
        let query = NodeQuery {
            kind: Some(NodeKind::Artist),
            country: Some(region.to_string()),
            limit: Some(self.batch_limit(limit)),
        };
        let nodes = self.store.list_nodes(&query).await?;
        Ok(self.batch_snapshots(nodes).await)
    }

    /// Pulse snapshots for artists everywhere, strongest first.
    pub async fn global_snapshots(&self, limit: Option<usize>) -> Result<Vec<PulseSnapshot>> {
        let query = NodeQuery {
            kind: Some(NodeKind::Artist),
            country: None,
            limit: Some(self.batch_limit(limit)),
        };
        let nodes = self.store.list_nodes(&query).await?;
        Ok(self.batch_snapshots(nodes).await)
    }

    pub async fn invalidate(&self, entity: Uuid) {
        self.cache.invalidate(&entity).await;
        debug!(%entity, "pulse snapshot invalidated");
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        debug!("pulse cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            entries: self.cache.entry_count(),
            capacity: self.config.max_cache_entries,
        }
    }

    /// Spawns the periodic expired-entry sweep; the caller owns the handle
    /// and aborts it on shutdown.
    pub fn start_sweep(&self) -> JoinHandle<()> {
        let cache = self.cache.clone();
        let period = self.config.sweep_interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                cache.run_pending_tasks().await;
                debug!(entries = cache.entry_count(), "pulse cache sweep");
            }
        })
    }

    fn batch_limit(&self, limit: Option<usize>) -> usize {
        limit
            .unwrap_or(self.config.max_batch_entities)
            .min(self.config.max_batch_entities)
    }

    /// Fans `snapshot` out over the nodes with a fixed-size concurrency
    /// window. One entity's failure is logged and skipped; the rest of the
    /// batch completes.
    async fn batch_snapshots(&self, nodes: Vec<Node>) -> Vec<PulseSnapshot> {
        let tasks = nodes.into_iter().map(|node| {
            let id = node.id;
            async move { (id, self.snapshot(id, false).await) }
        });
        let results: Vec<(Uuid, Result<PulseSnapshot>)> = stream::iter(tasks)
            .buffer_unordered(self.config.max_concurrency.max(1))
            .collect()
            .await;

        let mut snapshots: Vec<PulseSnapshot> = results
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(snapshot) => Some(snapshot),
                Err(error) => {
                    warn!(entity = %id, %error, "pulse batch entry failed, skipping");
                    None
                }
            })
            .collect();
        snapshots.sort_by(|a, b| scoring::rank_order(a.composite, &a.name, b.composite, &b.name));
        snapshots
    }

    async fn compute_snapshot(&self, entity: Uuid) -> Result<PulseSnapshot> {
        let Some(node) = self.store.fetch_node(entity).await? else {
            return Err(Error::NotFound(entity));
        };
        let edges = self.store.fetch_edges(entity, &EdgeQuery::default()).await?;

        let momentum = momentum_score(&node.activity);
        let reach = reach_score(&edges);
        let crossover = crossover_score(&edges);
        let peer = self.peer_strength(entity).await?;

        let parts = [
            (momentum, MOMENTUM_WEIGHT),
            (reach, REACH_WEIGHT),
            (crossover, CROSSOVER_WEIGHT),
            (peer, PEER_WEIGHT),
        ];
        let composite =
            scoring::round_score(weighted_average(&parts).unwrap_or(NEUTRAL_COMPOSITE));
        let growth = growth_rate(&node.activity).unwrap_or(0.0);
        let classification = classify(composite, growth);

        let available_weight: f64 = parts
            .iter()
            .filter(|(value, _)| value.is_some())
            .map(|(_, weight)| weight)
            .sum();
        let signals = [
            ("momentum", momentum, MOMENTUM_WEIGHT),
            ("reach", reach, REACH_WEIGHT),
            ("crossover", crossover, CROSSOVER_WEIGHT),
            ("peer_strength", peer, PEER_WEIGHT),
        ]
        .into_iter()
        .filter_map(|(name, value, weight)| {
            value.map(|score| PulseSignal {
                name: name.to_string(),
                score,
                weight: weight / available_weight,
            })
        })
        .collect();

        info!(%entity, composite, class = %classification, "pulse snapshot computed");
        Ok(PulseSnapshot {
            entity,
            name: node.name,
            country: node.country,
            composite,
            classification,
            growth_rate: growth,
            signals,
            generated_at: unix_now(),
            ttl_secs: self.config.snapshot_ttl.as_secs(),
        })
    }

    /// Mean score of the entity's top similar artists; ties the pulse layer
    /// back into the recommendation layer.
    async fn peer_strength(&self, entity: Uuid) -> Result<Option<f64>> {
        let options = RecommendOptions {
            limit: PEER_SAMPLE,
            max_depth: 2,
            ..RecommendOptions::default()
        };
        let peers =
            recommend::recommend_similar_artists(self.store.as_ref(), entity, &options).await?;
        if peers.is_empty() {
            return Ok(None);
        }
        let total: f64 = peers.iter().map(|peer| peer.score).sum();
        Ok(Some(total / peers.len() as f64))
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
