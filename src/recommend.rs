use crate::error::Result;
use crate::limits::{self, MAX_SEARCH_DEPTH, TimeoutGuard};
use crate::model::{Node, NodeKind, Recommendation, RelationType};
use crate::scoring;
use crate::store::{EdgeQuery, GraphStore};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_RECOMMEND_LIMIT: usize = 10;
pub const DEFAULT_RECOMMEND_DEPTH: usize = 3;

/// Options shared by both recommendation calls. Filters apply before
/// ranking and before the limit, so `limit` always counts post-filter
/// candidates.
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    pub limit: usize,
    /// Minimum final score; out-of-range values are clamped to [0,1].
    pub min_score: f64,
    pub max_depth: usize,
    pub timeout_ms: u64,
    pub country: Option<String>,
    pub genre: Option<String>,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECOMMEND_LIMIT,
            min_score: 0.0,
            max_depth: DEFAULT_RECOMMEND_DEPTH,
            timeout_ms: limits::DEFAULT_TIMEOUT_MS,
            country: None,
            genre: None,
        }
    }
}

/// One discovered candidate: the closing edge of its first-found shortest
/// path carries the relation and weight that drive its score.
struct Lead {
    id: Uuid,
    hops: usize,
    relation: RelationType,
    weight: f64,
}

/// Ranked pitch targets (journalists, playlists, radio, DJs, blogs,
/// podcasts, outlets) for the subject. Empty for an unknown or disconnected
/// subject, never an error.
pub async fn recommend_pitch_targets<S: GraphStore + ?Sized>(
    store: &S,
    subject: Uuid,
    options: &RecommendOptions,
) -> Result<Vec<Recommendation>> {
    recommend_by_kind(store, subject, options, |kind| kind.is_contact()).await
}

/// Ranked similar artists for the subject; same contract as
/// `recommend_pitch_targets` with candidates restricted to artists.
pub async fn recommend_similar_artists<S: GraphStore + ?Sized>(
    store: &S,
    subject: Uuid,
    options: &RecommendOptions,
) -> Result<Vec<Recommendation>> {
    recommend_by_kind(store, subject, options, |kind| kind == NodeKind::Artist).await
}

async fn recommend_by_kind<S: GraphStore + ?Sized>(
    store: &S,
    subject: Uuid,
    options: &RecommendOptions,
    wanted_kind: impl Fn(NodeKind) -> bool,
) -> Result<Vec<Recommendation>> {
    if store.fetch_node(subject).await?.is_none() {
        debug!(%subject, "recommendation subject not found");
        return Ok(Vec::new());
    }

    let guard = TimeoutGuard::new(options.timeout_ms);
    let (leads, subject_neighbors) = explore(store, subject, options, &guard).await?;
    if leads.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = leads.iter().map(|lead| lead.id).collect();
    let mut nodes = store.fetch_nodes(&ids).await?;

    let min_score = options.min_score.clamp(0.0, 1.0);
    let mut ranked: Vec<(Node, f64, RelationType, usize)> = Vec::new();
    for lead in leads {
        let Some(node) = nodes.remove(&lead.id) else {
            continue;
        };
        if !wanted_kind(node.kind) || !matches_filters(&node, options) {
            continue;
        }
        let score = scoring::connection_score(lead.relation, lead.weight, lead.hops);
        if score < min_score {
            continue;
        }
        ranked.push((node, score, lead.relation, lead.hops));
    }

    ranked.sort_by(|a, b| scoring::rank_order(a.1, &a.0.name, b.1, &b.0.name));
    ranked.truncate(options.limit);

    let mut recommendations = Vec::with_capacity(ranked.len());
    for (node, score, relation, hops) in ranked {
        let common = common_connections(store, &subject_neighbors, node.id).await?;
        recommendations.push(Recommendation {
            reasoning: scoring::build_reasoning(relation, hops, common),
            common_connections: common,
            node,
            score,
        });
    }
    Ok(recommendations)
}

/// Bounded neighborhood expansion from the subject, in store edge order.
/// Returns candidate leads in first-visit order plus the subject's direct
/// neighbor set (for common-connection counting). Timeout or budget expiry
/// keeps the partial candidate set.
async fn explore<S: GraphStore + ?Sized>(
    store: &S,
    subject: Uuid,
    options: &RecommendOptions,
    guard: &TimeoutGuard,
) -> Result<(Vec<Lead>, FxHashSet<Uuid>)> {
    let max_depth = options.max_depth.min(MAX_SEARCH_DEPTH);
    let edge_query = EdgeQuery::default();

    let mut queue = VecDeque::new();
    let mut visited = FxHashSet::default();
    let mut leads: Vec<Lead> = Vec::new();
    let mut subject_neighbors = FxHashSet::default();
    let mut edges_seen = 0usize;

    queue.push_back((subject, 0usize));
    visited.insert(subject);

    while let Some((current, depth)) = queue.pop_front() {
        if guard.is_expired() {
            warn!(
                elapsed_ms = guard.elapsed_ms(),
                candidates = leads.len(),
                "candidate expansion timed out, keeping partial set"
            );
            break;
        }
        if depth >= max_depth {
            continue;
        }
        if visited.len() > limits::DEFAULT_MAX_NODES || edges_seen > limits::DEFAULT_MAX_EDGES {
            warn!(
                visited = visited.len(),
                edges_seen, "candidate expansion exceeded budget, keeping partial set"
            );
            break;
        }

        let edges = store.fetch_edges(current, &edge_query).await?;
        edges_seen += edges.len();

        if depth == 0 {
            // Parallel edges to the same neighbor collapse to the strongest
            // relation, which supplies both the bonus and the weight term.
            let mut best: FxHashMap<Uuid, (RelationType, f64)> = FxHashMap::default();
            let mut order: Vec<Uuid> = Vec::new();
            for edge in &edges {
                let neighbor = edge.other(current);
                if neighbor == subject {
                    continue;
                }
                subject_neighbors.insert(neighbor);
                match best.get(&neighbor).copied() {
                    Some((relation, weight))
                        if !stronger(edge.relation, edge.weight, relation, weight) => {}
                    Some(_) => {
                        best.insert(neighbor, (edge.relation, edge.weight));
                    }
                    None => {
                        best.insert(neighbor, (edge.relation, edge.weight));
                        order.push(neighbor);
                    }
                }
            }
            for neighbor in order {
                let (relation, weight) = best[&neighbor];
                if visited.insert(neighbor) {
                    leads.push(Lead {
                        id: neighbor,
                        hops: 1,
                        relation,
                        weight,
                    });
                    queue.push_back((neighbor, 1));
                }
            }
        } else {
            for edge in edges {
                let neighbor = edge.other(current);
                if visited.insert(neighbor) {
                    leads.push(Lead {
                        id: neighbor,
                        hops: depth + 1,
                        relation: edge.relation,
                        weight: edge.weight,
                    });
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
    }

    Ok((leads, subject_neighbors))
}

fn stronger(relation_a: RelationType, weight_a: f64, relation_b: RelationType, weight_b: f64) -> bool {
    let bonus_a = scoring::relation_bonus(relation_a);
    let bonus_b = scoring::relation_bonus(relation_b);
    bonus_a > bonus_b || (bonus_a == bonus_b && weight_a > weight_b)
}

fn matches_filters(node: &Node, options: &RecommendOptions) -> bool {
    if let Some(country) = &options.country {
        let matched = node
            .country
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(country));
        if !matched {
            return false;
        }
    }
    if let Some(genre) = &options.genre {
        if !node.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            return false;
        }
    }
    true
}

/// Count of distinct nodes adjacent to both the subject and the candidate.
async fn common_connections<S: GraphStore + ?Sized>(
    store: &S,
    subject_neighbors: &FxHashSet<Uuid>,
    candidate: Uuid,
) -> Result<usize> {
    if subject_neighbors.is_empty() {
        return Ok(0);
    }
    let edges = store.fetch_edges(candidate, &EdgeQuery::default()).await?;
    let mut shared = FxHashSet::default();
    for edge in edges {
        let neighbor = edge.other(candidate);
        if neighbor != candidate && subject_neighbors.contains(&neighbor) {
            shared.insert(neighbor);
        }
    }
    Ok(shared.len())
}
