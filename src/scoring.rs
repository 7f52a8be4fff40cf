//! Pure opportunity scoring: no store access, no shared state, so results
//! depend only on the inputs.

use crate::model::RelationType;
use std::cmp::Ordering;

pub const DIRECT_BONUS: f64 = 0.5;
pub const EDGE_WEIGHT_FACTOR: f64 = 0.2;

/// Scores closer than this are treated as tied and fall back to name order.
pub const SCORE_EPSILON: f64 = 0.001;

/// Bonus for the relation type linking subject and candidate. Highest
/// matching relation counts once.
pub fn relation_bonus(relation: RelationType) -> f64 {
    match relation {
        RelationType::SimilarTo => 0.4,
        RelationType::SameScene => 0.3,
        RelationType::SameMicrogenre => 0.3,
        RelationType::Collaborates => 0.2,
        RelationType::Influences | RelationType::Supports | RelationType::Crossover => 0.1,
    }
}

/// Multiplier for a candidate whose shortest discovery path has `hops`
/// edges: 1 at one hop, halved for each hop after that.
pub fn distance_decay(hops: usize) -> f64 {
    0.5f64.powi(hops.saturating_sub(1) as i32)
}

/// Full opportunity score for a candidate reached through an edge of the
/// given relation and weight at `hops` steps from the subject. The base may
/// exceed 1.0 internally; clamping and rounding happen here, at the final
/// step, after decay.
pub fn connection_score(relation: RelationType, edge_weight: f64, hops: usize) -> f64 {
    let base = relation_bonus(relation) + DIRECT_BONUS + edge_weight * EDGE_WEIGHT_FACTOR;
    round_score(base * distance_decay(hops))
}

/// Clamps to [0,1] and rounds to three decimals.
pub fn round_score(score: f64) -> f64 {
    (score.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}

/// Ranking comparator: score descending, with ties inside `SCORE_EPSILON`
/// broken by case-sensitive name order. The epsilon comparison runs first so
/// the final order never depends on store iteration order or platform
/// floating-point wobble.
pub fn rank_order(score_a: f64, name_a: &str, score_b: f64, name_b: &str) -> Ordering {
    if (score_a - score_b).abs() < SCORE_EPSILON {
        name_a.cmp(name_b)
    } else {
        score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal)
    }
}

/// Shared-connection summary: "1 connection pathway" for a single shared
/// neighbor, "N common connections" otherwise.
pub fn connection_summary(count: usize) -> String {
    if count == 1 {
        "1 connection pathway".to_string()
    } else {
        format!("{count} common connections")
    }
}

pub fn build_reasoning(relation: RelationType, hops: usize, common_connections: usize) -> String {
    let summary = connection_summary(common_connections);
    if hops <= 1 {
        format!("Direct {relation} connection; {summary}")
    } else {
        format!("Connected at {hops} degrees via {relation}; {summary}")
    }
}
