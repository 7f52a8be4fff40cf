//! Pure sub-signal math for pulse snapshots. Every signal returns None when
//! the underlying data is missing so sparse entities are skipped during
//! weight renormalization instead of being scored as zero.

use crate::model::{Edge, RelationType};

/// Momentum of a recent-activity series: the recent half against the older
/// half, centered at 0.5 for a flat series. None below two data points.
pub fn momentum_score(series: &[f64]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let mid = series.len() / 2;
    let older = mean(&series[..mid]);
    let recent = mean(&series[mid..]);
    if older <= 0.0 {
        return Some(if recent > 0.0 { 1.0 } else { 0.5 });
    }
    let growth = (recent - older) / older;
    Some(clamp01(0.5 + growth / 2.0))
}

/// Relative change from the first to the last point of the series. Can be
/// negative; None below two data points.
pub fn growth_rate(series: &[f64]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let first = series[0];
    let last = series[series.len() - 1];
    if first <= 0.0 {
        return Some(if last > 0.0 { 1.0 } else { 0.0 });
    }
    Some((last - first) / first)
}

/// How connected the entity is: edge count (saturating at 20) blended with
/// mean edge weight. None when the entity has no edges at all.
pub fn reach_score(edges: &[Edge]) -> Option<f64> {
    if edges.is_empty() {
        return None;
    }
    let count_part = (edges.len() as f64 / 20.0).min(1.0);
    let mean_weight = edges.iter().map(|edge| edge.weight).sum::<f64>() / edges.len() as f64;
    Some(clamp01(count_part * 0.5 + mean_weight * 0.5))
}

/// Crossover potential from strong crossover edges (weight above 0.5).
/// Zero when the entity has edges but none of them qualify; None when it
/// has no edges at all.
pub fn crossover_score(edges: &[Edge]) -> Option<f64> {
    if edges.is_empty() {
        return None;
    }
    let strong: Vec<f64> = edges
        .iter()
        .filter(|edge| edge.relation == RelationType::Crossover && edge.weight > 0.5)
        .map(|edge| edge.weight)
        .collect();
    if strong.is_empty() {
        return Some(0.0);
    }
    let count_part = (strong.len() as f64 / 10.0).min(1.0);
    let mean_weight = strong.iter().sum::<f64>() / strong.len() as f64;
    Some(clamp01(count_part * 0.5 + mean_weight * 0.5))
}

/// Weighted average over the signals actually present, with weights
/// renormalized over those signals. None when nothing is present.
pub fn weighted_average(parts: &[(Option<f64>, f64)]) -> Option<f64> {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for &(value, weight) in parts {
        if let Some(value) = value {
            total += value * weight;
            weight_sum += weight;
        }
    }
    if weight_sum > 0.0 {
        Some(total / weight_sum)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
