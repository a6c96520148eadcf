// Rank weighting.
//
// Area, not font size, is budgeted first: each rank gets a power-law share of the usable
// viewport area and the box dimensions are derived from it afterwards.

use super::{LayoutConfig, Viewport};

/// Unnormalized weight of a rank: `1 / (rank + 1)^exponent`.
pub fn rank_weight(rank: usize, exponent: f64) -> f64 {
    1.0 / ((rank + 1) as f64).powf(exponent)
}

/// Area in square pixels allotted to each of `count` ranks.
/// Shares sum to `viewport.area() * cfg.area_fill`.
pub fn area_shares(count: usize, viewport: Viewport, cfg: &LayoutConfig) -> Vec<f64> {
    let weights: Vec<f64> = (0..count).map(|i| rank_weight(i, cfg.weight_exponent)).collect();
    let total_weight: f64 = weights.iter().sum();
    let usable = viewport.area() * cfg.area_fill;

    weights.into_iter().map(|w| usable * (w / total_weight)).collect()
}
