use crate::config::constant::ALPHA;
use crate::domain::types::Params;

// Presentation transform: the raw weighted sum lives below 1.0, scaling and
// offsetting it yields a small readable integer instead of a fraction.
const SCALING_FACTOR: f64 = 20.0;
const OFFSET: f64 = 2.0;

/// Weighted utility of a deployment: four normalized components combined with
/// equal weight, then scaled, offset, clamped at zero and rounded.
///
/// All four components are summed additively with lower-is-better semantics;
/// the coverage term is deliberately not inverted, matching the published
/// scoring scheme.
pub fn score_utility(
    active_count: usize,
    connection_count: usize,
    total_distance: f64,
    params: &Params,
    total_sites: usize,
) -> u64 {
    let n = params.num_users;

    let f1_uavs = (active_count as f64) / (total_sites as f64);
    let f2_conns = if n > 0 {
        (connection_count as f64) / (n as f64)
    } else {
        0.0
    };
    let f3_dist = if n > 0 {
        total_distance / ((n as f64) * params.max_dist)
    } else {
        0.0
    };
    let f4_cost = if params.budget > 0.0 {
        ((active_count as f64) * params.uav_cost) / ((total_sites as f64) * params.budget)
    } else {
        1.0
    };

    let raw_utility = ALPHA * f1_uavs + ALPHA * f2_conns + ALPHA * f3_dist + ALPHA * f4_cost;

    let scaled_utility = raw_utility * SCALING_FACTOR + OFFSET;
    scaled_utility.max(0.0).round() as u64
}
