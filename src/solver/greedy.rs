use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::debug;

use crate::domain::solution::Solution;
use crate::domain::types::{Params, Point};
use crate::evaluation::utility::score_utility;
use crate::geometry::distance;

/// Greedy set-cover style construction: rank sites by how many users they can
/// reach, then deploy the most popular sites first until the coverage target
/// is met or the budget runs out.
///
/// No optimality guarantee, but deterministic: identical inputs always yield
/// the identical solution. An empty candidate set or a zero budget is a valid
/// empty outcome, not an error.
pub fn solve_heuristic(users: &[Point], sites: &[Point], params: &Params) -> Solution {
    let start = Instant::now();

    let num_users = users.len();

    // Integer coverage target, unlike the exact model's fractional bound.
    let target_users = (params.beta * (num_users as f64)).ceil() as usize;

    // Per site, every user within signal range with its distance.
    let potential_users: Vec<Vec<(usize, f64)>> = sites
        .iter()
        .map(|site| {
            users
                .iter()
                .enumerate()
                .filter_map(|(n, user)| {
                    let dist = distance(user, site);
                    (dist <= params.max_dist).then_some((n, dist))
                })
                .collect()
        })
        .collect();

    // A site that cannot reach gamma_min users can never be deployed.
    let mut ranked_sites: Vec<usize> = (0..sites.len())
        .filter(|&m| potential_users[m].len() >= params.gamma_min)
        .collect();

    // Most popular first; stable sort keeps index order on ties.
    ranked_sites.sort_by_key(|&m| Reverse(potential_users[m].len()));

    debug!(
        "Heuristic: target {} of {} users, {} viable of {} sites",
        target_users,
        num_users,
        ranked_sites.len(),
        sites.len()
    );

    let mut active_indices: Vec<usize> = vec![];
    let mut connections: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut covered_users: HashSet<usize> = HashSet::new();
    let mut current_cost = 0.0;
    let mut total_dist = 0.0;

    for m in ranked_sites {
        if covered_users.len() >= target_users {
            break;
        }
        if current_cost + params.uav_cost > params.budget {
            break;
        }

        // Closest users first, skipping anyone already covered.
        let mut candidates: Vec<(usize, f64)> = potential_users[m]
            .iter()
            .filter(|(n, _)| !covered_users.contains(n))
            .copied()
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        // Closest-first truncation keeps the nearest users when the site
        // would otherwise overload.
        candidates.truncate(params.gamma_max);

        // No partial deployment: the site joins only if it still carries a
        // legal load after filtering.
        if !candidates.is_empty() && candidates.len() >= params.gamma_min {
            current_cost += params.uav_cost;
            active_indices.push(m);

            for &(n, dist) in &candidates {
                covered_users.insert(n);
                total_dist += dist;
            }
            connections.insert(m, candidates.iter().map(|&(n, _)| n).collect());
        }
    }

    let conn_count = covered_users.len();
    let utility = score_utility(
        active_indices.len(),
        conn_count,
        total_dist,
        params,
        sites.len(),
    );

    Solution {
        active: active_indices,
        connections,
        utility,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    }
}
