use std::time::Instant;

use good_lp::{
    constraint, default_solver, variable, variables, Expression, Solution as LpSolution,
    SolverModel, Variable,
};
use itertools::iproduct;
use tracing::debug;

use crate::domain::solution::Solution;
use crate::domain::types::{Params, Point};
use crate::evaluation::utility::score_utility;
use crate::geometry::distance_matrix;

// Scales the deployment-cost term so that saving a UAV always outweighs any
// achievable reduction in total connection distance.
const PRIORITY_WEIGHT: f64 = 1000.0;

/// Exact branch-and-bound solve of the deployment problem as a binary
/// integer program. Runs with no time limit until optimality is proven.
///
/// Infeasible models and backend failures are not surfaced as errors; both
/// come back as `Solution::empty` with best-effort elapsed time, so callers
/// never need error handling around a solve.
pub fn solve_exact(users: &[Point], sites: &[Point], params: &Params) -> Solution {
    let start = Instant::now();

    let num_users = users.len();
    let num_sites = sites.len();

    let dists = distance_matrix(sites, users);

    let mut vars = variables!();
    let active: Vec<Variable> = (0..num_sites)
        .map(|_| vars.add(variable().binary()))
        .collect();
    let connect: Vec<Vec<Variable>> = (0..num_sites)
        .map(|_| {
            (0..num_users)
                .map(|_| vars.add(variable().binary()))
                .collect()
        })
        .collect();

    // Minimize weighted deployment cost plus total connection distance.
    let deployment_cost: Expression = active
        .iter()
        .map(|&x| x * (params.uav_cost * PRIORITY_WEIGHT))
        .sum();
    let connection_dist: Expression = iproduct!(0..num_sites, 0..num_users)
        .map(|(m, n)| connect[m][n] * dists[m][n])
        .sum();

    let mut model = vars
        .minimise(deployment_cost + connection_dist)
        .using(default_solver);

    // Coverage: total connections must reach the (fractional) beta target.
    let total_connections: Expression = iproduct!(0..num_sites, 0..num_users)
        .map(|(m, n)| Expression::from(connect[m][n]))
        .sum();
    let coverage_target = params.beta * (num_users as f64);
    model = model.with(constraint!(total_connections >= coverage_target));

    // Budget ceiling on deployed UAVs.
    let total_cost: Expression = active.iter().map(|&x| x * params.uav_cost).sum();
    let budget = params.budget;
    model = model.with(constraint!(total_cost <= budget));

    let gamma_min = params.gamma_min as f64;
    let gamma_max = params.gamma_max as f64;

    for m in 0..num_sites {
        // Validity: a user may only connect to a deployed site.
        for n in 0..num_users {
            model = model.with(constraint!(connect[m][n] <= active[m]));
        }

        // Load bounds tied to the activation variable.
        let site_load: Expression = connect[m]
            .iter()
            .map(|&y| Expression::from(y))
            .sum();
        model = model
            .with(constraint!(site_load.clone() <= active[m] * gamma_max))
            .with(constraint!(site_load >= active[m] * gamma_min));
    }

    for n in 0..num_users {
        // Each user connects to at most one site.
        let user_links: Expression = (0..num_sites)
            .map(|m| Expression::from(connect[m][n]))
            .sum();
        model = model.with(constraint!(user_links <= 1.0));

        // Out-of-range pairs are pinned to zero rather than removed, keeping
        // the model shape uniform.
        for m in 0..num_sites {
            if dists[m][n] > params.max_dist {
                model = model.with(constraint!(connect[m][n] == 0.0));
            }
        }
    }

    let lp_solution = match model.solve() {
        Ok(sol) => sol,
        Err(err) => {
            // Infeasible or backend failure: normalized to an empty solution.
            debug!("Exact solve terminated without a solution: {}", err);
            return Solution::empty(start.elapsed().as_secs_f64());
        }
    };

    // 0.5 threshold tolerates binary rounding in the relaxation.
    let active_indices: Vec<usize> = (0..num_sites)
        .filter(|&m| lp_solution.value(active[m]) > 0.5)
        .collect();

    let mut connections = std::collections::HashMap::new();
    let mut total_dist = 0.0;
    for &m in &active_indices {
        let mut user_list = vec![];
        for n in 0..num_users {
            if lp_solution.value(connect[m][n]) > 0.5 {
                user_list.push(n);
                total_dist += dists[m][n];
            }
        }
        connections.insert(m, user_list);
    }

    let conn_count: usize = connections.values().map(|u: &Vec<usize>| u.len()).sum();
    let utility = score_utility(
        active_indices.len(),
        conn_count,
        total_dist,
        params,
        num_sites,
    );

    Solution {
        active: active_indices,
        connections,
        utility,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_users() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]
    }

    fn base_params() -> Params {
        Params {
            beta: 1.0,
            uav_cost: 10.0,
            budget: 100.0,
            max_dist: 20.0,
            gamma_min: 1,
            gamma_max: 4,
            num_users: 4,
        }
    }

    #[test]
    fn single_site_covers_all_users() {
        let users = square_users();
        let sites = vec![Point::new(5.0, 5.0)];

        let solution = solve_exact(&users, &sites, &base_params());

        assert_eq!(solution.active, vec![0]);
        let mut connected = solution.connections[&0].clone();
        connected.sort_unstable();
        assert_eq!(connected, vec![0, 1, 2, 3]);
    }

    #[test]
    fn budget_below_uav_cost_is_infeasible_and_empty() {
        let users = square_users();
        let sites = vec![Point::new(5.0, 5.0)];
        let params = Params {
            budget: 5.0,
            ..base_params()
        };

        let solution = solve_exact(&users, &sites, &params);

        assert!(solution.active.is_empty());
        assert!(solution.connections.is_empty());
        assert_eq!(solution.utility, 0);
    }

    #[test]
    fn min_load_above_reachable_users_forces_site_out() {
        let users = square_users();
        let sites = vec![Point::new(5.0, 5.0)];
        let params = Params {
            gamma_min: 5,
            gamma_max: 10,
            ..base_params()
        };

        let solution = solve_exact(&users, &sites, &params);

        assert!(solution.active.is_empty());
        assert!(solution.connections.is_empty());
    }

    #[test]
    fn fewer_uavs_beat_shorter_distances() {
        // One far site reaches everyone; two near sites split the users with
        // much shorter links. The weighted objective must still prefer the
        // single deployment.
        let users = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(102.0, 0.0),
        ];
        let sites = vec![
            Point::new(51.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(101.0, 0.0),
        ];
        let params = Params {
            max_dist: 200.0,
            ..base_params()
        };

        let solution = solve_exact(&users, &sites, &params);

        assert_eq!(solution.active.len(), 1);
        assert_eq!(solution.connection_count(), 4);
    }

    #[test]
    fn respects_max_distance_cutoff() {
        // The remote user is out of range, so full coverage is impossible
        // and beta = 1.0 becomes infeasible.
        let mut users = square_users();
        users.push(Point::new(500.0, 500.0));
        let sites = vec![Point::new(5.0, 5.0)];
        let params = Params {
            num_users: 5,
            ..base_params()
        };

        let solution = solve_exact(&users, &sites, &params);
        assert!(solution.active.is_empty());

        // Relaxing the target makes it solvable without the remote user.
        let relaxed = Params {
            beta: 0.8,
            ..params
        };
        let solution = solve_exact(&users, &sites, &relaxed);
        assert_eq!(solution.active, vec![0]);
        assert!(!solution.connections[&0].contains(&4));
    }

    #[test]
    fn repeat_solves_agree_on_objective() {
        let users = square_users();
        let sites = vec![Point::new(5.0, 5.0), Point::new(9.0, 9.0)];
        let params = base_params();

        let a = solve_exact(&users, &sites, &params);
        let b = solve_exact(&users, &sites, &params);

        assert_eq!(a.active.len(), b.active.len());
        assert_eq!(a.connection_count(), b.connection_count());
        assert_eq!(a.utility, b.utility);
    }
}
