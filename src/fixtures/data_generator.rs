use std::fs;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::constant::{DEFAULT_GRID_TYPE, GRID_HEIGHT, GRID_WIDTH, SEED};
use crate::domain::types::Point;

/// Struct to match the scenario JSON structure
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub users: Vec<Point>,
    pub sites: Vec<Point>,
}

/// Reads a scenario (user and candidate site coordinates) from a JSON file.
pub fn load_scenario(path: &str) -> Result<Scenario, Box<dyn std::error::Error>> {
    let file_content = fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&file_content)?;

    info!(
        "Loaded scenario from {}: {} users, {} sites",
        path,
        scenario.users.len(),
        scenario.sites.len()
    );

    Ok(scenario)
}

/// Generates a random disaster scenario: users placed uniformly over the
/// simulation area and candidate UAV sites on a regular mesh.
///
/// `grid_type` is a "RxC" string such as "3x3" or "4x4". Generation is
/// seeded, so the same inputs always produce the same scenario.
pub fn generate_scenario(num_users: usize, grid_type: &str) -> (Vec<Point>, Vec<Point>) {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    let users: Vec<Point> = (0..num_users)
        .map(|_| {
            Point::new(
                rng.gen::<f64>() * GRID_WIDTH,
                rng.gen::<f64>() * GRID_HEIGHT,
            )
        })
        .collect();

    let (rows, cols) = parse_grid_type(grid_type);

    let xs = linspace(0.0, GRID_WIDTH, cols);
    let ys = linspace(0.0, GRID_HEIGHT, rows);
    let sites: Vec<Point> = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| Point::new(x, y)))
        .collect();

    info!(
        "Generated scenario: {} users, {} candidate sites ({})",
        users.len(),
        sites.len(),
        grid_type
    );

    (users, sites)
}

/// Parses a "RxC" grid string, falling back to the default mesh when the
/// string is malformed.
fn parse_grid_type(grid_type: &str) -> (usize, usize) {
    match split_grid_type(grid_type) {
        Some(dims) => dims,
        None => {
            warn!(
                "Invalid grid type '{}', falling back to {}",
                grid_type, DEFAULT_GRID_TYPE
            );
            split_grid_type(DEFAULT_GRID_TYPE).unwrap_or((4, 4))
        }
    }
}

fn split_grid_type(grid_type: &str) -> Option<(usize, usize)> {
    let (rows, cols) = grid_type.split_once('x')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| start + span * ((i as f64) / last))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let (users_a, sites_a) = generate_scenario(20, "3x3");
        let (users_b, sites_b) = generate_scenario(20, "3x3");

        assert_eq!(users_a, users_b);
        assert_eq!(sites_a, sites_b);
    }

    #[test]
    fn users_stay_inside_the_grid() {
        let (users, _) = generate_scenario(100, "4x4");

        assert_eq!(users.len(), 100);
        for user in users {
            assert!((0.0..=GRID_WIDTH).contains(&user.x));
            assert!((0.0..=GRID_HEIGHT).contains(&user.y));
        }
    }

    #[test]
    fn grid_type_controls_site_mesh() {
        let (_, sites) = generate_scenario(1, "3x5");

        assert_eq!(sites.len(), 15);
        // Mesh corners land on the area corners.
        assert_eq!(sites[0], Point::new(0.0, 0.0));
        assert_eq!(sites[4], Point::new(GRID_WIDTH, 0.0));
        assert_eq!(sites[14], Point::new(GRID_WIDTH, GRID_HEIGHT));
    }

    #[test]
    fn malformed_grid_type_falls_back_to_default_mesh() {
        let (_, sites) = generate_scenario(1, "bogus");

        // The default 4x4 mesh stands in for the unparseable grid string.
        assert_eq!(sites.len(), 16);
    }

    #[test]
    fn loads_scenario_from_json_file() {
        let path = std::env::temp_dir().join("uav_deploy_scenario_test.json");
        let json = r#"{
            "users": [{"x": 1.0, "y": 2.0}],
            "sites": [{"x": 0.0, "y": 0.0}, {"x": 3.0, "y": 4.0}]
        }"#;
        fs::write(&path, json).unwrap();

        let scenario = load_scenario(path.to_str().unwrap()).unwrap();

        assert_eq!(scenario.users, vec![Point::new(1.0, 2.0)]);
        assert_eq!(
            scenario.sites,
            vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]
        );

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_scenario_file_is_an_error() {
        assert!(load_scenario("no/such/scenario.json").is_err());
    }

    #[test]
    fn linspace_endpoints_are_exact() {
        let xs = linspace(0.0, 1000.0, 4);
        assert_eq!(xs.len(), 4);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[3], 1000.0);
    }
}
