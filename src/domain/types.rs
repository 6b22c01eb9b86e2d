use serde::Deserialize;

/// A 2D coordinate in meters. Users and candidate UAV sites are both plain
/// points, identified by their index in the scenario vectors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Immutable input snapshot for a single solve call.
///
/// Preconditions (documented, not runtime-checked): `beta` in [0, 1],
/// `uav_cost` > 0, `budget` >= 0, `max_dist` > 0, `gamma_max` >= `gamma_min`.
#[derive(Debug, Clone)]
pub struct Params {
    /// Minimum fraction of users that must be covered.
    pub beta: f64,
    /// Cost per deployed UAV.
    pub uav_cost: f64,
    /// Total deployment cost ceiling.
    pub budget: f64,
    /// Maximum allowed UAV-to-user connection distance.
    pub max_dist: f64,
    /// Minimum users an active UAV must serve.
    pub gamma_min: usize,
    /// Maximum users an active UAV may serve.
    pub gamma_max: usize,
    /// Total user count N, used for coverage targets and normalization.
    pub num_users: usize,
}
