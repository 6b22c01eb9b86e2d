pub mod constant {
    // Simulation area in meters
    pub const GRID_WIDTH: f64 = 1000.0;
    pub const GRID_HEIGHT: f64 = 1000.0;

    // Default scenario inputs, overridable per solve call
    pub const DEFAULT_N_USERS: usize = 50;
    pub const DEFAULT_UAV_COST: f64 = 100.0;
    pub const DEFAULT_BUDGET: f64 = 1000.0;
    pub const DEFAULT_MAX_DIST: f64 = 300.0;
    pub const DEFAULT_GRID_TYPE: &str = "4x4";

    // Per-UAV load bounds
    pub const GAMMA_MIN: usize = 2;
    pub const GAMMA_MAX: usize = 15;

    // Equal weight for the four utility components
    pub const ALPHA: f64 = 0.25;

    pub const SEED: u64 = 64;

    // Coverage targets evaluated by the batch sweep
    pub const SWEEP_BETAS: [f64; 5] = [0.2, 0.3, 0.4, 0.5, 0.6];
    pub const SWEEP_CSV_PATH: &str = "beta_sweep.csv";
    pub const SCENARIO_JSON_PATH: &str = "scenario.json";
}
