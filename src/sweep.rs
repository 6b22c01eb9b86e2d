use std::error::Error;

use colored::*;
use csv::Writer;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::constant::{
    DEFAULT_BUDGET, DEFAULT_GRID_TYPE, DEFAULT_MAX_DIST, DEFAULT_N_USERS, DEFAULT_UAV_COST,
    GAMMA_MAX, GAMMA_MIN, SCENARIO_JSON_PATH, SWEEP_BETAS, SWEEP_CSV_PATH,
};
use crate::domain::solution::Solution;
use crate::domain::types::{Params, Point};
use crate::fixtures::data_generator::{generate_scenario, load_scenario};
use crate::solver::{solve_exact, solve_heuristic};

/// One row of the beta sweep: both solvers on the same scenario and target.
#[derive(Debug)]
pub struct SweepRecord {
    pub beta: f64,
    pub exact: Solution,
    pub heuristic: Solution,
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .init();
}

/// Run both solvers across the configured coverage targets on one generated
/// scenario, print the comparison and write the results CSV.
pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!(
        "Starting UAV deployment sweep: {} users, {} grid, betas {:?}",
        DEFAULT_N_USERS, DEFAULT_GRID_TYPE, SWEEP_BETAS
    );

    let (users, sites) = load_or_generate_scenario();
    let records = run_sweep(&users, &sites, &SWEEP_BETAS);

    for record in &records {
        print_comparison(record, sites.len());
    }

    save_to_csv(&records, SWEEP_CSV_PATH)?;
    info!("Sweep results written to {}", SWEEP_CSV_PATH);

    Ok(())
}

/// Takes the scenario from a JSON file when one is present, with random
/// generation as the fallback.
fn load_or_generate_scenario() -> (Vec<Point>, Vec<Point>) {
    match load_scenario(SCENARIO_JSON_PATH) {
        Ok(scenario) => (scenario.users, scenario.sites),
        Err(err) => {
            warn!(
                "Failed to read scenario at {}: {}. Falling back to random generation.",
                SCENARIO_JSON_PATH, err
            );
            generate_scenario(DEFAULT_N_USERS, DEFAULT_GRID_TYPE)
        }
    }
}

/// Invoke both solvers for every beta on an immutable scenario snapshot.
pub fn run_sweep(users: &[Point], sites: &[Point], betas: &[f64]) -> Vec<SweepRecord> {
    betas
        .iter()
        .map(|&beta| {
            let sweep_span = span!(Level::INFO, "sweep_point", beta = beta);
            let _guard = sweep_span.enter();

            let params = Params {
                beta,
                uav_cost: DEFAULT_UAV_COST,
                budget: DEFAULT_BUDGET,
                max_dist: DEFAULT_MAX_DIST,
                gamma_min: GAMMA_MIN,
                gamma_max: GAMMA_MAX,
                num_users: users.len(),
            };

            let exact = solve_exact(users, sites, &params);
            let heuristic = solve_heuristic(users, sites, &params);

            SweepRecord {
                beta,
                exact,
                heuristic,
            }
        })
        .collect()
}

fn print_comparison(record: &SweepRecord, num_sites: usize) {
    println!(
        "\n=== Beta {:.1} ({} candidate sites) ===",
        record.beta, num_sites
    );
    print_solution_line("Optimal ", &record.exact);
    print_solution_line("Proposed", &record.heuristic);
}

fn print_solution_line(label: &str, solution: &Solution) {
    let summary = format!(
        "{}: {} UAVs, {} connections, utility {}, {:.3}s",
        label,
        solution.active.len(),
        solution.connection_count(),
        solution.utility,
        solution.elapsed_seconds
    );

    if solution.active.is_empty() {
        println!("{}", summary.red());
    } else {
        println!("{}", summary.green());
    }
}

fn save_to_csv(records: &[SweepRecord], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record([
        "beta",
        "opt_uavs",
        "opt_connections",
        "opt_utility",
        "opt_seconds",
        "heu_uavs",
        "heu_connections",
        "heu_utility",
        "heu_seconds",
    ])?;

    for record in records {
        wtr.write_record([
            record.beta.to_string(),
            record.exact.active.len().to_string(),
            record.exact.connection_count().to_string(),
            record.exact.utility.to_string(),
            record.exact.elapsed_seconds.to_string(),
            record.heuristic.active.len().to_string(),
            record.heuristic.connection_count().to_string(),
            record.heuristic.utility.to_string(),
            record.heuristic.elapsed_seconds.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
