pub mod exact;
pub mod greedy;

pub use exact::solve_exact;
pub use greedy::solve_heuristic;
