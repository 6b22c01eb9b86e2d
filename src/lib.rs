// Module declarations
pub mod config;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod geometry;
pub mod solver;
pub mod sweep;
