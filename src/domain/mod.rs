pub mod solution;
pub mod types;

pub use solution::*;
pub use types::*;
