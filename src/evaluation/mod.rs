pub mod utility;

pub use utility::*;
