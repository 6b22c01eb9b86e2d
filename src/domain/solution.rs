use std::collections::HashMap;

use crate::domain::types::Params;

/// Result of one solver invocation. Constructed fresh per call and never
/// mutated after return.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    /// Deployed site indices, in deployment (or extraction) order.
    pub active: Vec<usize>,
    /// Active site index -> connected user indices.
    pub connections: HashMap<usize, Vec<usize>>,
    pub utility: u64,
    pub elapsed_seconds: f64,
}

impl Solution {
    /// Normalized failure value: infeasible models and backend errors both
    /// come back as an empty deployment rather than an error.
    pub fn empty(elapsed_seconds: f64) -> Self {
        Solution {
            active: vec![],
            connections: HashMap::new(),
            utility: 0,
            elapsed_seconds,
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.values().map(|users| users.len()).sum()
    }

    pub fn total_cost(&self, params: &Params) -> f64 {
        (self.active.len() as f64) * params.uav_cost
    }
}
