use rayon::prelude::*;

use crate::domain::types::Point;

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Pairwise site-to-user distance matrix, `matrix[m][n]` = distance from
/// site `m` to user `n`. Rows are computed in parallel.
pub fn distance_matrix(sites: &[Point], users: &[Point]) -> Vec<Vec<f64>> {
    sites
        .par_iter()
        .map(|site| users.iter().map(|user| distance(site, user)).collect())
        .collect()
}
