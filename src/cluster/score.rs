//! Cluster travel economics.

use crate::geo::planar_distance;
use crate::models::Cluster;

/// Sum of planar distances (meters) over every unordered pair of members
/// with coordinates.
pub fn cluster_travel_cost(cluster: &Cluster) -> f64 {
    let points: Vec<_> = cluster.teams.iter().filter_map(|t| t.coordinates).collect();
    let mut total = 0.0;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            total += planar_distance(*a, *b);
        }
    }
    total
}

/// `(base_travel_cost - cluster_travel_cost) / revenue_impact_factor`.
///
/// Higher is better. A non-positive factor is treated as 1.
pub fn cluster_score(
    base_travel_cost: f64,
    cluster_travel_cost: f64,
    revenue_impact_factor: f64,
) -> f64 {
    let factor = if revenue_impact_factor > 0.0 {
        revenue_impact_factor
    } else {
        1.0
    };
    (base_travel_cost - cluster_travel_cost) / factor
}
