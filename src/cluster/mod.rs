//! Geographic team clustering.
//!
//! Groups teams into travel clusters by planar proximity, then refines the
//! grouping with pre-declared partnerships, a single strength-balancing
//! move and ordered constraint repairs. No network access happens here:
//! all distances use [`planar_distance`](crate::geo::planar_distance).

mod builder;
mod config;
mod repair;
mod score;

pub use builder::{build_clusters, ClusterBuilder, ClusterReport};
pub use config::{ClusterOptions, Constraint, Partnership, STRENGTH_GAP_THRESHOLD};
pub use repair::{apply_constraint, balance_strength};
pub use score::{cluster_score, cluster_travel_cost};
