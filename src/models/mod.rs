//! League data model.
//!
//! Plain data consumed and produced by the clustering, scoring and
//! optimization layers. Nothing here knows about persistence or transport.

mod cluster;
mod metrics;
mod schedule;
mod team;

pub use cluster::{Cluster, DEFAULT_STRENGTH};
pub(crate) use cluster::strength_of;
pub use metrics::{improvement_pct, OptimizationMetrics, Snapshot};
pub use schedule::{days_between, Matchup, Schedule, ScheduleFormat, TeamGame, Week};
pub use team::{Coordinates, Team, TeamId};

#[cfg(test)]
pub(crate) use schedule::test_support;
