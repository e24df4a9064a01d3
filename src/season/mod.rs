//! Season planning pipeline.
//!
//! Ties the components together the way a league office runs them:
//! cluster teams with the sport's radius, recommend road trips inside each
//! cluster, then anneal the schedule against the weighted score.

mod config;
mod planner;
mod sport;

pub use config::{SeasonConfig, BALANCE_WEIGHT_THRESHOLD};
pub use planner::{plan_season, plan_season_with_distance, SeasonPlan};
pub use sport::Sport;
