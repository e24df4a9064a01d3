//! Schedule optimization by simulated annealing.
//!
//! [`ScheduleOptimizer`] plugs the weighted schedule score and the
//! [`Mutation`] neighborhood into the generic [`sa`](crate::sa) runner.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Van Hentenryck & Vergados (2007), "Population-based simulated annealing
//!   for traveling tournaments"

mod config;
mod mutation;
mod runner;

pub use config::OptimizerConfig;
pub use mutation::{move_within_week, swap_dates, swap_home_away, Mutation};
pub use runner::{best_of, optimize, ScheduleOptimizer};
