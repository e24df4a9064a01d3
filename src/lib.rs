//! Sports-league schedule optimization.
//!
//! Builds and refines conference schedules in four steps:
//!
//! - **Clustering** ([`cluster`]): greedy geographic grouping of teams by
//!   planar distance, refined by partnerships, one strength-balancing move
//!   and constraint repairs.
//! - **Road trips** ([`roadtrip`]): detection of back-to-back away games
//!   inside a cluster with a recommended visiting order.
//! - **Scoring** ([`scoring`]): weighted sum of travel efficiency,
//!   competitive balance, broadcast-window value and athlete well-being.
//! - **Annealing** ([`optimizer`]): simulated annealing over date swaps,
//!   home/away swaps and in-week moves, built on the generic [`sa`] runner.
//!
//! [`season`] chains them with sport presets. Distance lookups go through
//! [`geo::DistanceSource`]; a planar fallback keeps every run alive when a
//! provider fails.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the data model and configs.
//! - `parallel`: independent annealing runs on the rayon pool.
//! - `remote`: HTTP distance-matrix provider.

pub mod cluster;
pub mod error;
pub mod geo;
pub mod models;
pub mod optimizer;
pub mod roadtrip;
pub mod sa;
pub mod scoring;
pub mod season;

pub use error::{DistanceError, LeagueError, Result, ValidationError, ValidationErrorKind};
