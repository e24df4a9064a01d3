//! Road-trip planning within a cluster.
//!
//! Detects consecutive away games a few days apart and recommends a
//! visiting order that shortens the trip. Short trips (2-4 stops) make a
//! greedy nearest-neighbor route good enough.

mod planner;

pub use planner::{plan_road_trips, RoadTrip, RoadTripPlan, RoadTripPlanner, MAX_TRIP_GAP_DAYS};
