//! Planar distance approximation.
//!
//! Treats latitude/longitude degrees as a flat grid with a fixed
//! meters-per-degree scale. Accurate enough for regional distances and
//! never fails, so it backs both the clustering step and the fallback path.

use super::types::DistanceSource;
use crate::error::DistanceError;
use crate::models::Coordinates;

/// Meters per degree at the equator.
pub const METERS_PER_DEGREE: f64 = 111_319.0;

/// Planar distance in meters.
pub fn planar_distance(a: Coordinates, b: Coordinates) -> f64 {
    let dlat = a.lat - b.lat;
    let dlng = a.lng - b.lng;
    (dlat * dlat + dlng * dlng).sqrt() * METERS_PER_DEGREE
}

/// [`DistanceSource`] backed by [`planar_distance`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanarDistance;

impl DistanceSource for PlanarDistance {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        Ok(planar_distance(a, b))
    }
}
