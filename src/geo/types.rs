//! Distance provider abstraction and unit conversions.

use crate::error::DistanceError;
use crate::models::Coordinates;

/// Meters per mile.
pub const METERS_PER_MILE: f64 = 1_609.34;

/// Meters per kilometer.
pub const METERS_PER_KM: f64 = 1_000.0;

/// A source of point-to-point distances, in meters.
///
/// Implementations may be remote and fallible. Wrap a fallible source in
/// [`FallbackDistance`](super::FallbackDistance) before handing it to the
/// scorer.
pub trait DistanceSource: Send + Sync {
    /// Distance between `a` and `b` in meters.
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError>;
}

impl<S: DistanceSource + ?Sized> DistanceSource for Box<S> {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        (**self).distance(a, b)
    }
}

impl<S: DistanceSource + ?Sized> DistanceSource for std::sync::Arc<S> {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        (**self).distance(a, b)
    }
}

pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles_to_meters(miles) / METERS_PER_KM
}

pub fn meters_to_km(meters: f64) -> f64 {
    meters / METERS_PER_KM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert!((miles_to_km(300.0) - 482.802).abs() < 1e-9);
        assert!((meters_to_km(1500.0) - 1.5).abs() < 1e-12);
    }
}
