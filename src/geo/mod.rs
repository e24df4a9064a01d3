//! Geographic distance.
//!
//! [`planar_distance`] is the deterministic approximation used inside
//! clustering and as the universal fallback. Travel scoring goes through a
//! [`DistanceSource`], normally a [`FallbackDistance`] wrapping a remote
//! provider so that provider outages degrade accuracy rather than fail.

mod fallback;
mod planar;
#[cfg(feature = "remote")]
mod remote;
mod types;

pub use fallback::{CachedDistance, FallbackDistance};
pub use planar::{planar_distance, PlanarDistance, METERS_PER_DEGREE};
#[cfg(feature = "remote")]
pub use remote::{RemoteDistance, DEFAULT_ENDPOINT};
pub use types::{
    meters_to_km, miles_to_km, miles_to_meters, DistanceSource, METERS_PER_KM, METERS_PER_MILE,
};
