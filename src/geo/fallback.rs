//! Decorators over a [`DistanceSource`]: planar fallback and memoization.

use super::planar::planar_distance;
use super::types::DistanceSource;
use crate::error::DistanceError;
use crate::models::Coordinates;
use log::warn;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Wraps a fallible source; any failure is logged, counted and answered
/// with the planar approximation instead.
///
/// # Examples
///
/// ```
/// use u_league::geo::{FallbackDistance, PlanarDistance, DistanceSource};
/// use u_league::models::Coordinates;
///
/// let source = FallbackDistance::new(PlanarDistance);
/// let d = source.distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 1.0));
/// assert!(d.is_ok());
/// assert_eq!(source.fallback_count(), 0);
/// ```
#[derive(Debug)]
pub struct FallbackDistance<S> {
    inner: S,
    fallbacks: AtomicUsize,
}

impl<S: DistanceSource> FallbackDistance<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fallbacks: AtomicUsize::new(0),
        }
    }

    /// Number of lookups answered by the planar fallback so far.
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Distance in meters; never fails.
    pub fn distance_or_planar(&self, a: Coordinates, b: Coordinates) -> f64 {
        match self.inner.distance(a, b) {
            Ok(d) if d.is_finite() && d >= 0.0 => d,
            Ok(d) => {
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!("distance provider returned unusable value {d}; using planar estimate");
                planar_distance(a, b)
            }
            Err(e) => {
                self.fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!("distance provider failed ({e}); using planar estimate");
                planar_distance(a, b)
            }
        }
    }
}

impl<S: DistanceSource> DistanceSource for FallbackDistance<S> {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        Ok(self.distance_or_planar(a, b))
    }
}

/// Memoizes successful lookups per ordered coordinate pair.
///
/// Failed lookups are not cached, so a recovering provider is retried.
#[derive(Debug)]
pub struct CachedDistance<S> {
    inner: S,
    cache: Mutex<HashMap<((u64, u64), (u64, u64)), f64>>,
}

impl<S: DistanceSource> CachedDistance<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: DistanceSource> DistanceSource for CachedDistance<S> {
    fn distance(&self, a: Coordinates, b: Coordinates) -> Result<f64, DistanceError> {
        let key = (a.key(), b.key());
        if let Ok(cache) = self.cache.lock() {
            if let Some(&d) = cache.get(&key) {
                return Ok(d);
            }
        }
        let d = self.inner.distance(a, b)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, d);
        }
        Ok(d)
    }
}
