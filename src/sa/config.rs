//! SA configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Simulated Annealing algorithm.
///
/// Temperature cools geometrically, `T_{k+1} = cooling_rate * T_k`, once
/// per iteration. The run always lasts `max_iterations` iterations unless
/// cancelled or out of time; there is no convergence-based stop.
///
/// # Examples
///
/// ```
/// use u_league::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_rate(0.98)
///     .with_max_iterations(2000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Geometric cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Iteration budget.
    pub max_iterations: usize,

    /// Record a snapshot every this many iterations.
    pub snapshot_interval: usize,

    /// Wall-clock budget; the run stops early and reports `cancelled` when exceeded.
    pub time_limit: Option<Duration>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            cooling_rate: 0.95,
            max_iterations: 1000,
            snapshot_interval: 100,
            time_limit: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_snapshot_interval(mut self, n: usize) -> Self {
        self.snapshot_interval = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive".into());
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 || self.cooling_rate.is_nan() {
            return Err(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            ));
        }
        if self.snapshot_interval == 0 {
            return Err("snapshot_interval must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.95).abs() < 1e-10);
        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.snapshot_interval, 100);
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
        assert!(SaConfig::default().with_max_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(SaConfig::default().with_cooling_rate(1.5).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(1.0).validate().is_err());
        assert!(SaConfig::default().with_cooling_rate(0.0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_snapshot_interval() {
        let config = SaConfig::default().with_snapshot_interval(0);
        assert!(config.validate().is_err());
    }
}
