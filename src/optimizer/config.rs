//! Optimizer configuration.

use crate::sa::SaConfig;
use crate::scoring::ScoringConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Annealing schedule plus the objective it maximizes.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizerConfig {
    pub annealing: SaConfig,
    pub scoring: ScoringConfig,
}

impl OptimizerConfig {
    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.annealing.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.annealing.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.annealing.validate()?;
        self.scoring.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = OptimizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.annealing.max_iterations, 1000);
    }

    #[test]
    fn test_invalid_annealing_rejected() {
        let config = OptimizerConfig::default()
            .with_annealing(SaConfig::default().with_cooling_rate(1.5));
        assert!(config.validate().is_err());
    }
}
