//! Season planning configuration.

use super::sport::Sport;
use crate::cluster::ClusterOptions;
use crate::models::ScheduleFormat;
use crate::sa::SaConfig;
use crate::scoring::ScoringConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Competitive-balance weight above which clustering balances strength.
pub const BALANCE_WEIGHT_THRESHOLD: f64 = 0.5;

/// Everything [`plan_season`](super::plan_season) needs for one run.
///
/// # Examples
///
/// ```
/// use u_league::season::{SeasonConfig, Sport};
///
/// let config = SeasonConfig::for_sport(Sport::Football).with_seed(11);
/// assert_eq!(config.clustering.radius_miles, 500.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeasonConfig {
    pub sport: Sport,

    /// Overrides the schedule's own format when set.
    pub format: Option<ScheduleFormat>,

    pub clustering: ClusterOptions,
    pub scoring: ScoringConfig,
    pub annealing: SaConfig,

    /// Cluster teams and plan road trips before annealing.
    pub use_geographic_clustering: bool,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self::for_sport(Sport::default())
    }
}

impl SeasonConfig {
    /// Defaults with the sport's clustering radius.
    pub fn for_sport(sport: Sport) -> Self {
        Self {
            sport,
            format: None,
            clustering: ClusterOptions::default().with_radius_miles(sport.cluster_radius_miles()),
            scoring: ScoringConfig::default(),
            annealing: SaConfig::default(),
            use_geographic_clustering: true,
        }
    }

    pub fn with_format(mut self, format: ScheduleFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Replaces the clustering options wholesale, radius included.
    pub fn with_clustering(mut self, clustering: ClusterOptions) -> Self {
        self.clustering = clustering;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_geographic_clustering(mut self, enabled: bool) -> Self {
        self.use_geographic_clustering = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.annealing.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.use_geographic_clustering {
            self.clustering.validate()?;
        }
        self.scoring.validate()?;
        self.annealing.validate()
    }

    /// Clustering options as the pipeline runs them: protected rivalries
    /// become partnerships, and strength balancing only runs when
    /// competitive balance carries real weight.
    pub fn effective_clustering(&self) -> ClusterOptions {
        let mut options = self.clustering.clone();
        for rivalry in &self.scoring.protected_rivalries {
            options.partnerships.push(crate::cluster::Partnership::new(
                rivalry.first.clone(),
                rivalry.second.clone(),
            ));
        }
        options.balance_strength = options.balance_strength
            && self.scoring.weights.competitive_balance > BALANCE_WEIGHT_THRESHOLD;
        options
    }
}
