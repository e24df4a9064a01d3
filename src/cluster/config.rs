//! Clustering options and relocation constraints.

use crate::models::TeamId;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean-strength gap (0-100 scale) that triggers a balancing move.
pub const STRENGTH_GAP_THRESHOLD: f64 = 10.0;

/// Two teams that should share a cluster from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partnership {
    pub first: TeamId,
    pub second: TeamId,
}

impl Partnership {
    pub fn new(first: impl Into<TeamId>, second: impl Into<TeamId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// Advisory repair applied after geometric clustering, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Constraint {
    /// Keep `team` with at least one of `preferred_partners`, e.g. for a
    /// no-Sunday-play policy that only some opponents accommodate.
    ReligiousPolicy {
        team: TeamId,
        preferred_partners: Vec<TeamId>,
    },
    /// Teams sharing a venue must share a cluster.
    VenueSharing { teams: Vec<TeamId> },
    /// Keep a high-travel-cost team with at least one preferred partner.
    TravelCost {
        team: TeamId,
        preferred_partners: Vec<TeamId>,
    },
    /// Force `team` into the cluster at `target_cluster`.
    StrategicOutlier { team: TeamId, target_cluster: usize },
}

/// Options for [`ClusterBuilder`](super::ClusterBuilder).
///
/// # Examples
///
/// ```
/// use u_league::cluster::{ClusterOptions, Partnership};
///
/// let options = ClusterOptions::default()
///     .with_radius_miles(500.0)
///     .with_size_bounds(2, 3)
///     .with_partnership(Partnership::new("kansas", "kansas-state"));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterOptions {
    /// Maximum seed-to-member distance, in miles.
    pub radius_miles: f64,

    /// Clusters smaller than this are dissolved back into the pool.
    pub min_size: usize,

    /// Seeds stop absorbing teams at this size.
    pub max_size: usize,

    /// Pairs seeded directly as clusters before geometric clustering.
    pub partnerships: Vec<Partnership>,

    /// Strength overrides; teams fall back to their own rating, then 50.
    pub team_strengths: HashMap<TeamId, f64>,

    /// Whether to run the single strength-balancing move.
    pub balance_strength: bool,

    /// Repairs applied in order after clustering.
    pub constraints: Vec<Constraint>,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius_miles: 300.0,
            min_size: 2,
            max_size: 4,
            partnerships: Vec::new(),
            team_strengths: HashMap::new(),
            balance_strength: true,
            constraints: Vec::new(),
        }
    }
}

impl ClusterOptions {
    pub fn with_radius_miles(mut self, miles: f64) -> Self {
        self.radius_miles = miles;
        self
    }

    pub fn with_size_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_size = min;
        self.max_size = max;
        self
    }

    pub fn with_partnership(mut self, partnership: Partnership) -> Self {
        self.partnerships.push(partnership);
        self
    }

    pub fn with_team_strength(mut self, team: impl Into<TeamId>, strength: f64) -> Self {
        self.team_strengths.insert(team.into(), strength);
        self
    }

    pub fn with_balance_strength(mut self, enabled: bool) -> Self {
        self.balance_strength = enabled;
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), String> {
        if self.radius_miles.is_nan() || self.radius_miles <= 0.0 {
            return Err(format!("radius_miles must be positive, got {}", self.radius_miles));
        }
        if self.min_size == 0 {
            return Err("min_size must be at least 1".into());
        }
        if self.min_size > self.max_size {
            return Err(format!(
                "min_size ({}) must not exceed max_size ({})",
                self.min_size, self.max_size
            ));
        }
        Ok(())
    }
}
