//! Weighted multi-factor schedule scorer.

use super::components::{broadcast_value, competitive_balance, travel_efficiency, wellbeing};
use super::config::ScoringConfig;
use crate::error::{LeagueError, Result};
use crate::geo::{DistanceSource, FallbackDistance, PlanarDistance};
use crate::models::{Coordinates, Schedule, Team, TeamId};
use std::collections::HashMap;
use std::sync::Arc;

/// Component scores plus their weighted total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub travel: f64,
    pub competitive_balance: f64,
    pub broadcast: f64,
    pub wellbeing: f64,
    /// Weighted sum of the four components.
    pub total: f64,
    /// `total` divided by the sum of weights (0 when all weights are 0).
    pub normalized: f64,
}

/// Scores schedules for a fixed set of teams.
///
/// Distance lookups go through a [`FallbackDistance`], so a failing
/// provider lowers accuracy but never fails scoring.
///
/// # Examples
///
/// ```
/// use u_league::models::{Schedule, ScheduleFormat, Team};
/// use u_league::scoring::{ScheduleScorer, ScoringConfig};
///
/// let teams = vec![Team::new("a").with_coordinates(39.0, -94.5)];
/// let scorer = ScheduleScorer::new(&teams, ScoringConfig::default()).unwrap();
/// let score = scorer.score(&Schedule::new(ScheduleFormat::SingleRoundRobin)).unwrap();
/// assert!(score > 0.0);
/// ```
#[derive(Clone)]
pub struct ScheduleScorer {
    config: ScoringConfig,
    team_ids: Vec<TeamId>,
    locations: HashMap<TeamId, Coordinates>,
    distance: Arc<FallbackDistance<Box<dyn DistanceSource>>>,
}

impl std::fmt::Debug for ScheduleScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleScorer")
            .field("config", &self.config)
            .field("teams", &self.team_ids.len())
            .field("fallbacks", &self.fallback_count())
            .finish()
    }
}

impl ScheduleScorer {
    /// Creates a scorer using planar distances only.
    pub fn new(teams: &[Team], config: ScoringConfig) -> Result<Self> {
        config.validate().map_err(LeagueError::InvalidConfig)?;
        let planar: Box<dyn DistanceSource> = Box::new(PlanarDistance);
        Ok(Self {
            config,
            team_ids: teams.iter().map(|t| t.id.clone()).collect(),
            locations: teams
                .iter()
                .filter_map(|t| t.coordinates.map(|c| (t.id.clone(), c)))
                .collect(),
            distance: Arc::new(FallbackDistance::new(planar)),
        })
    }

    /// Routes travel distances through `source`, falling back to planar
    /// distance whenever it fails.
    pub fn with_distance_source<S: DistanceSource + 'static>(mut self, source: S) -> Self {
        let source: Box<dyn DistanceSource> = Box::new(source);
        self.distance = Arc::new(FallbackDistance::new(source));
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Lookups answered by the planar fallback since construction.
    pub fn fallback_count(&self) -> usize {
        self.distance.fallback_count()
    }

    /// Validates `schedule`, then returns its weighted score.
    pub fn score(&self, schedule: &Schedule) -> Result<f64> {
        schedule.validate()?;
        Ok(self.evaluate(schedule).total)
    }

    /// Computes every component without validating the schedule.
    pub fn evaluate(&self, schedule: &Schedule) -> ScoreBreakdown {
        let w = &self.config.weights;
        let travel = travel_efficiency(schedule, &self.team_ids, &self.locations, |a, b| {
            self.distance.distance_or_planar(a, b)
        });
        let competitive_balance = competitive_balance(schedule, &self.config.protected_rivalries);
        let broadcast = broadcast_value(schedule, &self.config.premium_windows);
        let wellbeing = wellbeing(schedule, &self.team_ids, &self.config);

        let total = travel * w.travel
            + competitive_balance * w.competitive_balance
            + broadcast * w.broadcast
            + wellbeing * w.wellbeing;
        let weight_sum = w.sum();
        let normalized = if weight_sum > 0.0 { total / weight_sum } else { 0.0 };

        ScoreBreakdown {
            travel,
            competitive_balance,
            broadcast,
            wellbeing,
            total,
            normalized,
        }
    }
}

/// Scores `schedule` for `teams` with planar distances.
pub fn score(schedule: &Schedule, teams: &[Team], config: &ScoringConfig) -> Result<f64> {
    ScheduleScorer::new(teams, config.clone())?.score(schedule)
}
