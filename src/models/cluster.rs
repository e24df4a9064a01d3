//! Travel clusters.

use super::team::{Team, TeamId};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Strength assumed for teams with no rating.
pub const DEFAULT_STRENGTH: f64 = 50.0;

/// A group of teams scheduled together for travel efficiency.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    pub teams: Vec<Team>,
}

impl Cluster {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    pub fn singleton(team: Team) -> Self {
        Self { teams: vec![team] }
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn contains(&self, id: &TeamId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &TeamId) -> Option<usize> {
        self.teams.iter().position(|t| &t.id == id)
    }

    pub fn team_ids(&self) -> impl Iterator<Item = &TeamId> {
        self.teams.iter().map(|t| &t.id)
    }

    /// Mean strength, resolving each team through `overrides`, then its own
    /// rating, then [`DEFAULT_STRENGTH`].
    pub fn mean_strength(&self, overrides: &HashMap<TeamId, f64>) -> f64 {
        if self.teams.is_empty() {
            return 0.0;
        }
        let total: f64 = self.teams.iter().map(|t| strength_of(t, overrides)).sum();
        total / self.teams.len() as f64
    }
}

pub(crate) fn strength_of(team: &Team, overrides: &HashMap<TeamId, f64>) -> f64 {
    overrides
        .get(&team.id)
        .copied()
        .or(team.strength)
        .unwrap_or(DEFAULT_STRENGTH)
}
