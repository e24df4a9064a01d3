//! Season schedule: weeks of matchups plus the competition format.

use super::metrics::OptimizationMetrics;
use super::team::TeamId;
use crate::error::{ValidationError, ValidationErrorKind};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Competition format of a schedule.
///
/// Gates which mutation operators the optimizer may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScheduleFormat {
    #[default]
    SingleRoundRobin,
    DoubleRoundRobin,
    PartialRoundRobin,
    ThreeGameSeries,
    DualMeet,
}

impl ScheduleFormat {
    /// Whether home/away roles may be swapped freely.
    pub fn is_round_robin(&self) -> bool {
        matches!(
            self,
            ScheduleFormat::SingleRoundRobin | ScheduleFormat::DoubleRoundRobin
        )
    }
}

/// A single game between two distinct teams.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matchup {
    pub id: String,
    pub home: TeamId,
    pub away: TeamId,
    /// Kickoff in venue-local time.
    pub date: NaiveDateTime,
    /// Index of the week this game belongs to.
    pub week: usize,
}

impl Matchup {
    pub fn new(
        id: impl Into<String>,
        home: impl Into<TeamId>,
        away: impl Into<TeamId>,
        date: NaiveDateTime,
        week: usize,
    ) -> Self {
        Self {
            id: id.into(),
            home: home.into(),
            away: away.into(),
            date,
            week,
        }
    }

    /// Whether `team` plays in this game.
    pub fn involves(&self, team: &TeamId) -> bool {
        &self.home == team || &self.away == team
    }

    /// Whether the two games share at least one team.
    pub fn shares_team(&self, other: &Matchup) -> bool {
        self.involves(&other.home) || self.involves(&other.away)
    }

    /// Whether this game pits `a` against `b`, regardless of venue.
    pub fn is_pairing(&self, a: &TeamId, b: &TeamId) -> bool {
        (&self.home == a && &self.away == b) || (&self.home == b && &self.away == a)
    }
}

/// One scheduling week.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Week {
    pub index: usize,
    pub matchups: Vec<Matchup>,
    /// Calendar days on which games may be played this week.
    pub days: Vec<NaiveDate>,
}

impl Week {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            matchups: Vec::new(),
            days: Vec::new(),
        }
    }

    pub fn with_days(mut self, days: Vec<NaiveDate>) -> Self {
        self.days = days;
        self
    }

    pub fn with_matchup(mut self, matchup: Matchup) -> Self {
        self.matchups.push(matchup);
        self
    }
}

/// One team's view of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamGame {
    pub matchup_id: String,
    pub opponent: TeamId,
    pub date: NaiveDateTime,
    pub is_home: bool,
    pub week: usize,
}

impl TeamGame {
    /// The team whose venue hosts the game, seen from `team`.
    pub fn host<'a>(&'a self, team: &'a TeamId) -> &'a TeamId {
        if self.is_home {
            team
        } else {
            &self.opponent
        }
    }
}

/// A season schedule.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub format: ScheduleFormat,
    pub weeks: Vec<Week>,
    /// Filled in by the optimizer; never read as input.
    pub metrics: Option<OptimizationMetrics>,
}

impl Schedule {
    pub fn new(format: ScheduleFormat) -> Self {
        Self {
            format,
            weeks: Vec::new(),
            metrics: None,
        }
    }

    pub fn with_week(mut self, week: Week) -> Self {
        self.weeks.push(week);
        self
    }

    /// All matchups in week order.
    pub fn matchups(&self) -> impl Iterator<Item = &Matchup> {
        self.weeks.iter().flat_map(|w| w.matchups.iter())
    }

    pub fn matchup_count(&self) -> usize {
        self.weeks.iter().map(|w| w.matchups.len()).sum()
    }

    /// Chronological game list for every team appearing in the schedule.
    ///
    /// Games on the same date keep their schedule order.
    pub fn games_by_team(&self) -> HashMap<TeamId, Vec<TeamGame>> {
        let mut games: HashMap<TeamId, Vec<TeamGame>> = HashMap::new();
        for m in self.matchups() {
            games.entry(m.home.clone()).or_default().push(TeamGame {
                matchup_id: m.id.clone(),
                opponent: m.away.clone(),
                date: m.date,
                is_home: true,
                week: m.week,
            });
            games.entry(m.away.clone()).or_default().push(TeamGame {
                matchup_id: m.id.clone(),
                opponent: m.home.clone(),
                date: m.date,
                is_home: false,
                week: m.week,
            });
        }
        for list in games.values_mut() {
            list.sort_by_key(|g| g.date);
        }
        games
    }

    /// Checks structural integrity: every matchup has an id and two
    /// distinct, non-empty teams.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for m in self.matchups() {
            if m.id.is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingId,
                    format!("matchup in week {} has no id", m.week),
                ));
            }
            if m.home.is_empty() || m.away.is_empty() {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingId,
                    format!("matchup '{}' is missing a team id", m.id),
                ));
            }
            if m.home == m.away {
                return Err(ValidationError::new(
                    ValidationErrorKind::SelfMatchup,
                    format!("matchup '{}' pits '{}' against itself", m.id, m.home),
                ));
            }
        }
        Ok(())
    }
}

/// Whole days between two kickoffs, rounded to the nearest day.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    ((to - from).num_seconds() as f64 / 86_400.0).round() as i64
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn sample() -> Schedule {
        Schedule::new(ScheduleFormat::DoubleRoundRobin)
            .with_week(
                Week::new(0)
                    .with_matchup(game("m1", "a", "b", at(2025, 1, 4, 19), 0))
                    .with_matchup(game("m2", "c", "a", at(2025, 1, 2, 19), 0)),
            )
            .with_week(Week::new(1).with_matchup(game("m3", "b", "c", at(2025, 1, 9, 19), 1)))
    }

    #[test]
    fn test_round_robin_formats() {
        assert!(ScheduleFormat::SingleRoundRobin.is_round_robin());
        assert!(ScheduleFormat::DoubleRoundRobin.is_round_robin());
        assert!(!ScheduleFormat::PartialRoundRobin.is_round_robin());
        assert!(!ScheduleFormat::ThreeGameSeries.is_round_robin());
    }

    #[test]
    fn test_games_by_team_chronological() {
        let games = sample().games_by_team();
        let a = &games[&TeamId::from("a")];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].matchup_id, "m2");
        assert!(!a[0].is_home);
        assert_eq!(a[1].matchup_id, "m1");
        assert!(a[1].is_home);
    }

    #[test]
    fn test_validate_rejects_self_matchup() {
        let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin)
            .with_week(Week::new(0).with_matchup(game("m1", "a", "a", at(2025, 1, 4, 19), 0)));
        let err = schedule.validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::SelfMatchup);
    }

    #[test]
    fn test_validate_ok() {
        assert!(sample().validate().is_ok());
        assert_eq!(sample().matchup_count(), 3);
    }

    #[test]
    fn test_days_between_rounds() {
        assert_eq!(days_between(at(2025, 1, 1, 19), at(2025, 1, 3, 13)), 2);
        assert_eq!(days_between(at(2025, 1, 1, 19), at(2025, 1, 1, 21)), 0);
    }

    #[test]
    fn test_is_pairing_ignores_venue() {
        let m = game("m1", "a", "b", at(2025, 1, 4, 19), 0);
        assert!(m.is_pairing(&"b".into(), &"a".into()));
        assert!(!m.is_pairing(&"a".into(), &"c".into()));
    }
}
