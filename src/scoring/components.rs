//! The four objective components.
//!
//! Each returns a value on a roughly 0-100 scale where higher is better.

use super::config::{PremiumWindows, Rivalry, ScoringConfig};
use crate::geo::meters_to_km;
use crate::models::{days_between, Coordinates, Schedule, TeamGame, TeamId};
use chrono::{Datelike, Timelike, Weekday};
use std::collections::HashMap;

/// Score used when a component has nothing to measure.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Travel efficiency: `max(100 - avg_km / 100, 0)`.
///
/// Each of `teams` with coordinates walks its games in order from its home
/// base, paying for every leg to an away venue, every return home before a
/// home game, and the trip home after a trailing away game. Games against
/// teams without coordinates are ignored. The total is averaged over all of
/// `teams`, located or not; 50 when no team has coordinates.
pub fn travel_efficiency<'a, I, D>(
    schedule: &Schedule,
    teams: I,
    locations: &HashMap<TeamId, Coordinates>,
    distance: D,
) -> f64
where
    I: IntoIterator<Item = &'a TeamId>,
    D: Fn(Coordinates, Coordinates) -> f64,
{
    if locations.is_empty() {
        return NEUTRAL_SCORE;
    }

    let games = schedule.games_by_team();
    let mut team_count = 0usize;
    let mut total_m = 0.0;
    for team in teams {
        team_count += 1;
        let (Some(&home), Some(team_games)) = (locations.get(team), games.get(team)) else {
            continue;
        };
        total_m += team_travel(team, home, team_games, locations, &distance);
    }
    if team_count == 0 {
        return NEUTRAL_SCORE;
    }

    let avg_km = meters_to_km(total_m / team_count as f64);
    (100.0 - avg_km / 100.0).max(0.0)
}

/// Meters travelled by one team over its season.
pub(crate) fn team_travel<D>(
    team: &TeamId,
    home: Coordinates,
    games: &[TeamGame],
    locations: &HashMap<TeamId, Coordinates>,
    distance: &D,
) -> f64
where
    D: Fn(Coordinates, Coordinates) -> f64,
{
    let mut total = 0.0;
    let mut here = home;
    let mut last_away = false;
    for game in games {
        if !locations.contains_key(&game.opponent) {
            continue;
        }
        if game.is_home {
            if here != home {
                total += distance(here, home);
                here = home;
            }
            last_away = false;
        } else {
            let venue = locations[game.host(team)];
            total += distance(here, venue);
            here = venue;
            last_away = true;
        }
    }
    if last_away {
        total += distance(here, home);
    }
    total
}

/// Percentage of protected rivalries that appear, in either venue order.
/// 100 when no rivalries are configured.
pub fn competitive_balance(schedule: &Schedule, rivalries: &[Rivalry]) -> f64 {
    if rivalries.is_empty() {
        return 100.0;
    }
    let present = rivalries
        .iter()
        .filter(|r| schedule.matchups().any(|m| m.is_pairing(&r.first, &r.second)))
        .count();
    present as f64 / rivalries.len() as f64 * 100.0
}

/// Percentage of games kicking off inside a premium window.
pub fn broadcast_value(schedule: &Schedule, windows: &PremiumWindows) -> f64 {
    let total = schedule.matchup_count();
    if total == 0 {
        return 0.0;
    }
    let premium = schedule
        .matchups()
        .filter(|m| windows.contains(m.date.weekday(), m.date.hour()))
        .count();
    premium as f64 / total as f64 * 100.0
}

/// Well-being factors for one team, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamWellbeing {
    /// Share of away games played Friday through Sunday; 0 with no away games.
    pub weekend_travel: f64,
    /// Share of consecutive-game gaps meeting the rest threshold; 0 with
    /// fewer than two games.
    pub rest: f64,
    /// Penalty curve on the longest away streak.
    pub consecutive_away: f64,
}

impl TeamWellbeing {
    pub fn score(&self) -> f64 {
        (self.weekend_travel + self.rest + self.consecutive_away) / 3.0
    }
}

fn is_weekday_travel(day: Weekday) -> bool {
    matches!(day, Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu)
}

/// Scores one team's chronological game list.
pub fn team_wellbeing(games: &[TeamGame], config: &ScoringConfig) -> TeamWellbeing {
    let away: Vec<&TeamGame> = games.iter().filter(|g| !g.is_home).collect();
    let weekend_travel = if away.is_empty() {
        0.0
    } else {
        let weekend = away
            .iter()
            .filter(|g| !is_weekday_travel(g.date.weekday()))
            .count();
        weekend as f64 / away.len() as f64 * 100.0
    };

    let rest = if games.len() < 2 {
        0.0
    } else {
        let rested = games
            .windows(2)
            .filter(|w| days_between(w[0].date, w[1].date) >= config.min_rest_days)
            .count();
        rested as f64 / (games.len() - 1) as f64 * 100.0
    };

    let mut streak = 0usize;
    let mut longest = 0usize;
    for g in games {
        if g.is_home {
            streak = 0;
        } else {
            streak += 1;
            longest = longest.max(streak);
        }
    }
    let consecutive_away = consecutive_away_score(longest, config);

    TeamWellbeing {
        weekend_travel,
        rest,
        consecutive_away,
    }
}

/// 100 up to the threshold, minus the penalty per extra away game, floored at 0.
pub fn consecutive_away_score(longest_streak: usize, config: &ScoringConfig) -> f64 {
    if longest_streak <= config.max_consecutive_away {
        100.0
    } else {
        let excess = (longest_streak - config.max_consecutive_away) as f64;
        (100.0 - excess * config.consecutive_away_penalty).max(0.0)
    }
}

/// Athlete well-being averaged over all of `teams`.
///
/// Teams without games contribute 0 to every factor but still count in the
/// average. 50 when `teams` is empty.
pub fn wellbeing<'a, I>(schedule: &Schedule, teams: I, config: &ScoringConfig) -> f64
where
    I: IntoIterator<Item = &'a TeamId>,
{
    let games = schedule.games_by_team();
    let mut team_count = 0usize;
    let mut total = 0.0;
    for team in teams {
        team_count += 1;
        if let Some(team_games) = games.get(team).filter(|g| !g.is_empty()) {
            total += team_wellbeing(team_games, config).score();
        }
    }
    if team_count == 0 {
        NEUTRAL_SCORE
    } else {
        total / team_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::planar_distance;
    use crate::models::test_support::{at, game};
    use crate::models::{ScheduleFormat, Week};

    fn schedule(matchups: Vec<crate::models::Matchup>) -> Schedule {
        let mut week = Week::new(0);
        week.matchups = matchups;
        Schedule::new(ScheduleFormat::DoubleRoundRobin).with_week(week)
    }

    #[test]
    fn test_rivalry_present_and_absent() {
        let s = schedule(vec![game("m1", "ku", "kstate", at(2025, 1, 4, 19), 0)]);
        assert_eq!(competitive_balance(&s, &[Rivalry::new("kstate", "ku")]), 100.0);
        assert_eq!(competitive_balance(&s, &[Rivalry::new("ku", "mizzou")]), 0.0);
        assert_eq!(
            competitive_balance(&s, &[Rivalry::new("ku", "kstate"), Rivalry::new("ku", "mizzou")]),
            50.0
        );
        assert_eq!(competitive_balance(&s, &[]), 100.0);
    }

    #[test]
    fn test_broadcast_value() {
        // 2025-01-04 is a Saturday, 2025-01-05 a Sunday.
        let s = schedule(vec![
            game("m1", "a", "b", at(2025, 1, 4, 14), 0),
            game("m2", "c", "d", at(2025, 1, 5, 11), 0),
        ]);
        assert_eq!(broadcast_value(&s, &PremiumWindows::default()), 50.0);
        assert_eq!(broadcast_value(&Schedule::default(), &PremiumWindows::default()), 0.0);
    }

    #[test]
    fn test_five_game_away_streak() {
        let games: Vec<TeamGame> = (0..5)
            .map(|i| TeamGame {
                matchup_id: format!("m{i}"),
                opponent: TeamId::from(format!("o{i}")),
                date: at(2025, 1, 3 + i * 7, 19),
                is_home: false,
                week: i as usize,
            })
            .collect();
        let w = team_wellbeing(&games, &ScoringConfig::default());
        assert_eq!(w.consecutive_away, 60.0);
        assert_eq!(w.rest, 100.0);
        // All on Fridays.
        assert_eq!(w.weekend_travel, 100.0);
    }

    #[test]
    fn test_consecutive_away_floor() {
        let config = ScoringConfig::default();
        assert_eq!(consecutive_away_score(3, &config), 100.0);
        assert_eq!(consecutive_away_score(4, &config), 80.0);
        assert_eq!(consecutive_away_score(9, &config), 0.0);
    }

    #[test]
    fn test_rest_fraction() {
        // Mon, Tue, Fri: one short gap and one adequate gap.
        let s = schedule(vec![
            game("m1", "a", "b", at(2025, 1, 6, 19), 0),
            game("m2", "a", "c", at(2025, 1, 7, 19), 0),
            game("m3", "a", "d", at(2025, 1, 10, 19), 0),
        ]);
        let games = s.games_by_team();
        let w = team_wellbeing(&games[&TeamId::from("a")], &ScoringConfig::default());
        assert_eq!(w.rest, 50.0);
        // all home games: no travel to credit
        assert_eq!(w.weekend_travel, 0.0);
    }

    #[test]
    fn test_weekday_travel_penalized() {
        // Tuesday away game, Saturday away game.
        let s = schedule(vec![
            game("m1", "b", "a", at(2025, 1, 7, 19), 0),
            game("m2", "c", "a", at(2025, 1, 11, 19), 0),
        ]);
        let games = s.games_by_team();
        let w = team_wellbeing(&games[&TeamId::from("a")], &ScoringConfig::default());
        assert_eq!(w.weekend_travel, 50.0);
    }

    #[test]
    fn test_travel_round_trip() {
        let locations: HashMap<TeamId, Coordinates> = [
            (TeamId::from("a"), Coordinates::new(0.0, 0.0)),
            (TeamId::from("b"), Coordinates::new(0.0, 1.0)),
        ]
        .into_iter()
        .collect();
        let s = schedule(vec![game("m1", "b", "a", at(2025, 1, 4, 19), 0)]);
        let teams = [TeamId::from("a"), TeamId::from("b")];
        // a travels there and back; b stays home.
        let expected_km = 2.0 * 111.319 / 2.0;
        let score = travel_efficiency(&s, &teams, &locations, planar_distance);
        assert!((score - (100.0 - expected_km / 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_travel_returns_home_between_away_and_home() {
        let locations: HashMap<TeamId, Coordinates> = [
            (TeamId::from("a"), Coordinates::new(0.0, 0.0)),
            (TeamId::from("b"), Coordinates::new(0.0, 1.0)),
            (TeamId::from("c"), Coordinates::new(0.0, 2.0)),
        ]
        .into_iter()
        .collect();
        let s = schedule(vec![
            game("m1", "b", "a", at(2025, 1, 1, 19), 0),
            game("m2", "c", "a", at(2025, 1, 2, 19), 0),
            game("m3", "a", "b", at(2025, 1, 5, 19), 0),
        ]);
        let games = s.games_by_team();
        let a = TeamId::from("a");
        let meters = team_travel(&a, locations[&a], &games[&a], &locations, &planar_distance);
        // 0 -> 1 -> 2 -> home(0)
        assert!((meters - 4.0 * 111_319.0).abs() < 1e-6);
    }

    #[test]
    fn test_travel_without_locations_is_neutral() {
        let s = schedule(vec![game("m1", "b", "a", at(2025, 1, 4, 19), 0)]);
        let teams = [TeamId::from("a"), TeamId::from("b")];
        assert_eq!(
            travel_efficiency(&s, &teams, &HashMap::new(), |_, _| 0.0),
            NEUTRAL_SCORE
        );
    }

    #[test]
    fn test_travel_averages_over_every_team() {
        let locations: HashMap<TeamId, Coordinates> = [
            (TeamId::from("a"), Coordinates::new(0.0, 0.0)),
            (TeamId::from("b"), Coordinates::new(0.0, 1.0)),
        ]
        .into_iter()
        .collect();
        let s = schedule(vec![game("m1", "b", "a", at(2025, 1, 4, 19), 0)]);
        // "c" has neither coordinates nor games but still dilutes the average.
        let teams = [TeamId::from("a"), TeamId::from("b"), TeamId::from("c")];
        let expected_km = 2.0 * 111.319 / 3.0;
        let score = travel_efficiency(&s, &teams, &locations, planar_distance);
        assert!((score - (100.0 - expected_km / 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_home_only_team_gets_no_weekend_credit() {
        // Saturday and Wednesday, both at home.
        let s = schedule(vec![
            game("m1", "a", "b", at(2025, 1, 4, 19), 0),
            game("m2", "a", "c", at(2025, 1, 8, 19), 0),
        ]);
        let games = s.games_by_team();
        let w = team_wellbeing(&games[&TeamId::from("a")], &ScoringConfig::default());
        assert_eq!(w.weekend_travel, 0.0);
        assert_eq!(w.rest, 100.0);
        assert_eq!(w.consecutive_away, 100.0);
    }

    #[test]
    fn test_single_game_team_gets_no_rest_credit() {
        let s = schedule(vec![game("m1", "a", "b", at(2025, 1, 4, 19), 0)]);
        let games = s.games_by_team();
        let w = team_wellbeing(&games[&TeamId::from("b")], &ScoringConfig::default());
        assert_eq!(w.rest, 0.0);
        assert_eq!(w.weekend_travel, 100.0);
    }

    #[test]
    fn test_wellbeing_counts_idle_teams() {
        // Saturday game, a hosts b; c is configured but never plays.
        let s = schedule(vec![game("m1", "a", "b", at(2025, 1, 4, 14), 0)]);
        let teams = [TeamId::from("a"), TeamId::from("b"), TeamId::from("c")];
        let score = wellbeing(&s, &teams, &ScoringConfig::default());
        // a: (0 + 0 + 100) / 3, b: (100 + 0 + 100) / 3, c: 0
        let expected = (100.0 / 3.0 + 200.0 / 3.0) / 3.0;
        assert!((score - expected).abs() < 1e-9);
        assert!((score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_wellbeing_without_teams_is_neutral() {
        let s = schedule(vec![game("m1", "a", "b", at(2025, 1, 4, 14), 0)]);
        let none: [TeamId; 0] = [];
        assert_eq!(wellbeing(&s, &none, &ScoringConfig::default()), NEUTRAL_SCORE);
    }
}
