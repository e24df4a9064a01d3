//! Neighbor moves on a season schedule.
//!
//! Every move works on a fresh copy of the input; the input is never
//! touched. A move that finds no legal target returns `None` and the
//! annealing iteration is skipped.

use crate::models::{Matchup, Schedule};
use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single schedule mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mutation {
    /// Exchange the kickoffs of two games in different weeks.
    SwapDates,
    /// Flip home and away of one game. Round-robin formats only.
    SwapHomeAway,
    /// Move one game to another available day of its week.
    MoveWithinWeek,
}

impl Mutation {
    pub const ALL: [Mutation; 3] = [
        Mutation::SwapDates,
        Mutation::SwapHomeAway,
        Mutation::MoveWithinWeek,
    ];

    /// Picks a mutation uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Applies this mutation to a copy of `schedule`.
    pub fn apply<R: Rng>(self, schedule: &Schedule, rng: &mut R) -> Option<Schedule> {
        match self {
            Mutation::SwapDates => swap_dates(schedule, rng),
            Mutation::SwapHomeAway => swap_home_away(schedule, rng),
            Mutation::MoveWithinWeek => move_within_week(schedule, rng),
        }
    }
}

/// Swaps the kickoffs of one game from each of two distinct non-empty weeks.
///
/// Each game is relocated into the other's week. The pair is rejected when
/// the games share a team, or when a relocated game would put one of its
/// teams on the same day as another game of that team in its new week.
pub fn swap_dates<R: Rng>(schedule: &Schedule, rng: &mut R) -> Option<Schedule> {
    let with_games: Vec<usize> = schedule
        .weeks
        .iter()
        .enumerate()
        .filter(|(_, w)| !w.matchups.is_empty())
        .map(|(i, _)| i)
        .collect();
    if with_games.len() < 2 {
        return None;
    }

    let a = rng.random_range(0..with_games.len());
    let mut b = rng.random_range(0..with_games.len() - 1);
    if b >= a {
        b += 1;
    }
    let (wa, wb) = (with_games[a], with_games[b]);
    let ga = rng.random_range(0..schedule.weeks[wa].matchups.len());
    let gb = rng.random_range(0..schedule.weeks[wb].matchups.len());

    let first = &schedule.weeks[wa].matchups[ga];
    let second = &schedule.weeks[wb].matchups[gb];
    if first.shares_team(second) {
        return None;
    }
    if clashes(&schedule.weeks[wb].matchups, gb, first, second.date.date())
        || clashes(&schedule.weeks[wa].matchups, ga, second, first.date.date())
    {
        return None;
    }

    let mut next = schedule.clone();
    let week_a = next.weeks[wa].index;
    let week_b = next.weeks[wb].index;

    let mut moved_to_b = next.weeks[wa].matchups[ga].clone();
    let mut moved_to_a = next.weeks[wb].matchups[gb].clone();
    std::mem::swap(&mut moved_to_b.date, &mut moved_to_a.date);
    moved_to_b.week = week_b;
    moved_to_a.week = week_a;

    next.weeks[wa].matchups[ga] = moved_to_a;
    next.weeks[wb].matchups[gb] = moved_to_b;
    Some(next)
}

/// Flips home and away of one uniformly chosen game.
///
/// Returns `None` for formats that are not round-robin variants.
pub fn swap_home_away<R: Rng>(schedule: &Schedule, rng: &mut R) -> Option<Schedule> {
    if !schedule.format.is_round_robin() {
        return None;
    }
    let total = schedule.matchup_count();
    if total == 0 {
        return None;
    }

    let mut pick = rng.random_range(0..total);
    let mut next = schedule.clone();
    for week in &mut next.weeks {
        if pick < week.matchups.len() {
            let m = &mut week.matchups[pick];
            std::mem::swap(&mut m.home, &mut m.away);
            return Some(next);
        }
        pick -= week.matchups.len();
    }
    None
}

/// Moves one game of a week with several available days to another of
/// those days, keeping its kickoff time.
pub fn move_within_week<R: Rng>(schedule: &Schedule, rng: &mut R) -> Option<Schedule> {
    let eligible: Vec<usize> = schedule
        .weeks
        .iter()
        .enumerate()
        .filter(|(_, w)| !w.matchups.is_empty() && w.days.len() > 1)
        .map(|(i, _)| i)
        .collect();
    if eligible.is_empty() {
        return None;
    }

    let w = eligible[rng.random_range(0..eligible.len())];
    let week = &schedule.weeks[w];
    let g = rng.random_range(0..week.matchups.len());
    let game = &week.matchups[g];

    let current = game.date.date();
    let targets: Vec<NaiveDate> = week.days.iter().copied().filter(|d| *d != current).collect();
    if targets.is_empty() {
        return None;
    }
    let day = targets[rng.random_range(0..targets.len())];
    if clashes(&week.matchups, g, game, day) {
        return None;
    }

    let mut next = schedule.clone();
    let moved = &mut next.weeks[w].matchups[g];
    moved.date = NaiveDateTime::new(day, moved.date.time());
    Some(next)
}

/// Whether `incoming` would meet a team that already plays on `day` in
/// `matchups`, ignoring the game at `replaced`.
fn clashes(matchups: &[Matchup], replaced: usize, incoming: &Matchup, day: NaiveDate) -> bool {
    matchups
        .iter()
        .enumerate()
        .any(|(i, m)| i != replaced && m.date.date() == day && m.shares_team(incoming))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{at, day, game};
    use crate::models::{ScheduleFormat, Week};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn two_weeks(format: ScheduleFormat) -> Schedule {
        Schedule::new(format)
            .with_week(
                Week::new(0)
                    .with_days(vec![day(2025, 1, 4), day(2025, 1, 7)])
                    .with_matchup(game("m1", "a", "b", at(2025, 1, 4, 14), 0))
                    .with_matchup(game("m2", "c", "d", at(2025, 1, 4, 19), 0)),
            )
            .with_week(
                Week::new(1)
                    .with_days(vec![day(2025, 1, 11), day(2025, 1, 14)])
                    .with_matchup(game("m3", "e", "f", at(2025, 1, 11, 14), 1))
                    .with_matchup(game("m4", "g", "h", at(2025, 1, 14, 19), 1)),
            )
    }

    fn no_team_twice_per_day(schedule: &Schedule) -> bool {
        schedule.weeks.iter().all(|w| {
            let mut seen = HashSet::new();
            w.matchups.iter().all(|m| {
                seen.insert((m.home.clone(), m.date.date()))
                    && seen.insert((m.away.clone(), m.date.date()))
            })
        })
    }

    #[test]
    fn test_swap_dates_relocates_games() {
        let schedule = two_weeks(ScheduleFormat::DoubleRoundRobin);
        let mut rng = StdRng::seed_from_u64(3);
        let next = swap_dates(&schedule, &mut rng).expect("disjoint teams always swap");

        assert_eq!(next.matchup_count(), 4);
        for week in &next.weeks {
            for m in &week.matchups {
                assert_eq!(m.week, week.index);
            }
        }
        // slots keep their kickoffs; the games occupying them change
        let slots = |s: &Schedule| s.matchups().map(|m| m.date).collect::<Vec<_>>();
        let ids = |s: &Schedule| s.matchups().map(|m| m.id.clone()).collect::<Vec<_>>();
        assert_eq!(slots(&schedule), slots(&next));
        assert_ne!(ids(&schedule), ids(&next));
        // input untouched
        assert_eq!(schedule, two_weeks(ScheduleFormat::DoubleRoundRobin));
    }

    #[test]
    fn test_swap_dates_needs_two_weeks() {
        let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin)
            .with_week(Week::new(0).with_matchup(game("m1", "a", "b", at(2025, 1, 4, 14), 0)))
            .with_week(Week::new(1));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(swap_dates(&schedule, &mut rng).is_none());
    }

    #[test]
    fn test_swap_dates_rejects_shared_team() {
        let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin)
            .with_week(Week::new(0).with_matchup(game("m1", "a", "b", at(2025, 1, 4, 14), 0)))
            .with_week(Week::new(1).with_matchup(game("m2", "b", "c", at(2025, 1, 11, 14), 1)));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(swap_dates(&schedule, &mut rng).is_none());
        }
    }

    #[test]
    fn test_swap_dates_rejects_same_day_clash() {
        // Moving m1 (a-b) onto Jan 11 would put "a" twice on that day in week 1.
        let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin)
            .with_week(Week::new(0).with_matchup(game("m1", "a", "b", at(2025, 1, 4, 14), 0)))
            .with_week(
                Week::new(1)
                    .with_matchup(game("m2", "c", "d", at(2025, 1, 11, 14), 1))
                    .with_matchup(game("m3", "a", "e", at(2025, 1, 11, 19), 1)),
            );
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            if let Some(next) = swap_dates(&schedule, &mut rng) {
                assert!(no_team_twice_per_day(&next));
            }
        }
    }

    #[test]
    fn test_swap_home_away_round_robin_only() {
        let mut rng = StdRng::seed_from_u64(5);
        for format in [
            ScheduleFormat::PartialRoundRobin,
            ScheduleFormat::ThreeGameSeries,
            ScheduleFormat::DualMeet,
        ] {
            assert!(swap_home_away(&two_weeks(format), &mut rng).is_none());
        }

        let schedule = two_weeks(ScheduleFormat::SingleRoundRobin);
        let next = swap_home_away(&schedule, &mut rng).unwrap();
        let flipped: Vec<_> = schedule
            .matchups()
            .zip(next.matchups())
            .filter(|(a, b)| a.home != b.home)
            .collect();
        assert_eq!(flipped.len(), 1);
        let (before, after) = flipped[0];
        assert_eq!(before.home, after.away);
        assert_eq!(before.away, after.home);
    }

    #[test]
    fn test_move_within_week_uses_available_day() {
        let schedule = two_weeks(ScheduleFormat::SingleRoundRobin);
        let mut rng = StdRng::seed_from_u64(11);
        let next = move_within_week(&schedule, &mut rng).unwrap();

        let moved: Vec<_> = schedule
            .matchups()
            .zip(next.matchups())
            .filter(|(a, b)| a.date != b.date)
            .collect();
        assert_eq!(moved.len(), 1);
        let (before, after) = moved[0];
        assert_eq!(before.date.time(), after.date.time());
        let week = &next.weeks[after.week];
        assert!(week.days.contains(&after.date.date()));
    }

    #[test]
    fn test_move_within_week_needs_multiple_days() {
        let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin).with_week(
            Week::new(0)
                .with_days(vec![day(2025, 1, 4)])
                .with_matchup(game("m1", "a", "b", at(2025, 1, 4, 14), 0)),
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert!(move_within_week(&schedule, &mut rng).is_none());
    }

    #[test]
    fn test_random_covers_all_mutations() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<Mutation> = (0..200).map(|_| Mutation::random(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }
}
