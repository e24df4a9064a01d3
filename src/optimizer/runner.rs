//! Simulated-annealing schedule optimizer.

use super::config::OptimizerConfig;
use super::mutation::Mutation;
use crate::error::{LeagueError, Result};
use crate::models::{improvement_pct, OptimizationMetrics, Schedule, Team};
use crate::sa::{SaConfig, SaProblem, SaResult, SaRunner};
use crate::scoring::ScheduleScorer;
use log::{debug, info};
use rand::Rng;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Anneals a schedule against a [`ScheduleScorer`].
///
/// Each iteration applies one uniformly chosen [`Mutation`] to a copy of
/// the current schedule and scores the copy with the weighted total.
///
/// # Examples
///
/// ```
/// use u_league::models::{Matchup, Schedule, ScheduleFormat, Team, Week};
/// use u_league::optimizer::ScheduleOptimizer;
/// use u_league::sa::SaConfig;
/// use u_league::scoring::{ScheduleScorer, ScoringConfig};
/// use chrono::NaiveDate;
///
/// let kickoff = NaiveDate::from_ymd_opt(2025, 1, 4).unwrap().and_hms_opt(14, 0, 0).unwrap();
/// let schedule = Schedule::new(ScheduleFormat::SingleRoundRobin)
///     .with_week(Week::new(0).with_matchup(Matchup::new("m1", "a", "b", kickoff, 0)));
/// let teams = vec![Team::new("a"), Team::new("b")];
///
/// let scorer = ScheduleScorer::new(&teams, ScoringConfig::default()).unwrap();
/// let optimizer = ScheduleOptimizer::new(scorer);
/// let (best, metrics) = optimizer
///     .optimize(&schedule, &SaConfig::default().with_max_iterations(50).with_seed(1))
///     .unwrap();
/// assert!(metrics.best_score >= metrics.initial_score);
/// assert_eq!(best.matchup_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleOptimizer {
    scorer: ScheduleScorer,
}

impl SaProblem for ScheduleOptimizer {
    type Solution = Schedule;

    fn score(&self, schedule: &Schedule) -> f64 {
        self.scorer.evaluate(schedule).total
    }

    fn neighbor<R: Rng>(&self, schedule: &Schedule, rng: &mut R) -> Option<Schedule> {
        Mutation::random(rng).apply(schedule, rng)
    }
}

impl ScheduleOptimizer {
    pub fn new(scorer: ScheduleScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &ScheduleScorer {
        &self.scorer
    }

    /// Runs one annealing pass and returns the best schedule seen with the
    /// run metrics, which are also attached to the returned schedule.
    pub fn optimize(
        &self,
        schedule: &Schedule,
        config: &SaConfig,
    ) -> Result<(Schedule, OptimizationMetrics)> {
        self.optimize_with_cancel(schedule, config, None)
    }

    /// Like [`optimize`](Self::optimize); setting `cancel` stops the run
    /// early with the best schedule found so far.
    pub fn optimize_with_cancel(
        &self,
        schedule: &Schedule,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<(Schedule, OptimizationMetrics)> {
        config.validate().map_err(LeagueError::InvalidConfig)?;
        schedule.validate()?;

        info!(
            "optimizing schedule: {} games over {} weeks, {} iterations",
            schedule.matchup_count(),
            schedule.weeks.len(),
            config.max_iterations
        );

        let mut start = schedule.clone();
        start.metrics = None;
        let result = SaRunner::run_with_cancel(self, start, config, cancel);
        let (mut best, metrics) = into_metrics(result);

        info!(
            "optimization finished: {:.2} -> {:.2} ({:+.1}%), {} accepted, {} skipped{}",
            metrics.initial_score,
            metrics.best_score,
            metrics.improvement_pct,
            metrics.accepted_moves,
            metrics.skipped,
            if metrics.cancelled { ", cancelled" } else { "" }
        );
        if self.scorer.fallback_count() > 0 {
            debug!("{} distance lookups used the planar fallback", self.scorer.fallback_count());
        }

        best.metrics = Some(metrics.clone());
        Ok((best, metrics))
    }

    /// Runs one independent annealing pass per seed.
    ///
    /// Runs share no state; with the `parallel` feature they execute on
    /// the rayon pool. Results are in seed order.
    pub fn optimize_many(
        &self,
        schedule: &Schedule,
        config: &SaConfig,
        seeds: &[u64],
    ) -> Result<Vec<(Schedule, OptimizationMetrics)>> {
        let run = |seed: &u64| {
            let seeded = config.clone().with_seed(*seed);
            self.optimize(schedule, &seeded)
        };

        #[cfg(feature = "parallel")]
        let results = seeds.par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let results = seeds.iter().map(run).collect();

        results
    }
}

/// Picks the run with the highest best score. Earlier runs win ties.
pub fn best_of(
    runs: Vec<(Schedule, OptimizationMetrics)>,
) -> Option<(Schedule, OptimizationMetrics)> {
    runs.into_iter()
        .reduce(|best, run| if run.1.best_score > best.1.best_score { run } else { best })
}

/// Scores with planar distances and anneals `schedule` for `teams`.
pub fn optimize(
    schedule: &Schedule,
    teams: &[Team],
    config: &OptimizerConfig,
) -> Result<(Schedule, OptimizationMetrics)> {
    config.validate().map_err(LeagueError::InvalidConfig)?;
    let scorer = ScheduleScorer::new(teams, config.scoring.clone())?;
    ScheduleOptimizer::new(scorer).optimize(schedule, &config.annealing)
}

fn into_metrics(result: SaResult<Schedule>) -> (Schedule, OptimizationMetrics) {
    let metrics = OptimizationMetrics {
        initial_score: result.initial_score,
        best_score: result.best_score,
        improvement_pct: improvement_pct(result.initial_score, result.best_score),
        iterations: result.iterations,
        skipped: result.skipped,
        accepted_moves: result.accepted_moves,
        improving_moves: result.improving_moves,
        final_temperature: result.final_temperature,
        cancelled: result.cancelled,
        snapshots: result.snapshots,
    };
    (result.best, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::{at, day, game};
    use crate::models::{ScheduleFormat, Week};
    use crate::scoring::{Rivalry, ScoringConfig};
    use std::collections::HashSet;

    fn teams() -> Vec<Team> {
        vec![
            Team::new("ku").with_coordinates(38.95, -95.25),
            Team::new("kstate").with_coordinates(39.19, -96.58),
            Team::new("isu").with_coordinates(42.03, -93.62),
            Team::new("tcu").with_coordinates(32.71, -97.36),
            Team::new("baylor").with_coordinates(31.55, -97.11),
            Team::new("byu").with_coordinates(40.25, -111.65),
        ]
    }

    /// Three weeks, mostly off-window kickoffs, plenty of room to improve.
    fn season(format: ScheduleFormat) -> Schedule {
        Schedule::new(format)
            .with_week(
                Week::new(0)
                    .with_days(vec![day(2025, 1, 6), day(2025, 1, 8), day(2025, 1, 11)])
                    .with_matchup(game("m1", "ku", "kstate", at(2025, 1, 6, 10), 0))
                    .with_matchup(game("m2", "isu", "tcu", at(2025, 1, 8, 9), 0))
                    .with_matchup(game("m3", "baylor", "byu", at(2025, 1, 11, 23), 0)),
            )
            .with_week(
                Week::new(1)
                    .with_days(vec![day(2025, 1, 13), day(2025, 1, 15), day(2025, 1, 18)])
                    .with_matchup(game("m4", "kstate", "isu", at(2025, 1, 13, 11), 1))
                    .with_matchup(game("m5", "tcu", "baylor", at(2025, 1, 15, 8), 1))
                    .with_matchup(game("m6", "byu", "ku", at(2025, 1, 18, 13), 1)),
            )
            .with_week(
                Week::new(2)
                    .with_days(vec![day(2025, 1, 20), day(2025, 1, 25)])
                    .with_matchup(game("m7", "isu", "ku", at(2025, 1, 20, 10), 2))
                    .with_matchup(game("m8", "byu", "tcu", at(2025, 1, 25, 22), 2)),
            )
    }

    fn optimizer() -> ScheduleOptimizer {
        let config = ScoringConfig::default().with_rivalry(Rivalry::new("ku", "kstate"));
        ScheduleOptimizer::new(ScheduleScorer::new(&teams(), config).unwrap())
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let config = SaConfig::default().with_max_iterations(0).with_seed(1);
        let (best, metrics) = optimizer().optimize(&schedule, &config).unwrap();

        assert_eq!(best.weeks, schedule.weeks);
        assert_eq!(metrics.improvement_pct, 0.0);
        assert_eq!(metrics.iterations, 0);
        assert_eq!(metrics.best_score, metrics.initial_score);
        assert_eq!(best.metrics.as_ref(), Some(&metrics));
    }

    #[test]
    fn test_best_never_below_initial() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let config = SaConfig::default()
            .with_max_iterations(500)
            .with_snapshot_interval(25)
            .with_seed(7);
        let (best, metrics) = optimizer().optimize(&schedule, &config).unwrap();

        assert!(metrics.best_score >= metrics.initial_score);
        assert!(metrics.improvement_pct >= 0.0);
        assert_eq!(metrics.snapshots.len(), 20);
        for w in metrics.snapshots.windows(2) {
            assert!(w[1].best_score >= w[0].best_score);
        }
        let rescored = optimizer().scorer().evaluate(&best).total;
        assert!((rescored - metrics.best_score).abs() < 1e-9);
        assert_eq!(best.matchup_count(), schedule.matchup_count());
    }

    #[test]
    fn test_non_round_robin_keeps_home_teams() {
        let schedule = season(ScheduleFormat::ThreeGameSeries);
        let config = SaConfig::default().with_max_iterations(400).with_seed(3);
        let (best, _) = optimizer().optimize(&schedule, &config).unwrap();

        let pairs = |s: &Schedule| -> HashSet<(String, String)> {
            s.matchups()
                .map(|m| (m.home.as_str().to_string(), m.away.as_str().to_string()))
                .collect()
        };
        assert_eq!(pairs(&best), pairs(&schedule));
    }

    #[test]
    fn test_no_team_twice_on_a_day() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let config = SaConfig::default().with_max_iterations(800).with_seed(21);
        let (best, _) = optimizer().optimize(&schedule, &config).unwrap();

        for week in &best.weeks {
            let mut seen = HashSet::new();
            for m in &week.matchups {
                assert_eq!(m.week, week.index);
                assert!(seen.insert((m.home.clone(), m.date.date())));
                assert!(seen.insert((m.away.clone(), m.date.date())));
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let schedule = season(ScheduleFormat::SingleRoundRobin);
        let config = SaConfig::default().with_max_iterations(300).with_seed(99);
        let (a, ma) = optimizer().optimize(&schedule, &config).unwrap();
        let (b, mb) = optimizer().optimize(&schedule, &config).unwrap();
        assert_eq!(a.weeks, b.weeks);
        assert_eq!(ma.best_score, mb.best_score);
    }

    #[test]
    fn test_cancelled_run_returns_input_best() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let cancel = Arc::new(AtomicBool::new(true));
        let (best, metrics) = optimizer()
            .optimize_with_cancel(&schedule, &SaConfig::default(), Some(cancel))
            .unwrap();
        assert!(metrics.cancelled);
        assert_eq!(best.weeks, schedule.weeks);
    }

    #[test]
    fn test_optimize_many_and_best_of() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let config = SaConfig::default().with_max_iterations(200);
        let runs = optimizer().optimize_many(&schedule, &config, &[1, 2, 3]).unwrap();
        assert_eq!(runs.len(), 3);

        let top = runs.iter().map(|r| r.1.best_score).fold(f64::MIN, f64::max);
        let (_, metrics) = best_of(runs).unwrap();
        assert_eq!(metrics.best_score, top);
        assert!(best_of(Vec::new()).is_none());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let bad_config = SaConfig::default().with_cooling_rate(2.0);
        assert!(matches!(
            optimizer().optimize(&schedule, &bad_config),
            Err(LeagueError::InvalidConfig(_))
        ));

        let bad = Schedule::new(ScheduleFormat::SingleRoundRobin)
            .with_week(Week::new(0).with_matchup(game("m1", "ku", "ku", at(2025, 1, 4, 14), 0)));
        assert!(matches!(
            optimizer().optimize(&bad, &SaConfig::default()),
            Err(LeagueError::Validation(_))
        ));
    }

    #[test]
    fn test_free_function() {
        let schedule = season(ScheduleFormat::DoubleRoundRobin);
        let config = OptimizerConfig::default().with_max_iterations(100).with_seed(5);
        let (_, metrics) = optimize(&schedule, &teams(), &config).unwrap();
        assert_eq!(metrics.iterations, 100);
    }
}
