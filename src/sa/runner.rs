//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::models::Snapshot;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Score of the best solution.
    pub best_score: f64,

    /// Score of the starting solution.
    pub initial_score: f64,

    /// Total number of iterations executed, skipped ones included.
    pub iterations: usize,

    /// Iterations where the neighbor generator found no legal move.
    pub skipped: usize,

    /// Final temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving moves.
    pub improving_moves: usize,

    /// Whether stopped by the cancel flag or the time limit.
    pub cancelled: bool,

    /// State sampled every `snapshot_interval` iterations.
    pub snapshots: Vec<Snapshot>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA optimization from `initial`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`SaConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<P: SaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
    ) -> SaResult<P::Solution> {
        Self::run_with_cancel(problem, initial, config, None)
    }

    /// Runs SA with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next
    /// iteration and returns the best solution found so far.
    pub fn run_with_cancel<P: SaProblem>(
        problem: &P,
        initial: P::Solution,
        config: &SaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SaResult<P::Solution> {
        config.validate().expect("invalid SaConfig");

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let started = Instant::now();
        let initial_score = problem.score(&initial);
        let mut current = initial;
        let mut current_score = initial_score;
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut skipped = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut snapshots = Vec::new();

        for i in 0..config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                cancelled = true;
                break;
            }

            match problem.neighbor(&current, &mut rng) {
                None => skipped += 1,
                Some(candidate) => {
                    let candidate_score = problem.score(&candidate);
                    let delta = candidate_score - current_score;

                    // Metropolis acceptance criterion
                    let accept = if delta >= 0.0 {
                        true
                    } else if temperature > 0.0 {
                        let probability = (delta / temperature).exp();
                        rng.random_range(0.0..1.0) < probability
                    } else {
                        false
                    };

                    if accept {
                        if delta > 0.0 {
                            improving_moves += 1;
                        }
                        accepted_moves += 1;
                        current = candidate;
                        current_score = candidate_score;

                        if current_score > best_score {
                            best = current.clone();
                            best_score = current_score;
                        }
                    }
                }
            }

            if i % config.snapshot_interval == 0 {
                debug!(
                    "iteration {i}: temperature={temperature:.4}, \
                     current={current_score:.2}, best={best_score:.2}"
                );
                snapshots.push(Snapshot {
                    iteration: i,
                    temperature,
                    current_score,
                    best_score,
                });
            }

            iterations += 1;
            temperature *= config.cooling_rate;
        }

        SaResult {
            best,
            best_score,
            initial_score,
            iterations,
            skipped,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            snapshots,
        }
    }
}

fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
