//! Optimization metrics attached to an optimized schedule.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of the annealing run sampled at one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    pub iteration: usize,
    pub temperature: f64,
    pub current_score: f64,
    pub best_score: f64,
}

/// Summary of one optimization run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationMetrics {
    /// Score of the schedule handed to the optimizer.
    pub initial_score: f64,
    /// Score of the returned schedule.
    pub best_score: f64,
    /// `(best - initial) / |initial| * 100`, or 0 when the initial score is 0.
    pub improvement_pct: f64,
    /// Iterations actually executed.
    pub iterations: usize,
    /// Iterations where no legal neighbor existed.
    pub skipped: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    pub final_temperature: f64,
    /// Whether the run stopped early on a cancel flag or time limit.
    pub cancelled: bool,
    pub snapshots: Vec<Snapshot>,
}

/// Relative improvement in percent.
pub fn improvement_pct(initial: f64, best: f64) -> f64 {
    if initial.abs() < f64::EPSILON {
        0.0
    } else {
        (best - initial) / initial.abs() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improvement_pct() {
        assert!((improvement_pct(200.0, 250.0) - 25.0).abs() < 1e-10);
        assert_eq!(improvement_pct(0.0, 10.0), 0.0);
        assert_eq!(improvement_pct(120.0, 120.0), 0.0);
    }
}
