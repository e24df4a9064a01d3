//! Core trait for Simulated Annealing.

use rand::Rng;

/// Defines a Simulated Annealing problem.
///
/// The user implements neighbor generation and scoring. The SA framework
/// handles temperature management, the acceptance criterion and cooling.
///
/// # Maximization
///
/// SA maximizes the score. For minimization, negate the cost.
///
/// # Examples
///
/// ```ignore
/// struct Tour { distances: Vec<Vec<f64>> }
///
/// impl SaProblem for Tour {
///     type Solution = Vec<usize>;
///
///     fn score(&self, tour: &Vec<usize>) -> f64 {
///         -tour.windows(2).map(|w| self.distances[w[0]][w[1]]).sum::<f64>()
///     }
///
///     fn neighbor<R: Rng>(&self, tour: &Vec<usize>, rng: &mut R) -> Option<Vec<usize>> {
///         let mut new = tour.clone();
///         let i = rng.random_range(0..new.len());
///         let j = rng.random_range(0..new.len());
///         new.swap(i, j);
///         Some(new)
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick et al. (1983), Cerny (1985)
pub trait SaProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Scores a solution. Higher is better.
    fn score(&self, solution: &Self::Solution) -> f64;

    /// Generates a neighbor of the current solution as an independent copy.
    ///
    /// Returns `None` when no legal move exists from `solution`; the runner
    /// then skips the iteration instead of retrying.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Option<Self::Solution>;
}
