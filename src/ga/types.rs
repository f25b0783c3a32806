//! Core trait definitions for the GA framework.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the
//! evolutionary loop in [`GaRunner`](super::GaRunner) and a concrete
//! problem such as [`TimetableProblem`](crate::problem::TimetableProblem).
//! Fitness is an `f64` where **higher is better**.

use rand::Rng;

use crate::models::Schedule;

/// A candidate solution carrying its own cached fitness.
pub trait Individual: Clone + Send + Sync {
    /// Returns the cached fitness.
    fn fitness(&self) -> f64;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: f64);
}

impl Individual for Schedule {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Defines a GA optimization problem.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate a
/// generation in parallel with rayon. All RNG-consuming methods run on the
/// driver thread.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual for the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Computes the fitness of an individual. Higher is better.
    ///
    /// Must be pure: the runner may call it concurrently.
    fn evaluate(&self, individual: &Self::Individual) -> f64;

    /// Recombines two parents into one child.
    ///
    /// The default implementation clones parent1.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Self::Individual {
        parent1.clone()
    }

    /// Mutates an individual in place.
    ///
    /// The default implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the best fitness so far.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
