//! Core trait definitions for the GA engine.
//!
//! [`Individual`] and [`GaProblem`] are the contract between the generic
//! evolutionary loop and a concrete problem such as
//! [`TimetableProblem`](crate::timetable::TimetableProblem).

use rand::Rng;

/// A fitness value.
///
/// Higher fitness is better (maximization).
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for u32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution carrying its own cached fitness.
pub trait Individual: Clone + Send + Sync {
    /// The fitness type.
    type Fitness: Fitness;

    /// Returns the cached fitness.
    fn fitness(&self) -> Self::Fitness;

    /// Stores a freshly computed fitness.
    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// The engine owns the loop, the random source and the rates; the problem
/// supplies seeding, scoring and the two variation operators.
///
/// `Send + Sync` so offspring can be scored in parallel with the `parallel`
/// feature.
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type.
    type Individual: Individual;

    /// Creates one member of the initial population.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual. Must be a pure function of its contents.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Recombines two parents into two children.
    ///
    /// Called only when the crossover draw succeeds. The default passes the
    /// parents through unchanged.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1.clone(), parent2.clone())
    }

    /// Mutates an individual in place.
    ///
    /// Called only when the mutation draw succeeds. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the running best fitness.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
