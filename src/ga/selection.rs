//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Individual;
use rand::Rng;

/// Tournament selection: draw `k` individuals uniformly with replacement and
/// return the index of the fittest.
///
/// Ties keep the earliest draw. `k` of 0 is treated as 1.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Builds a mating pool of `population.len()` tournament winners.
pub fn mating_pool<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> Vec<usize> {
    (0..population.len())
        .map(|_| tournament(population, k, rng))
        .collect()
}
