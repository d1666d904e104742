//! GA evolutionary loop execution.
//!
//! [`Evolution`] is the loop as an explicit state machine
//! (`Seeded → Evolving → Done`); [`GaRunner`] drives it to completion.

use super::config::{Elitism, GaConfig};
use super::selection::mating_pool;
use super::types::{Fitness, GaProblem, Individual};
use crate::error::ConfigError;
use crate::random::rng_from_option;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Where an [`Evolution`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Initial population built and scored; no generation run yet.
    Seeded,
    /// At least one generation run, more remain.
    Evolving,
    /// The configured number of generations has run.
    Done,
}

/// Population statistics after one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Generation number; 0 is the seeded population.
    pub generation: usize,
    /// Best fitness within this generation.
    pub best_fitness: f64,
    /// Mean fitness of this generation.
    pub mean_fitness: f64,
    /// Best fitness seen so far in the run.
    pub running_best: f64,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// One entry for the seeded population plus one per generation.
    pub history: Vec<GenerationStats>,
}

/// A running evolution over one problem.
///
/// Each generation is an owned snapshot: offspring are built from the current
/// population into a fresh vector that then replaces it wholesale. The
/// running best is only replaced by a strictly fitter individual, so ties
/// keep the one found first.
pub struct Evolution<'p, P: GaProblem> {
    problem: &'p P,
    config: GaConfig,
    rng: StdRng,
    population: Vec<P::Individual>,
    best: P::Individual,
    generation: usize,
    history: Vec<GenerationStats>,
}

impl<'p, P: GaProblem> Evolution<'p, P> {
    /// Validates `config`, then builds and scores the initial population.
    ///
    /// # Errors
    /// Returns the configuration error when `config` is invalid.
    pub fn seed(problem: &'p P, config: &GaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = rng_from_option(config.seed);

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();
        evaluate_all(problem, &mut population, config.parallel);

        let best = population[best_index(&population)].clone();
        info!(
            "evolution seeded: population {}, best fitness {:?}",
            population.len(),
            best.fitness()
        );

        let mut evolution = Self {
            problem,
            config: config.clone(),
            rng,
            population,
            best,
            generation: 0,
            history: Vec::new(),
        };
        evolution.record();
        Ok(evolution)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.generation >= self.config.generations {
            Phase::Done
        } else if self.generation == 0 {
            Phase::Seeded
        } else {
            Phase::Evolving
        }
    }

    /// True once every configured generation has run.
    pub fn is_done(&self) -> bool {
        self.phase() == Phase::Done
    }

    /// Number of generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The current population.
    pub fn population(&self) -> &[P::Individual] {
        &self.population
    }

    /// The best individual seen so far.
    pub fn best(&self) -> &P::Individual {
        &self.best
    }

    /// Statistics recorded so far.
    pub fn history(&self) -> &[GenerationStats] {
        &self.history
    }

    /// Runs one generation. Returns `false` without doing anything when the
    /// evolution is already done.
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }

        let size = self.config.population_size;
        let pool = mating_pool(&self.population, self.config.tournament_size, &mut self.rng);

        let mut next: Vec<P::Individual> = Vec::with_capacity(size);
        next.extend(self.elites());
        let elite_count = next.len();

        while next.len() < size {
            let (a, b) = distinct_pair(pool.len(), &mut self.rng);
            let p1 = &self.population[pool[a]];
            let p2 = &self.population[pool[b]];

            let (c1, c2) = if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                self.problem.crossover(p1, p2, &mut self.rng)
            } else {
                (p1.clone(), p2.clone())
            };

            for mut child in [c1, c2] {
                if next.len() >= size {
                    break;
                }
                if self.rng.random_range(0.0..1.0) < self.config.mutation_rate {
                    self.problem.mutate(&mut child, &mut self.rng);
                }
                next.push(child);
            }
        }

        // Elites keep their cached fitness.
        evaluate_all(self.problem, &mut next[elite_count..], self.config.parallel);

        self.population = next;
        self.generation += 1;

        let gen_best = &self.population[best_index(&self.population)];
        if gen_best.fitness() > self.best.fitness() {
            self.best = gen_best.clone();
        }

        self.record();
        self.problem.on_generation(self.generation, self.best.fitness());
        true
    }

    /// Consumes the evolution and returns its result.
    pub fn finish(self) -> GaResult<P::Individual> {
        info!(
            "evolution finished after {} generations, best fitness {:?}",
            self.generation,
            self.best.fitness()
        );
        GaResult {
            best_fitness: self.best.fitness(),
            best: self.best,
            generations: self.generation,
            cancelled: false,
            history: self.history,
        }
    }

    fn elites(&self) -> Vec<P::Individual> {
        let count = self.config.elite_count.min(self.population.len());
        match self.config.elitism {
            Elitism::Positional => self.population[..count].to_vec(),
            Elitism::Ranked => {
                let mut order: Vec<usize> = (0..self.population.len()).collect();
                order.sort_by(|&a, &b| {
                    self.population[b]
                        .fitness()
                        .partial_cmp(&self.population[a].fitness())
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                order
                    .into_iter()
                    .take(count)
                    .map(|i| self.population[i].clone())
                    .collect()
            }
        }
    }

    fn record(&mut self) {
        let gen_best = self.population[best_index(&self.population)].fitness().to_f64();
        let mean = self
            .population
            .iter()
            .map(|ind| ind.fitness().to_f64())
            .sum::<f64>()
            / self.population.len() as f64;
        let stats = GenerationStats {
            generation: self.generation,
            best_fitness: gen_best,
            mean_fitness: mean,
            running_best: self.best.fitness().to_f64(),
        };
        debug!(
            "generation {}: best {:.1}, mean {:.1}, running best {:.1}",
            stats.generation, stats.best_fitness, stats.mean_fitness, stats.running_best
        );
        self.history.push(stats);
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = TimetableProblem::new(&catalog);
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for the configured number of generations.
    ///
    /// # Errors
    /// Returns the configuration error when `config` is invalid.
    pub fn run<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked before each generation; once set, the best
    /// individual found so far is returned with `cancelled = true`.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual>, ConfigError> {
        let mut evolution = Evolution::seed(problem, config)?;
        let mut cancelled = false;

        while !evolution.is_done() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            evolution.step();
        }

        let mut result = evolution.finish();
        result.cancelled = cancelled;
        Ok(result)
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        individuals.par_iter_mut().for_each(|ind| {
            let f = problem.evaluate(ind);
            ind.set_fitness(f);
        });
    } else {
        evaluate_serial(problem, individuals);
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: GaProblem>(problem: &P, individuals: &mut [P::Individual], _parallel: bool) {
    evaluate_serial(problem, individuals);
}

fn evaluate_serial<P: GaProblem>(problem: &P, individuals: &mut [P::Individual]) {
    for ind in individuals.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Index of the fittest individual; ties keep the earliest.
fn best_index<I: Individual>(population: &[I]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() > population[best].fitness() {
            best = i;
        }
    }
    best
}

/// Two distinct positions in `0..n`. Requires `n >= 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // ---- OneMax: maximize the number of set bits ----

    #[derive(Clone, Debug)]
    struct BitString {
        bits: Vec<bool>,
        fitness: u32,
    }

    impl Individual for BitString {
        type Fitness = u32;
        fn fitness(&self) -> u32 {
            self.fitness
        }
        fn set_fitness(&mut self, f: u32) {
            self.fitness = f;
        }
    }

    struct OneMaxProblem {
        n: usize,
    }

    impl GaProblem for OneMaxProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            let bits: Vec<bool> = (0..self.n).map(|_| rng.random_bool(0.5)).collect();
            BitString { bits, fitness: 0 }
        }

        fn evaluate(&self, ind: &BitString) -> u32 {
            ind.bits.iter().filter(|&&b| b).count() as u32
        }

        fn crossover<R: Rng>(
            &self,
            p1: &BitString,
            p2: &BitString,
            rng: &mut R,
        ) -> (BitString, BitString) {
            let point = rng.random_range(0..self.n);
            let mut c1 = p1.clone();
            let mut c2 = p2.clone();
            c1.bits[point..].copy_from_slice(&p2.bits[point..]);
            c2.bits[point..].copy_from_slice(&p1.bits[point..]);
            (c1, c2)
        }

        fn mutate<R: Rng>(&self, ind: &mut BitString, rng: &mut R) {
            let idx = rng.random_range(0..self.n);
            ind.bits[idx] = !ind.bits[idx];
        }
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_generations(60)
            .with_elite_count(3)
            .with_mutation_rate(0.3)
            .with_seed(42)
    }

    #[test]
    fn test_onemax_convergence() {
        let problem = OneMaxProblem { n: 20 };
        let result = GaRunner::run(&problem, &small_config().with_generations(150)).unwrap();
        assert!(
            result.best_fitness >= 16,
            "expected fitness >= 16 for 20-bit OneMax, got {}",
            result.best_fitness
        );
        assert_eq!(result.best.fitness(), problem.evaluate(&result.best));
    }

    #[test]
    fn test_running_best_is_monotonic() {
        let problem = OneMaxProblem { n: 16 };
        let result = GaRunner::run(&problem, &small_config()).unwrap();
        for window in result.history.windows(2) {
            assert!(
                window[1].running_best >= window[0].running_best,
                "running best decreased: {} -> {}",
                window[0].running_best,
                window[1].running_best
            );
        }
        for stats in &result.history {
            assert!(stats.running_best >= stats.best_fitness);
        }
    }

    #[test]
    fn test_history_length() {
        let problem = OneMaxProblem { n: 10 };
        let result = GaRunner::run(&problem, &small_config().with_generations(12)).unwrap();
        assert_eq!(result.generations, 12);
        assert_eq!(result.history.len(), 13);
        assert_eq!(result.history[0].generation, 0);
        assert_eq!(result.history[12].generation, 12);
    }

    #[test]
    fn test_phases() {
        let problem = OneMaxProblem { n: 8 };
        let config = small_config().with_generations(2);
        let mut evolution = Evolution::seed(&problem, &config).unwrap();
        assert_eq!(evolution.phase(), Phase::Seeded);
        assert!(evolution.step());
        assert_eq!(evolution.phase(), Phase::Evolving);
        assert!(evolution.step());
        assert_eq!(evolution.phase(), Phase::Done);
        assert!(!evolution.step());
        assert_eq!(evolution.generation(), 2);
    }

    #[test]
    fn test_population_size_is_kept() {
        let problem = OneMaxProblem { n: 8 };
        let config = small_config().with_population_size(11).with_elite_count(2);
        let mut evolution = Evolution::seed(&problem, &config).unwrap();
        for _ in 0..5 {
            evolution.step();
            assert_eq!(evolution.population().len(), 11);
        }
    }

    #[test]
    fn test_ranked_elites_keep_fittest() {
        let problem = OneMaxProblem { n: 12 };
        let config = small_config()
            .with_elitism(Elitism::Ranked)
            .with_elite_count(1);
        let mut evolution = Evolution::seed(&problem, &config).unwrap();
        for _ in 0..10 {
            let before = evolution.population()[best_index(evolution.population())].fitness();
            evolution.step();
            assert_eq!(evolution.population()[0].fitness(), before);
        }
    }

    #[test]
    fn test_positional_elites_copy_prefix() {
        let problem = OneMaxProblem { n: 12 };
        let config = small_config().with_elite_count(4);
        let mut evolution = Evolution::seed(&problem, &config).unwrap();
        let prefix: Vec<Vec<bool>> = evolution.population()[..4]
            .iter()
            .map(|ind| ind.bits.clone())
            .collect();
        evolution.step();
        let carried: Vec<Vec<bool>> = evolution.population()[..4]
            .iter()
            .map(|ind| ind.bits.clone())
            .collect();
        assert_eq!(prefix, carried);
    }

    #[test]
    fn test_same_seed_same_result() {
        let problem = OneMaxProblem { n: 24 };
        let a = GaRunner::run(&problem, &small_config()).unwrap();
        let b = GaRunner::run(&problem, &small_config()).unwrap();
        assert_eq!(a.best.bits, b.best.bits);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_cancellation() {
        let problem = OneMaxProblem { n: 20 };
        let cancel = Arc::new(AtomicBool::new(true));
        let result = GaRunner::run_with_cancel(&problem, &small_config(), Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[test]
    fn test_invalid_config() {
        let problem = OneMaxProblem { n: 4 };
        let config = GaConfig::default().with_generations(0);
        assert_eq!(
            GaRunner::run(&problem, &config).unwrap_err(),
            ConfigError::ZeroGenerations
        );
    }

    #[test]
    fn test_seed_with_huge_generation_budget() {
        let problem = OneMaxProblem { n: 8 };
        let config = small_config().with_generations(usize::MAX / 2);
        let mut evolution = Evolution::seed(&problem, &config).unwrap();
        assert_eq!(evolution.history().len(), 1);
        assert!(evolution.step());
        assert_eq!(evolution.history().len(), 2);
        assert_eq!(evolution.phase(), Phase::Evolving);
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = create_rng(5);
        for _ in 0..1000 {
            let (a, b) = distinct_pair(2, &mut rng);
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
    }

    // ---- Default operators ----

    struct PassThroughProblem;

    impl GaProblem for PassThroughProblem {
        type Individual = BitString;

        fn create_individual<R: Rng>(&self, rng: &mut R) -> BitString {
            BitString {
                bits: vec![rng.random_bool(0.5); 4],
                fitness: 0,
            }
        }

        fn evaluate(&self, ind: &BitString) -> u32 {
            ind.bits.iter().filter(|&&b| b).count() as u32
        }
    }

    #[test]
    fn test_default_operators() {
        let result = GaRunner::run(&PassThroughProblem, &small_config().with_generations(5)).unwrap();
        assert_eq!(result.generations, 5);
        assert_eq!(result.best_fitness, result.history[0].running_best as u32);
    }
}
