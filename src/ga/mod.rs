//! Genetic Algorithm engine.
//!
//! A generic, problem-agnostic evolutionary loop built on trait-based
//! abstractions. A problem plugs in by implementing [`GaProblem`], which
//! specifies how to create, evaluate, recombine and mutate individuals.
//! Fitness is maximized.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with a cached fitness
//! - [`GaProblem`]: Problem definition: seeding, scoring, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Run parameters (population, generations, rates, elitism)
//! - [`Evolution`]: The loop as a `Seeded → Evolving → Done` state machine
//! - [`GaRunner`]: Drives an [`Evolution`] to completion
//! - [`GaResult`]: Best individual plus per-generation statistics
//!
//! # Generation Step
//!
//! 1. Fill a mating pool with one tournament winner per population slot
//! 2. Carry `elite_count` individuals over (see [`Elitism`])
//! 3. Draw distinct pool pairs, recombine with `crossover_rate`, mutate each
//!    child with `mutation_rate`, until the population is refilled
//! 4. Score the new offspring and update the running best
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
pub mod selection;
mod types;

pub use config::{Elitism, GaConfig};
pub use runner::{Evolution, GaResult, GaRunner, GenerationStats, Phase};
pub use types::{Fitness, GaProblem, Individual};
