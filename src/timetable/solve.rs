//! One-call timetable generation.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::info;

use crate::catalog::Catalog;
use crate::error::Error;
use crate::ga::{GaConfig, GaRunner, GenerationStats};

use super::fitness::{self, FitnessBreakdown};
use super::operators::MutationScope;
use super::problem::TimetableProblem;
use super::projection::{project, ScheduleRow, TimetableSummary};
use super::schedule::Schedule;

/// The outcome of a timetabling run.
#[derive(Debug, Clone)]
pub struct Timetable {
    /// Output table, one row per course.
    pub rows: Vec<ScheduleRow>,
    /// The winning schedule.
    pub schedule: Schedule,
    /// Fitness of the winning schedule.
    pub fitness: u32,
    /// What the fitness is made of.
    pub breakdown: FitnessBreakdown,
    /// Counts over the output table.
    pub summary: TimetableSummary,
    /// Generations actually run.
    pub generations: usize,
    /// Whether the run was cancelled before the last generation.
    pub cancelled: bool,
    /// Per-generation statistics, starting with the seeded population.
    pub history: Vec<GenerationStats>,
}

/// Runs the GA over `catalog` with isolated mutation and projects the best
/// schedule.
///
/// # Errors
/// Returns [`Error::Config`] when `config` is invalid.
///
/// # Example
/// ```
/// use u_timetable::catalog::{Catalog, ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
/// use u_timetable::ga::GaConfig;
/// use u_timetable::timetable::solve;
///
/// let catalog = Catalog::builder()
///     .course(CourseRecord::new("C1", "Algorithms", 3).with_class("A").with_lecturer("L1"))
///     .lecturer(
///         LecturerRecord::new("L1", "Ada")
///             .with_preferred_days("Monday")
///             .with_preferred_sessions("1"),
///     )
///     .class_section(ClassRecord::new("A", 10))
///     .room(RoomRecord::new("R1", 20).with_available_days("Monday").with_available_sessions("1"))
///     .build()
///     .unwrap();
///
/// let timetable = solve(&catalog, &GaConfig::default().with_generations(10).with_seed(1)).unwrap();
/// assert_eq!(timetable.fitness, 1010);
/// assert_eq!(timetable.rows[0].day, "Monday");
/// ```
pub fn solve(catalog: &Catalog, config: &GaConfig) -> Result<Timetable, Error> {
    solve_with(&TimetableProblem::new(catalog), config, None)
}

/// Like [`solve`], with an explicit mutation scope.
///
/// # Errors
/// Returns [`Error::Config`] when `config` is invalid.
pub fn solve_scoped(
    catalog: &Catalog,
    config: &GaConfig,
    scope: MutationScope,
) -> Result<Timetable, Error> {
    solve_with(&TimetableProblem::new(catalog).with_mutation_scope(scope), config, None)
}

/// Runs the GA for a prepared problem, optionally cancellable, and projects
/// the best schedule.
///
/// # Errors
/// Returns [`Error::Config`] when `config` is invalid.
pub fn solve_with(
    problem: &TimetableProblem<'_>,
    config: &GaConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Timetable, Error> {
    let catalog = problem.catalog();
    info!(
        "timetabling {} courses over {} rooms (population {}, generations {}, {:?} elitism, {:?} mutation)",
        catalog.courses().len(),
        catalog.rooms().len(),
        config.population_size,
        config.generations,
        config.elitism,
        problem.mutation_scope()
    );

    let result = GaRunner::run_with_cancel(problem, config, cancel)?;
    let schedule = result.best;
    let breakdown = fitness::evaluate(catalog, schedule.assignments());
    let rows = project(catalog, &schedule);
    let summary = TimetableSummary::from_rows(&rows);

    info!(
        "timetable ready: fitness {}, {} collisions, {} rows",
        result.best_fitness,
        breakdown.collisions(),
        rows.len()
    );

    Ok(Timetable {
        rows,
        schedule,
        fitness: result.best_fitness,
        breakdown,
        summary,
        generations: result.generations,
        cancelled: result.cancelled,
        history: result.history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
    use crate::error::ConfigError;

    const WEEK: &str = "Monday,Tuesday,Wednesday,Thursday,Friday";

    fn catalog() -> Catalog {
        Catalog::builder()
            .courses((0..8).map(|i| {
                CourseRecord::new(format!("C{i}"), format!("Course {i}"), 2)
                    .with_class(["A", "B", "C"][i % 3])
                    .with_lecturer(["L1", "L2"][i % 2])
            }))
            .lecturer(
                LecturerRecord::new("L1", "Ada")
                    .with_preferred_days("Monday, Tuesday")
                    .with_preferred_sessions("1,2"),
            )
            .lecturer(LecturerRecord::new("L2", "Grace").with_preferred_sessions("3"))
            .class_section(ClassRecord::new("A", 20))
            .class_section(ClassRecord::new("B", 30))
            .class_section(ClassRecord::new("C", 45))
            .room(
                RoomRecord::new("R1", 30)
                    .with_available_days(WEEK)
                    .with_available_sessions("1,2,3,4,5"),
            )
            .room(
                RoomRecord::new("R2", 50)
                    .with_available_days("Monday,Tuesday,Wednesday")
                    .with_available_sessions("1,2,3,4,5"),
            )
            .build()
            .unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_generations(30)
            .with_elite_count(3)
            .with_seed(42)
    }

    #[test]
    fn test_solve_outputs_one_row_per_course() {
        let catalog = catalog();
        let timetable = solve(&catalog, &config()).unwrap();
        assert_eq!(timetable.rows.len(), 8);
        assert!(timetable.schedule.covers_each_course_once(8));
        assert_eq!(timetable.fitness, timetable.breakdown.score());
        assert!(timetable.rows.iter().all(|r| r.fitness == timetable.fitness));
        assert_eq!(timetable.summary.courses, 8);
        assert_eq!(timetable.generations, 30);
        assert!(!timetable.cancelled);
    }

    #[test]
    fn test_feasible_catalog_reaches_collision_free() {
        let catalog = catalog();
        let timetable = solve(&catalog, &config()).unwrap();
        assert_eq!(timetable.breakdown.collisions(), 0);
        assert!(timetable.fitness >= 1000);
    }

    #[test]
    fn test_reproducible_with_seed() {
        let catalog = catalog();
        let a = solve(&catalog, &config()).unwrap();
        let b = solve(&catalog, &config()).unwrap();
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_contextual_scope_runs() {
        let catalog = catalog();
        let timetable = solve_scoped(&catalog, &config(), MutationScope::Contextual).unwrap();
        assert!(timetable.schedule.covers_each_course_once(8));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let catalog = catalog();
        let err = solve(&catalog, &GaConfig::default().with_population_size(1)).unwrap_err();
        assert_eq!(err, Error::Config(ConfigError::PopulationTooSmall(1)));
    }

    #[test]
    fn test_cancelled_run_returns_seeded_best() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog);
        let cancel = Arc::new(AtomicBool::new(true));
        let timetable = solve_with(&problem, &config(), Some(cancel)).unwrap();
        assert!(timetable.cancelled);
        assert_eq!(timetable.generations, 0);
        assert_eq!(timetable.rows.len(), 8);
    }
}
