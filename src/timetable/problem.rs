//! Timetabling as a GA problem.
//!
//! Implements [`GaProblem`] for [`Schedule`]: greedy randomized seeding over
//! Slot Search, fitness from [`fitness::score`](super::fitness::score), and
//! the operators from [`operators`](super::operators).

use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::Catalog;
use crate::ga::{GaProblem, Individual};

use super::fitness;
use super::operators::{order_preserving_crossover, reassign_mutation, MutationScope};
use super::schedule::{Assignment, Schedule};
use super::slot::{find_valid_slots, Slot, UsedSlots};

/// GA problem definition for course timetabling.
///
/// # Example
/// ```
/// use u_timetable::catalog::{Catalog, ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
/// use u_timetable::ga::{GaConfig, GaRunner};
/// use u_timetable::timetable::TimetableProblem;
///
/// let catalog = Catalog::builder()
///     .course(CourseRecord::new("C1", "Algorithms", 3).with_class("A").with_lecturer("L1"))
///     .lecturer(LecturerRecord::new("L1", "Ada"))
///     .class_section(ClassRecord::new("A", 20))
///     .room(RoomRecord::new("R1", 30))
///     .build()
///     .unwrap();
///
/// let problem = TimetableProblem::new(&catalog);
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_generations(5)
///     .with_elite_count(1)
///     .with_seed(1);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// // R1 lists no available days or sessions, so the placement costs 10 + 10.
/// assert_eq!(result.best_fitness, 980);
/// ```
#[derive(Debug, Clone)]
pub struct TimetableProblem<'a> {
    catalog: &'a Catalog,
    mutation_scope: MutationScope,
}

impl<'a> TimetableProblem<'a> {
    /// Creates a problem over `catalog` with isolated mutation.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            mutation_scope: MutationScope::default(),
        }
    }

    /// Sets which bookings mutation respects.
    pub fn with_mutation_scope(mut self, scope: MutationScope) -> Self {
        self.mutation_scope = scope;
        self
    }

    /// The catalog being scheduled.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// The configured mutation scope.
    pub fn mutation_scope(&self) -> MutationScope {
        self.mutation_scope
    }

    /// Builds one unscored candidate.
    ///
    /// Courses are placed in catalog order. Each takes a uniformly random slot
    /// among those Slot Search allows given the bookings made so far in this
    /// candidate; when there is none, a uniformly random grid day, grid
    /// session and room is used without any check.
    pub fn seed_schedule<R: Rng>(&self, rng: &mut R) -> Schedule {
        let catalog = self.catalog;
        let mut used = UsedSlots::new();
        let mut assignments = Vec::with_capacity(catalog.courses().len());

        for (id, course) in catalog.courses().iter().enumerate() {
            let slot = match find_valid_slots(catalog, course, &used).choose(rng) {
                Some(&slot) => slot,
                None => {
                    let slot = self.fallback_slot(rng);
                    trace!(
                        "no valid slot for course {}, falling back to {} / {} / {}",
                        course.code,
                        catalog.day_name(slot.day),
                        slot.session,
                        catalog.room(slot.room).map_or("?", |r| r.code.as_str())
                    );
                    slot
                }
            };
            used.book(course, slot);
            assignments.push(Assignment::new(id, slot));
        }
        Schedule::new(assignments)
    }

    /// Builds `size` scored candidates.
    pub fn generate_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Schedule> {
        (0..size)
            .map(|_| {
                let mut schedule = self.seed_schedule(rng);
                schedule.set_fitness(self.score(&schedule));
                schedule
            })
            .collect()
    }

    /// Scores a schedule.
    pub fn score(&self, schedule: &Schedule) -> u32 {
        fitness::score(self.catalog, schedule.assignments())
    }

    /// Uniform grid day, grid session and room. The catalog guarantees all
    /// three are non-empty.
    fn fallback_slot<R: Rng>(&self, rng: &mut R) -> Slot {
        let catalog = self.catalog;
        Slot {
            day: catalog.grid_days().choose(rng).copied().unwrap_or_default(),
            session: catalog.grid_sessions().choose(rng).copied().unwrap_or_default(),
            room: rng.random_range(0..catalog.rooms().len().max(1)),
        }
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = Schedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Schedule {
        self.seed_schedule(rng)
    }

    fn evaluate(&self, individual: &Schedule) -> u32 {
        self.score(individual)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Schedule,
        parent2: &Schedule,
        rng: &mut R,
    ) -> (Schedule, Schedule) {
        let (c1, c2) =
            order_preserving_crossover(parent1.assignments(), parent2.assignments(), rng);
        (Schedule::new(c1), Schedule::new(c2))
    }

    fn mutate<R: Rng>(&self, individual: &mut Schedule, rng: &mut R) {
        reassign_mutation(
            self.catalog,
            individual.assignments_mut(),
            self.mutation_scope,
            rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
    use crate::random::create_rng;

    fn catalog() -> Catalog {
        Catalog::builder()
            .courses((0..6).map(|i| {
                CourseRecord::new(format!("C{i}"), format!("Course {i}"), 3)
                    .with_class(if i % 2 == 0 { "A" } else { "B" })
                    .with_lecturer(if i < 3 { "L1" } else { "L2" })
            }))
            .lecturer(
                LecturerRecord::new("L1", "Ada")
                    .with_preferred_days("Monday,Tuesday")
                    .with_preferred_sessions("1,2,3"),
            )
            .lecturer(LecturerRecord::new("L2", "Grace"))
            .class_section(ClassRecord::new("A", 25))
            .class_section(ClassRecord::new("B", 35))
            .room(RoomRecord::new("R1", 30))
            .room(RoomRecord::new("R2", 40).with_available_days("Monday,Wednesday"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeded_schedules_are_collision_free_when_feasible() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog);
        let mut rng = create_rng(42);

        for schedule in problem.generate_population(20, &mut rng) {
            assert!(schedule.covers_each_course_once(6));
            let breakdown = fitness::evaluate(&catalog, schedule.assignments());
            assert_eq!(breakdown.collisions(), 0);
            assert_eq!(schedule.fitness(), breakdown.score());
        }
    }

    #[test]
    fn test_seeding_follows_course_order() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog);
        let mut rng = create_rng(1);
        let schedule = problem.seed_schedule(&mut rng);
        let courses: Vec<usize> = schedule.assignments().iter().map(|a| a.course).collect();
        assert_eq!(courses, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_fallback_when_nothing_fits() {
        let catalog = Catalog::builder()
            .course(CourseRecord::new("C1", "Big", 3).with_class("A").with_lecturer("L1"))
            .lecturer(LecturerRecord::new("L1", "Ada"))
            .class_section(ClassRecord::new("A", 40))
            .room(RoomRecord::new("R1", 10))
            .build()
            .unwrap();
        let problem = TimetableProblem::new(&catalog);
        let mut rng = create_rng(7);
        let population = problem.generate_population(5, &mut rng);
        for schedule in &population {
            assert_eq!(schedule.len(), 1);
            let a = schedule.assignments()[0];
            assert!(catalog.grid_days().contains(&a.day));
            assert!(catalog.grid_sessions().contains(&a.session));
            assert_eq!(a.room, 0);
        }
    }

    #[test]
    fn test_operators_preserve_coverage() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog).with_mutation_scope(MutationScope::Contextual);
        let mut rng = create_rng(3);
        let population = problem.generate_population(10, &mut rng);

        for pair in population.windows(2) {
            let (mut c1, mut c2) = problem.crossover(&pair[0], &pair[1], &mut rng);
            problem.mutate(&mut c1, &mut rng);
            problem.mutate(&mut c2, &mut rng);
            assert!(c1.covers_each_course_once(6));
            assert!(c2.covers_each_course_once(6));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let catalog = catalog();
        let problem = TimetableProblem::new(&catalog);
        let a = problem.generate_population(4, &mut create_rng(8));
        let b = problem.generate_population(4, &mut create_rng(8));
        assert_eq!(a, b);
    }
}
