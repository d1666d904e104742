//! Course timetabling on top of the [`ga`](crate::ga) engine.
//!
//! A candidate timetable is a [`Schedule`]: one [`Assignment`] of
//! (day, session, room) per course. The pieces:
//!
//! - [`find_valid_slots`]: every slot a course may take given its lecturer's
//!   preferences, room capacity and availability, and what is already booked
//! - [`fitness`]: the scoring function and its [`FitnessBreakdown`]
//! - [`order_preserving_crossover`] and [`reassign_mutation`]: variation
//!   operators that keep one assignment per course
//! - [`TimetableProblem`]: the [`GaProblem`](crate::ga::GaProblem) gluing
//!   these together
//! - [`project`]: flattens the winner into [`ScheduleRow`]s
//! - [`solve`]: all of the above in one call

pub mod fitness;
mod operators;
mod problem;
mod projection;
mod schedule;
mod slot;
mod solve;

pub use fitness::FitnessBreakdown;
pub use operators::{order_preserving_crossover, reassign_mutation, MutationScope};
pub use problem::TimetableProblem;
pub use projection::{project, ScheduleRow, TimetableSummary};
pub use schedule::{Assignment, Schedule};
pub use slot::{find_valid_slots, Booking, Resource, Slot, UsedSlots};
pub use solve::{solve, solve_scoped, solve_with, Timetable};
