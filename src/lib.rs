//! Course timetabling by genetic algorithm.
//!
//! Assigns every course of a semester a (day, session, room) so that no room,
//! lecturer or class-section is double-booked, rooms are large enough and
//! open, and lecturers get their preferred days and sessions where possible.
//!
//! - **Catalog**: Raw course, lecturer, class and room tables parsed and
//!   interned into an immutable [`Catalog`](catalog::Catalog).
//! - **Genetic Algorithm (GA)**: A generic, seedable evolutionary loop with
//!   tournament selection and elitism, driven through the
//!   [`GaProblem`](ga::GaProblem) trait.
//! - **Timetable**: Slot search, fitness scoring, order-preserving crossover,
//!   slot-replacement mutation and projection of the winner into rows.
//!
//! # Architecture
//!
//! [`ga`] knows nothing about timetables; [`timetable`] plugs the domain into
//! it. Only structurally broken input is an [`Error`]; everything else is
//! absorbed into the fitness score.
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{Catalog, ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
//! use u_timetable::ga::GaConfig;
//!
//! let catalog = Catalog::builder()
//!     .course(CourseRecord::new("IF101", "Algorithms", 3).with_class("A").with_lecturer("L1"))
//!     .course(CourseRecord::new("IF102", "Databases", 2).with_class("A").with_lecturer("L1"))
//!     .lecturer(LecturerRecord::new("L1", "Ada").with_preferred_sessions("1,2"))
//!     .class_section(ClassRecord::new("A", 30))
//!     .room(RoomRecord::new("R1", 40))
//!     .build()?;
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_generations(20)
//!     .with_elite_count(2)
//!     .with_seed(42);
//! let timetable = u_timetable::solve(&catalog, &config)?;
//!
//! assert_eq!(timetable.rows.len(), 2);
//! assert_eq!(timetable.breakdown.collisions(), 0);
//! # Ok::<(), u_timetable::Error>(())
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;
pub mod timetable;

pub use error::Error;
pub use timetable::{solve, Timetable};
