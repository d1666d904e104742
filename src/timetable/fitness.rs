//! Fitness evaluation.
//!
//! The evaluator is the only authority on schedule quality. It walks the
//! assignments once and re-detects every hard collision itself, so operators
//! are free to produce colliding schedules.
//!
//! ```text
//! score = max(0, 1000
//!              - 100 × (room + lecturer + class collisions)
//!              +   5 × (preferred-day hits + preferred-session hits)
//!              -  10 × (room day misses + room session misses))
//! ```
//!
//! A miss is a day or session the room does not list. A room with no
//! availability lists misses every slot, even though slot search treats it
//! as open everywhere.

use crate::catalog::Catalog;

use super::schedule::Assignment;
use super::slot::{Booking, UsedSlots};

/// Score of a schedule before any bonus or penalty.
pub const BASE_SCORE: i64 = 1000;

/// Penalty per collision of one kind.
pub const COLLISION_PENALTY: i64 = 100;

/// Bonus per satisfied lecturer preference.
pub const PREFERENCE_BONUS: i64 = 5;

/// Penalty per room availability miss.
pub const AVAILABILITY_PENALTY: i64 = 10;

/// The counts behind a fitness score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitnessBreakdown {
    /// Assignments whose (day, session, room) was already taken.
    pub room_collisions: u32,
    /// Assignments whose (day, session, lecturer) was already taken.
    pub lecturer_collisions: u32,
    /// Assignments whose (day, session, class) was already taken.
    pub class_collisions: u32,
    /// Assignments on a day the lecturer prefers.
    pub preferred_days: u32,
    /// Assignments in a session the lecturer prefers.
    pub preferred_sessions: u32,
    /// Assignments on a day the room does not list as available.
    pub room_day_misses: u32,
    /// Assignments in a session the room does not list as available.
    pub room_session_misses: u32,
}

impl FitnessBreakdown {
    /// Total hard collisions over all three kinds.
    pub fn collisions(&self) -> u32 {
        self.room_collisions + self.lecturer_collisions + self.class_collisions
    }

    /// The score, floored at zero.
    pub fn score(&self) -> u32 {
        let raw = BASE_SCORE - COLLISION_PENALTY * i64::from(self.collisions())
            + PREFERENCE_BONUS * i64::from(self.preferred_days + self.preferred_sessions)
            - AVAILABILITY_PENALTY * i64::from(self.room_day_misses + self.room_session_misses);
        raw.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Counts collisions, preference hits and availability misses.
pub fn evaluate(catalog: &Catalog, assignments: &[Assignment]) -> FitnessBreakdown {
    let mut out = FitnessBreakdown::default();
    let mut seen = UsedSlots::new();

    for a in assignments {
        let Some(course) = catalog.course(a.course) else {
            continue;
        };

        let [room, lecturer, class]: [Booking; 3] = Booking::for_course(course, a.slot());
        out.room_collisions += u32::from(!seen.insert(room));
        out.lecturer_collisions += u32::from(!seen.insert(lecturer));
        out.class_collisions += u32::from(!seen.insert(class));

        if let Some(l) = catalog.lecturer(course.lecturer) {
            out.preferred_days += u32::from(l.preference.prefers_day(a.day));
            out.preferred_sessions += u32::from(l.preference.prefers_session(a.session));
        }

        match catalog.room(a.room) {
            Some(r) => {
                out.room_day_misses += u32::from(!r.availability.lists_day(a.day));
                out.room_session_misses += u32::from(!r.availability.lists_session(a.session));
            }
            None => {
                out.room_day_misses += 1;
                out.room_session_misses += 1;
            }
        }
    }
    out
}

/// Scores a schedule. Pure: the same assignments always give the same score.
pub fn score(catalog: &Catalog, assignments: &[Assignment]) -> u32 {
    evaluate(catalog, assignments).score()
}
