//! Assignments and schedules.

use crate::ga::Individual;

use super::slot::Slot;

/// One course bound to one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// Course id (position in the catalog's course list).
    pub course: usize,
    /// Interned day id.
    pub day: usize,
    /// Session number.
    pub session: u32,
    /// Room id.
    pub room: usize,
}

impl Assignment {
    /// Binds `course` to `slot`.
    pub fn new(course: usize, slot: Slot) -> Self {
        Self {
            course,
            day: slot.day,
            session: slot.session,
            room: slot.room,
        }
    }

    /// The slot part of the assignment.
    pub fn slot(&self) -> Slot {
        Slot {
            day: self.day,
            session: self.session,
            room: self.room,
        }
    }
}

/// A complete candidate timetable: one assignment per course plus its cached
/// fitness.
///
/// Assignment order is not course order: crossover may permute positions.
/// Use [`assignment_for`](Self::assignment_for) to look a course up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    assignments: Vec<Assignment>,
    fitness: u32,
}

impl Schedule {
    /// Wraps assignments with an unset (zero) fitness.
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self {
            assignments,
            fitness: 0,
        }
    }

    /// The assignment sequence.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Mutable access to the assignment sequence.
    ///
    /// The cached fitness is stale after any change until re-scored.
    pub fn assignments_mut(&mut self) -> &mut [Assignment] {
        &mut self.assignments
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when the schedule has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// The assignment of `course`, if present.
    pub fn assignment_for(&self, course: usize) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.course == course)
    }

    /// True when every course in `0..course_count` appears exactly once and
    /// nothing else appears.
    pub fn covers_each_course_once(&self, course_count: usize) -> bool {
        if self.assignments.len() != course_count {
            return false;
        }
        let mut seen = vec![false; course_count];
        for a in &self.assignments {
            match seen.get_mut(a.course) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}

impl Individual for Schedule {
    type Fitness = u32;

    fn fitness(&self) -> u32 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: u32) {
        self.fitness = fitness;
    }
}
