//! Projection of a schedule into the flat output table.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::ga::Individual;

use super::schedule::Schedule;

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleRow {
    /// Day name.
    pub day: String,
    /// Session number.
    pub session: u32,
    /// Course code.
    pub course_code: String,
    /// Course name.
    pub course_name: String,
    /// Class-section code.
    pub class_code: String,
    /// Lecturer code.
    pub lecturer_code: String,
    /// Room code.
    pub room_code: String,
    /// Fitness of the whole schedule, repeated on every row.
    pub fitness: u32,
}

/// Maps a schedule to one row per assignment, in assignment order.
pub fn project(catalog: &Catalog, schedule: &Schedule) -> Vec<ScheduleRow> {
    let fitness = schedule.fitness();
    schedule
        .assignments()
        .iter()
        .filter_map(|a| {
            let course = catalog.course(a.course)?;
            Some(ScheduleRow {
                day: catalog.day_name(a.day).to_string(),
                session: a.session,
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                class_code: catalog.class_code(course.class).to_string(),
                lecturer_code: catalog.lecturer_code(course.lecturer).to_string(),
                room_code: catalog
                    .room(a.room)
                    .map(|r| r.code.clone())
                    .unwrap_or_default(),
                fitness,
            })
        })
        .collect()
}

/// Headline counts of an output table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimetableSummary {
    /// Scheduled courses (rows).
    pub courses: usize,
    /// Distinct lecturers.
    pub lecturers: usize,
    /// Distinct rooms.
    pub rooms: usize,
    /// Distinct class-sections.
    pub classes: usize,
}

impl TimetableSummary {
    /// Counts rows and distinct lecturers, rooms and classes.
    pub fn from_rows(rows: &[ScheduleRow]) -> Self {
        Self {
            courses: rows.len(),
            lecturers: count_distinct(rows, |r| r.lecturer_code.as_str()),
            rooms: count_distinct(rows, |r| r.room_code.as_str()),
            classes: count_distinct(rows, |r| r.class_code.as_str()),
        }
    }
}

fn count_distinct(rows: &[ScheduleRow], key: impl Fn(&ScheduleRow) -> &str) -> usize {
    rows.iter().map(key).collect::<HashSet<_>>().len()
}
