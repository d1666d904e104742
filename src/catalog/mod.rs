//! Catalog preprocessing.
//!
//! Turns the four raw input tables into an immutable [`Catalog`]: preference
//! and availability text is parsed into [`Availability`] sets, day names and
//! lecturer/class codes are interned into dense ids, and code lookup tables
//! are built once.
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::{Catalog, ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
//!
//! let catalog = Catalog::builder()
//!     .course(CourseRecord::new("IF101", "Algorithms", 3).with_class("A").with_lecturer("L1"))
//!     .lecturer(LecturerRecord::new("L1", "Ada").with_preferred_days("Monday"))
//!     .class_section(ClassRecord::new("A", 30))
//!     .room(RoomRecord::new("R1", 40))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(catalog.courses().len(), 1);
//! assert!(catalog.lecturer_by_code("L1").is_some());
//! ```

mod entity;
mod parse;
mod records;

pub use entity::{Availability, ClassSection, Course, Lecturer, Room};
pub use parse::{parse_list, parse_sessions};
pub use records::{ClassRecord, CourseRecord, LecturerRecord, RoomRecord};

use std::collections::HashMap;

use log::{info, warn};

use crate::error::{CatalogError, Table};

/// Default day universe.
pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Default session universe.
pub const DEFAULT_SESSIONS: [u32; 5] = [1, 2, 3, 4, 5];

/// The days and sessions a course may be placed in when nothing narrows them.
///
/// Used when a lecturer states no preference and for the unconstrained
/// fallback slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    days: Vec<String>,
    sessions: Vec<u32>,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            sessions: DEFAULT_SESSIONS.to_vec(),
        }
    }
}

impl TimeGrid {
    /// Creates a grid from day names and session numbers.
    pub fn new<S: Into<String>>(
        days: impl IntoIterator<Item = S>,
        sessions: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            sessions: sessions.into_iter().collect(),
        }
    }

    /// Day names of the grid.
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Sessions of the grid.
    pub fn sessions(&self) -> &[u32] {
        &self.sessions
    }
}

/// Code → dense id table.
#[derive(Debug, Clone, Default)]
struct Interner {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    fn name(&self, id: usize) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or_default()
    }
}

/// Immutable, preprocessed input for one run.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    lecturers: Vec<Lecturer>,
    classes: Vec<ClassSection>,
    rooms: Vec<Room>,
    days: Interner,
    lecturer_codes: Interner,
    class_codes: Interner,
    room_index: HashMap<String, usize>,
    grid_days: Vec<usize>,
    grid_sessions: Vec<u32>,
}

impl Catalog {
    /// Starts building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Courses in input order. A course's position is its id.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Course by id.
    pub fn course(&self, id: usize) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Rooms in input order. A room's position is its id.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Room by id.
    pub fn room(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Room id for a room code.
    pub fn room_id(&self, code: &str) -> Option<usize> {
        self.room_index.get(code).copied()
    }

    /// Lecturer records in input order.
    pub fn lecturers(&self) -> &[Lecturer] {
        &self.lecturers
    }

    /// Lecturer record for an interned lecturer id.
    ///
    /// `None` when the id belongs to a code referenced by a course but absent
    /// from the lecturer table.
    pub fn lecturer(&self, id: usize) -> Option<&Lecturer> {
        self.lecturers.get(id)
    }

    /// Lecturer record by code.
    pub fn lecturer_by_code(&self, code: &str) -> Option<&Lecturer> {
        self.lecturer_codes.get(code).and_then(|id| self.lecturer(id))
    }

    /// Class-section records in input order.
    pub fn class_sections(&self) -> &[ClassSection] {
        &self.classes
    }

    /// Class-section record for an interned class id.
    pub fn class_section(&self, id: usize) -> Option<&ClassSection> {
        self.classes.get(id)
    }

    /// Class-section record by code.
    pub fn class_by_code(&self, code: &str) -> Option<&ClassSection> {
        self.class_codes.get(code).and_then(|id| self.class_section(id))
    }

    /// Minimum room capacity for a course: its class size, or 0 when the
    /// class code does not resolve.
    pub fn required_capacity(&self, course: &Course) -> u32 {
        self.class_section(course.class).map_or(0, |c| c.student_count)
    }

    /// Day name for a day id.
    pub fn day_name(&self, id: usize) -> &str {
        self.days.name(id)
    }

    /// Day id for a day name.
    pub fn day_id(&self, name: &str) -> Option<usize> {
        self.days.get(name)
    }

    /// Lecturer code for an interned lecturer id.
    pub fn lecturer_code(&self, id: usize) -> &str {
        self.lecturer_codes.name(id)
    }

    /// Class code for an interned class id.
    pub fn class_code(&self, id: usize) -> &str {
        self.class_codes.name(id)
    }

    /// Day ids of the time grid.
    pub fn grid_days(&self) -> &[usize] {
        &self.grid_days
    }

    /// Sessions of the time grid.
    pub fn grid_sessions(&self) -> &[u32] {
        &self.grid_sessions
    }
}

/// Collects raw records and builds a validated [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    courses: Vec<CourseRecord>,
    lecturers: Vec<LecturerRecord>,
    classes: Vec<ClassRecord>,
    rooms: Vec<RoomRecord>,
    grid: Option<TimeGrid>,
}

impl CatalogBuilder {
    /// Adds one course.
    pub fn course(mut self, record: CourseRecord) -> Self {
        self.courses.push(record);
        self
    }

    /// Adds several courses.
    pub fn courses(mut self, records: impl IntoIterator<Item = CourseRecord>) -> Self {
        self.courses.extend(records);
        self
    }

    /// Adds one lecturer.
    pub fn lecturer(mut self, record: LecturerRecord) -> Self {
        self.lecturers.push(record);
        self
    }

    /// Adds several lecturers.
    pub fn lecturers(mut self, records: impl IntoIterator<Item = LecturerRecord>) -> Self {
        self.lecturers.extend(records);
        self
    }

    /// Adds one class-section.
    pub fn class_section(mut self, record: ClassRecord) -> Self {
        self.classes.push(record);
        self
    }

    /// Adds several class-sections.
    pub fn class_sections(mut self, records: impl IntoIterator<Item = ClassRecord>) -> Self {
        self.classes.extend(records);
        self
    }

    /// Adds one room.
    pub fn room(mut self, record: RoomRecord) -> Self {
        self.rooms.push(record);
        self
    }

    /// Adds several rooms.
    pub fn rooms(mut self, records: impl IntoIterator<Item = RoomRecord>) -> Self {
        self.rooms.extend(records);
        self
    }

    /// Replaces the default Monday–Friday × sessions 1–5 grid.
    pub fn time_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Validates the tables and builds the catalog.
    ///
    /// # Errors
    ///
    /// Fails on an empty course or room table, an empty time grid, a
    /// duplicate code within a table, or a course that omits a reference
    /// into an empty table.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let grid = self.grid.unwrap_or_default();
        if self.courses.is_empty() {
            return Err(CatalogError::NoCourses);
        }
        if self.rooms.is_empty() {
            return Err(CatalogError::NoRooms);
        }
        if grid.days.is_empty() || grid.sessions.is_empty() {
            return Err(CatalogError::EmptyTimeGrid);
        }

        check_unique(Table::Courses, self.courses.iter().map(|c| c.code.as_str()))?;
        check_unique(Table::Lecturers, self.lecturers.iter().map(|l| l.code.as_str()))?;
        check_unique(Table::Classes, self.classes.iter().map(|c| c.code.as_str()))?;
        check_unique(Table::Rooms, self.rooms.iter().map(|r| r.code.as_str()))?;

        let mut days = Interner::default();
        let grid_days: Vec<usize> = grid.days.iter().map(|d| days.intern(d)).collect();
        let mut grid_sessions = Vec::with_capacity(grid.sessions.len());
        for &s in &grid.sessions {
            if !grid_sessions.contains(&s) {
                grid_sessions.push(s);
            }
        }

        // Table entries take the first ids so `lecturers[id]` lines up.
        let mut lecturer_codes = Interner::default();
        let lecturers: Vec<Lecturer> = self
            .lecturers
            .iter()
            .map(|rec| {
                lecturer_codes.intern(&rec.code);
                Lecturer {
                    code: rec.code.clone(),
                    name: rec.name.clone(),
                    preference: parse_availability(
                        &mut days,
                        rec.preferred_days.as_deref(),
                        rec.preferred_sessions.as_deref(),
                    ),
                }
            })
            .collect();

        let mut class_codes = Interner::default();
        let classes: Vec<ClassSection> = self
            .classes
            .iter()
            .map(|rec| {
                class_codes.intern(&rec.code);
                ClassSection {
                    code: rec.code.clone(),
                    student_count: rec.student_count,
                }
            })
            .collect();

        let mut room_index = HashMap::with_capacity(self.rooms.len());
        let rooms: Vec<Room> = self
            .rooms
            .iter()
            .enumerate()
            .map(|(id, rec)| {
                room_index.insert(rec.code.clone(), id);
                Room {
                    code: rec.code.clone(),
                    capacity: rec.capacity,
                    availability: parse_availability(
                        &mut days,
                        rec.available_days.as_deref(),
                        rec.available_sessions.as_deref(),
                    ),
                }
            })
            .collect();

        let mut courses = Vec::with_capacity(self.courses.len());
        for (i, rec) in self.courses.iter().enumerate() {
            let class_code = resolve_reference(
                rec,
                rec.class_code.as_deref(),
                Table::Classes,
                &self.classes,
                |c| c.code.as_str(),
                i,
            )?;
            let lecturer_code = resolve_reference(
                rec,
                rec.lecturer_code.as_deref(),
                Table::Lecturers,
                &self.lecturers,
                |l| l.code.as_str(),
                i,
            )?;
            courses.push(Course {
                code: rec.code.clone(),
                name: rec.name.clone(),
                credits: rec.credits,
                class: class_codes.intern(class_code),
                lecturer: lecturer_codes.intern(lecturer_code),
            });
        }

        info!(
            "catalog built: {} courses, {} lecturers, {} classes, {} rooms, {} days x {} sessions",
            courses.len(),
            lecturers.len(),
            classes.len(),
            rooms.len(),
            grid_days.len(),
            grid_sessions.len()
        );

        Ok(Catalog {
            courses,
            lecturers,
            classes,
            rooms,
            days,
            lecturer_codes,
            class_codes,
            room_index,
            grid_days,
            grid_sessions,
        })
    }
}

fn parse_availability(
    days: &mut Interner,
    day_text: Option<&str>,
    session_text: Option<&str>,
) -> Availability {
    let day_ids: Vec<usize> = parse_list(day_text).iter().map(|d| days.intern(d)).collect();
    Availability::new(day_ids, parse_sessions(session_text))
}

fn check_unique<'a>(
    table: Table,
    codes: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for code in codes {
        if !seen.insert(code) {
            return Err(CatalogError::DuplicateCode {
                table,
                code: code.to_string(),
            });
        }
    }
    Ok(())
}

/// Returns the explicit code, or the round-robin pick from `table` when the
/// course omits it.
fn resolve_reference<'a, T>(
    course: &CourseRecord,
    explicit: Option<&'a str>,
    table: Table,
    entries: &'a [T],
    code_of: impl Fn(&'a T) -> &'a str,
    position: usize,
) -> Result<&'a str, CatalogError> {
    if let Some(code) = explicit {
        return Ok(code);
    }
    if entries.is_empty() {
        return Err(CatalogError::UnassignedCourse {
            course: course.code.clone(),
            table,
        });
    }
    let code = code_of(&entries[position % entries.len()]);
    warn!(
        "course {} has no {} code, assigning {} round-robin",
        course.code, table, code
    );
    Ok(code)
}
