//! Raw input records.
//!
//! These mirror the four input tables as handed over by the surrounding
//! application. Preference and availability fields are kept as raw text and
//! only parsed when the [`Catalog`](super::Catalog) is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of the course table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CourseRecord {
    /// Unique course code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Credit weight. Informational only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub credits: u32,
    /// Class-section code. Assigned round-robin when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class_code: Option<String>,
    /// Lecturer code. Assigned round-robin when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub lecturer_code: Option<String>,
}

impl CourseRecord {
    /// Creates a course without class or lecturer reference.
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
            class_code: None,
            lecturer_code: None,
        }
    }

    /// Sets the class-section reference.
    pub fn with_class(mut self, code: impl Into<String>) -> Self {
        self.class_code = Some(code.into());
        self
    }

    /// Sets the lecturer reference.
    pub fn with_lecturer(mut self, code: impl Into<String>) -> Self {
        self.lecturer_code = Some(code.into());
        self
    }
}

/// One row of the lecturer table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LecturerRecord {
    /// Unique lecturer code.
    pub code: String,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Comma-separated preferred day names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_days: Option<String>,
    /// Comma-separated preferred session numbers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferred_sessions: Option<String>,
}

impl LecturerRecord {
    /// Creates a lecturer with no preferences.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            preferred_days: None,
            preferred_sessions: None,
        }
    }

    /// Sets the raw preferred-days field.
    pub fn with_preferred_days(mut self, text: impl Into<String>) -> Self {
        self.preferred_days = Some(text.into());
        self
    }

    /// Sets the raw preferred-sessions field.
    pub fn with_preferred_sessions(mut self, text: impl Into<String>) -> Self {
        self.preferred_sessions = Some(text.into());
        self
    }
}

/// One row of the class-section table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassRecord {
    /// Unique class-section code.
    pub code: String,
    /// Number of enrolled students.
    pub student_count: u32,
}

impl ClassRecord {
    /// Creates a class-section record.
    pub fn new(code: impl Into<String>, student_count: u32) -> Self {
        Self {
            code: code.into(),
            student_count,
        }
    }
}

/// One row of the room table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoomRecord {
    /// Unique room code.
    pub code: String,
    /// Seat count.
    pub capacity: u32,
    /// Comma-separated available day names.
    #[cfg_attr(feature = "serde", serde(default))]
    pub available_days: Option<String>,
    /// Comma-separated available session numbers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub available_sessions: Option<String>,
}

impl RoomRecord {
    /// Creates a room available on every day and session.
    pub fn new(code: impl Into<String>, capacity: u32) -> Self {
        Self {
            code: code.into(),
            capacity,
            available_days: None,
            available_sessions: None,
        }
    }

    /// Sets the raw available-days field.
    pub fn with_available_days(mut self, text: impl Into<String>) -> Self {
        self.available_days = Some(text.into());
        self
    }

    /// Sets the raw available-sessions field.
    pub fn with_available_sessions(mut self, text: impl Into<String>) -> Self {
        self.available_sessions = Some(text.into());
        self
    }
}
