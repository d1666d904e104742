//! Typed catalog entities.
//!
//! Day names, lecturer codes and class codes are interned into dense ids by
//! the [`Catalog`](super::Catalog); entities refer to each other through those
//! ids.

/// A set of days and sessions.
///
/// Used both for lecturer preferences and room availability. An empty
/// dimension means "unconstrained" to [`allows_day`](Self::allows_day), which
/// slot search uses, while [`lists_day`](Self::lists_day) and
/// [`prefers_day`](Self::prefers_day), which scoring uses, accept nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    days: Vec<usize>,
    sessions: Vec<u32>,
}

impl Availability {
    /// Creates an availability from day ids and session numbers.
    ///
    /// Duplicates are collapsed, keeping first-appearance order.
    pub fn new(
        days: impl IntoIterator<Item = usize>,
        sessions: impl IntoIterator<Item = u32>,
    ) -> Self {
        let mut out = Self::default();
        for d in days {
            if !out.days.contains(&d) {
                out.days.push(d);
            }
        }
        for s in sessions {
            if !out.sessions.contains(&s) {
                out.sessions.push(s);
            }
        }
        out
    }

    /// Availability with no constraint in either dimension.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Listed day ids, in input order.
    pub fn days(&self) -> &[usize] {
        &self.days
    }

    /// Listed sessions, in input order.
    pub fn sessions(&self) -> &[u32] {
        &self.sessions
    }

    /// True when `day` is listed, or no day is listed at all.
    pub fn allows_day(&self, day: usize) -> bool {
        self.days.is_empty() || self.days.contains(&day)
    }

    /// True when `session` is listed, or no session is listed at all.
    pub fn allows_session(&self, session: u32) -> bool {
        self.sessions.is_empty() || self.sessions.contains(&session)
    }

    /// True only when `day` is explicitly listed. An empty list lists
    /// nothing.
    pub fn lists_day(&self, day: usize) -> bool {
        self.days.contains(&day)
    }

    /// True only when `session` is explicitly listed.
    pub fn lists_session(&self, session: u32) -> bool {
        self.sessions.contains(&session)
    }

    /// True only when `day` is explicitly listed.
    pub fn prefers_day(&self, day: usize) -> bool {
        self.days.contains(&day)
    }

    /// True only when `session` is explicitly listed.
    pub fn prefers_session(&self, session: u32) -> bool {
        self.sessions.contains(&session)
    }

    /// Days to enumerate: the listed ones, or `all` when none are listed.
    pub fn candidate_days<'a>(&'a self, all: &'a [usize]) -> &'a [usize] {
        if self.days.is_empty() {
            all
        } else {
            &self.days
        }
    }

    /// Sessions to enumerate: the listed ones, or `all` when none are listed.
    pub fn candidate_sessions<'a>(&'a self, all: &'a [u32]) -> &'a [u32] {
        if self.sessions.is_empty() {
            all
        } else {
            &self.sessions
        }
    }
}

/// A course offering, bound to one class-section and one lecturer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique course code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Credit weight (not used by scoring).
    pub credits: u32,
    /// Interned class code.
    pub class: usize,
    /// Interned lecturer code.
    pub lecturer: usize,
}

/// A lecturer and their time preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    /// Unique lecturer code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Preferred days and sessions.
    pub preference: Availability,
}

/// A class-section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSection {
    /// Unique class code.
    pub code: String,
    /// Number of students; the minimum room capacity.
    pub student_count: u32,
}

/// A room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Unique room code.
    pub code: String,
    /// Seat count.
    pub capacity: u32,
    /// Days and sessions the room can be booked.
    pub availability: Availability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_availability_allows_everything() {
        let a = Availability::unconstrained();
        assert!(a.allows_day(3));
        assert!(a.allows_session(9));
        assert!(!a.prefers_day(3));
        assert!(!a.prefers_session(9));
        assert!(!a.lists_day(3));
        assert!(!a.lists_session(9));
    }

    #[test]
    fn test_listed_availability() {
        let a = Availability::new([0, 2], [1]);
        assert!(a.allows_day(2));
        assert!(!a.allows_day(1));
        assert!(a.allows_session(1));
        assert!(!a.allows_session(2));
        assert!(a.prefers_day(0));
        assert!(a.lists_day(0));
        assert!(!a.lists_day(1));
        assert!(a.lists_session(1));
    }

    #[test]
    fn test_candidates_fall_back_to_all() {
        let all_days = [0, 1, 2];
        let all_sessions = [1, 2];
        let a = Availability::new(Vec::<usize>::new(), [2]);
        assert_eq!(a.candidate_days(&all_days), &[0, 1, 2]);
        assert_eq!(a.candidate_sessions(&all_sessions), &[2]);
    }

    #[test]
    fn test_new_dedups() {
        let a = Availability::new([1, 1, 0], [3, 3]);
        assert_eq!(a.days(), &[1, 0]);
        assert_eq!(a.sessions(), &[3]);
    }
}
