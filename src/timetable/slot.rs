//! Slot search and booking bookkeeping.
//!
//! A [`Slot`] is a (day, session, room) triple. A [`UsedSlots`] set records
//! the bookings already made, one key per booked resource, so that a new slot
//! can be checked for room, lecturer and class double-booking in O(1).

use std::collections::HashSet;

use crate::catalog::{Catalog, Course};

/// A (day, session, room) triple a course can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Interned day id.
    pub day: usize,
    /// Session number.
    pub session: u32,
    /// Room id.
    pub room: usize,
}

/// The resource a booking key reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// A room, by room id.
    Room(usize),
    /// A lecturer, by interned lecturer id.
    Lecturer(usize),
    /// A class-section, by interned class id.
    Class(usize),
}

/// One reserved resource at one (day, session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Booking {
    /// Interned day id.
    pub day: usize,
    /// Session number.
    pub session: u32,
    /// What is reserved.
    pub resource: Resource,
}

impl Booking {
    /// The room, lecturer and class bookings implied by placing `course` in
    /// `slot`, in that order.
    pub fn for_course(course: &Course, slot: Slot) -> [Booking; 3] {
        let at = |resource| Booking {
            day: slot.day,
            session: slot.session,
            resource,
        };
        [
            at(Resource::Room(slot.room)),
            at(Resource::Lecturer(course.lecturer)),
            at(Resource::Class(course.class)),
        ]
    }
}

/// Set of bookings already made.
#[derive(Debug, Clone, Default)]
pub struct UsedSlots {
    bookings: HashSet<Booking>,
}

impl UsedSlots {
    /// An empty booking set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the room, lecturer and class bookings of `course` at `slot`.
    pub fn book(&mut self, course: &Course, slot: Slot) {
        self.bookings.extend(Booking::for_course(course, slot));
    }

    /// Records one booking. Returns `false` if it was already present.
    pub fn insert(&mut self, booking: Booking) -> bool {
        self.bookings.insert(booking)
    }

    /// True when `booking` is already reserved.
    pub fn contains(&self, booking: &Booking) -> bool {
        self.bookings.contains(booking)
    }

    /// True when placing `course` at `slot` would double-book its room,
    /// lecturer or class.
    pub fn conflicts(&self, course: &Course, slot: Slot) -> bool {
        Booking::for_course(course, slot)
            .iter()
            .any(|b| self.bookings.contains(b))
    }

    /// Number of stored bookings.
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// True when nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

/// Enumerates every slot that can host `course` given the bookings in `used`.
///
/// Days and sessions come from the lecturer's preferences, or the whole time
/// grid when the lecturer is unknown or states none. A candidate is kept when
/// the room seats the class, the room is available on that day and session,
/// and none of its room, lecturer or class bookings is taken.
///
/// The order is deterministic: days, then sessions, then rooms in catalog
/// order. An empty result means no valid slot exists; the caller chooses the
/// fallback.
pub fn find_valid_slots(catalog: &Catalog, course: &Course, used: &UsedSlots) -> Vec<Slot> {
    let (days, sessions) = match catalog.lecturer(course.lecturer) {
        Some(lecturer) => (
            lecturer.preference.candidate_days(catalog.grid_days()),
            lecturer.preference.candidate_sessions(catalog.grid_sessions()),
        ),
        None => (catalog.grid_days(), catalog.grid_sessions()),
    };
    let needed = catalog.required_capacity(course);

    let mut valid = Vec::new();
    for &day in days {
        for &session in sessions {
            for (room_id, room) in catalog.rooms().iter().enumerate() {
                if room.capacity < needed
                    || !room.availability.allows_day(day)
                    || !room.availability.allows_session(session)
                {
                    continue;
                }
                let slot = Slot {
                    day,
                    session,
                    room: room_id,
                };
                if !used.conflicts(course, slot) {
                    valid.push(slot);
                }
            }
        }
    }
    valid
}
