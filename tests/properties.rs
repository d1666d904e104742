//! Property tests for scoring, slot search and the genetic operators.

use proptest::prelude::*;

use u_timetable::catalog::{Catalog, ClassRecord, CourseRecord, LecturerRecord, RoomRecord};
use u_timetable::random::create_rng;
use u_timetable::timetable::{
    find_valid_slots, fitness, order_preserving_crossover, reassign_mutation, Assignment,
    MutationScope, Schedule, Slot, UsedSlots,
};

const COURSES: usize = 8;

fn catalog() -> Catalog {
    Catalog::builder()
        .courses((0..COURSES).map(|i| {
            CourseRecord::new(format!("C{i}"), format!("Course {i}"), 2)
                .with_class(["A", "B"][i % 2])
                .with_lecturer(["L1", "L2", "L3"][i % 3])
        }))
        .lecturer(
            LecturerRecord::new("L1", "Ada")
                .with_preferred_days("Monday,Thursday")
                .with_preferred_sessions("1,2"),
        )
        .lecturer(LecturerRecord::new("L2", "Grace").with_preferred_sessions("4,5"))
        .class_section(ClassRecord::new("A", 25))
        .class_section(ClassRecord::new("B", 45))
        .room(RoomRecord::new("R1", 30).with_available_days("Monday,Tuesday"))
        .room(RoomRecord::new("R2", 50).with_available_sessions("2,3,4"))
        .room(RoomRecord::new("R3", 20))
        .build()
        .unwrap()
}

/// Assignments for every course in a random order with arbitrary slots.
/// Room ids may point past the room table.
fn schedule_strategy() -> impl Strategy<Value = Vec<Assignment>> {
    let slots = prop::collection::vec((0usize..5, 0u32..8, 0usize..4), COURSES);
    (Just((0..COURSES).collect::<Vec<_>>()).prop_shuffle(), slots).prop_map(|(order, slots)| {
        order
            .into_iter()
            .zip(slots)
            .map(|(course, (day, session, room))| {
                Assignment::new(course, Slot { day, session, room })
            })
            .collect()
    })
}

/// Assignments where every course sits in the same slot.
fn colliding_strategy() -> impl Strategy<Value = Vec<Assignment>> {
    (0usize..5, 1u32..6, 0usize..3).prop_map(|(day, session, room)| {
        (0..COURSES)
            .map(|course| Assignment::new(course, Slot { day, session, room }))
            .collect()
    })
}

proptest! {
    #[test]
    fn score_matches_breakdown_and_is_bounded(assignments in schedule_strategy()) {
        let catalog = catalog();
        let breakdown = fitness::evaluate(&catalog, &assignments);
        let score = fitness::score(&catalog, &assignments);
        prop_assert_eq!(score, breakdown.score());
        // At most two preference hits per course.
        prop_assert!(score <= 1000 + 10 * COURSES as u32);
    }

    #[test]
    fn all_colliding_schedules_floor_at_zero(assignments in colliding_strategy()) {
        let catalog = catalog();
        let breakdown = fitness::evaluate(&catalog, &assignments);
        prop_assert_eq!(breakdown.room_collisions, COURSES as u32 - 1);
        prop_assert_eq!(fitness::score(&catalog, &assignments), 0);
    }

    #[test]
    fn score_is_deterministic_and_order_free(assignments in schedule_strategy()) {
        let catalog = catalog();
        let first = fitness::score(&catalog, &assignments);
        prop_assert_eq!(first, fitness::score(&catalog, &assignments));
        let mut reversed = assignments.clone();
        reversed.reverse();
        prop_assert_eq!(
            fitness::evaluate(&catalog, &assignments).collisions(),
            fitness::evaluate(&catalog, &reversed).collisions()
        );
        prop_assert_eq!(first, fitness::score(&catalog, &reversed));
    }

    #[test]
    fn crossover_and_mutation_keep_each_course_once(
        p1 in schedule_strategy(),
        p2 in schedule_strategy(),
        seed in any::<u64>(),
        contextual in any::<bool>(),
    ) {
        let catalog = catalog();
        let scope = if contextual { MutationScope::Contextual } else { MutationScope::Isolated };
        let mut rng = create_rng(seed);

        let (mut c1, mut c2) = order_preserving_crossover(&p1, &p2, &mut rng);
        reassign_mutation(&catalog, &mut c1, scope, &mut rng);
        reassign_mutation(&catalog, &mut c2, scope, &mut rng);

        prop_assert!(Schedule::new(c1).covers_each_course_once(COURSES));
        prop_assert!(Schedule::new(c2).covers_each_course_once(COURSES));
    }

    #[test]
    fn slot_search_is_sound(booked in schedule_strategy(), course in 0..COURSES) {
        let catalog = catalog();
        let mut used = UsedSlots::new();
        for a in &booked {
            if a.course != course {
                used.book(&catalog.courses()[a.course], a.slot());
            }
        }

        let target = &catalog.courses()[course];
        for slot in find_valid_slots(&catalog, target, &used) {
            let room = catalog.room(slot.room).unwrap();
            prop_assert!(room.capacity >= catalog.required_capacity(target));
            prop_assert!(room.availability.allows_day(slot.day));
            prop_assert!(room.availability.allows_session(slot.session));
            prop_assert!(!used.conflicts(target, slot));
        }
    }
}
