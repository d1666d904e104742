//! Genetic operators on assignment sequences.
//!
//! # Crossover
//!
//! [`order_preserving_crossover`] is an order crossover (Davis, 1985) keyed on
//! course identity: the child keeps a segment of one parent in place and takes
//! the rest from the other parent in that parent's order, skipping courses it
//! already holds. Slots are inherited, never recomputed, so a child may carry
//! collisions neither parent had.
//!
//! # Mutation
//!
//! [`reassign_mutation`] moves one course to a fresh slot from Slot Search.
//! See [`MutationScope`] for which bookings that search respects.
//!
//! Both operators preserve the one-assignment-per-course invariant.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::Catalog;

use super::schedule::Assignment;
use super::slot::{find_valid_slots, UsedSlots};

/// Which bookings mutation's slot search avoids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MutationScope {
    /// Search with an empty booking set. The new slot satisfies the course's
    /// own constraints but may collide with the rest of the schedule.
    #[default]
    Isolated,

    /// Search with the bookings of every other assignment in the schedule.
    Contextual,
}

/// Order-preserving two-point crossover.
///
/// Picks two distinct cut points `start < end`. Each child copies one
/// parent's `[start, end)` segment in place and fills the remaining positions
/// left to right with the other parent's assignments, in that parent's order,
/// skipping courses already present.
///
/// Sequences shorter than two pass through unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn order_preserving_crossover<R: Rng>(
    parent1: &[Assignment],
    parent2: &[Assignment],
    rng: &mut R,
) -> (Vec<Assignment>, Vec<Assignment>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let (start, end) = cut_points(n, rng);
    (
        build_child(parent1, parent2, start, end),
        build_child(parent2, parent1, start, end),
    )
}

/// Builds one child: `template[start..end]` in place, the rest from `donor`.
fn build_child(
    template: &[Assignment],
    donor: &[Assignment],
    start: usize,
    end: usize,
) -> Vec<Assignment> {
    let n = template.len();
    let course_span = template
        .iter()
        .chain(donor)
        .map(|a| a.course + 1)
        .max()
        .unwrap_or(0);
    let mut present = vec![false; course_span];
    for a in &template[start..end] {
        present[a.course] = true;
    }

    let mut fill = donor.iter().filter(|a| !present[a.course]);
    let mut child = Vec::with_capacity(n);
    for i in 0..n {
        if (start..end).contains(&i) {
            child.push(template[i]);
        } else if let Some(&a) = fill.next() {
            child.push(a);
        }
    }
    child
}

/// Two distinct cut points `start < end` in `0..n`. Requires `n >= 2`.
fn cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let mut b = rng.random_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a.min(b), a.max(b))
}

/// Moves one uniformly chosen assignment to a uniformly chosen valid slot.
///
/// Returns `true` when an assignment changed. When Slot Search finds nothing
/// for the chosen course, the schedule is left as is.
pub fn reassign_mutation<R: Rng>(
    catalog: &Catalog,
    assignments: &mut [Assignment],
    scope: MutationScope,
    rng: &mut R,
) -> bool {
    if assignments.is_empty() {
        return false;
    }
    let pos = rng.random_range(0..assignments.len());
    let Some(course) = catalog.course(assignments[pos].course) else {
        return false;
    };

    let mut used = UsedSlots::new();
    if scope == MutationScope::Contextual {
        for (i, other) in assignments.iter().enumerate() {
            if i == pos {
                continue;
            }
            if let Some(c) = catalog.course(other.course) {
                used.book(c, other.slot());
            }
        }
    }

    match find_valid_slots(catalog, course, &used).choose(rng) {
        Some(&slot) => {
            assignments[pos] = Assignment::new(assignments[pos].course, slot);
            true
        }
        None => false,
    }
}
