//! Timetable-specific genetic operators.
//!
//! # Crossover
//!
//! - [`day_crossover`]: single cut point on the working-day axis, followed
//!   by [`resolve_conflicts`] repair
//!
//! # Mutation
//!
//! - [`move_mutation`]: relocate one slot to a conflict-free day/period
//! - [`swap_mutation`]: exchange the day/period of two slots (unvalidated by default)
//! - [`room_change_mutation`]: move one slot to a different free room
//!
//! Every operator works on an owned [`Schedule`]; parents are never
//! modified.

use rand::Rng;
use std::collections::HashSet;

use crate::models::{AssignmentSlot, Calendar, Room, Schedule};
use crate::problem::TimetableProblem;

/// Random day/period proposals tried by [`move_mutation`].
pub const MOVE_ATTEMPTS: usize = 10;

// ============================================================================
// Crossover
// ============================================================================

/// Day-based single-point crossover.
///
/// Draws a day index `k` uniformly from `0..day_count`. The child takes
/// parent1's slots on days `≤ k` followed by parent2's slots on days `> k`,
/// then [`resolve_conflicts`] drops any resulting double-bookings.
pub fn day_crossover<R: Rng>(
    parent1: &Schedule,
    parent2: &Schedule,
    day_count: usize,
    rng: &mut R,
) -> Schedule {
    if day_count == 0 {
        return parent1.clone();
    }
    let cut = rng.random_range(0..day_count);

    let slots = parent1
        .slots
        .iter()
        .filter(|s| s.day <= cut)
        .chain(parent2.slots.iter().filter(|s| s.day > cut))
        .cloned()
        .collect();

    let mut child = Schedule {
        name: parent1.name.clone(),
        created_at: parent1.created_at,
        slots,
        fitness: 0.0,
    };
    resolve_conflicts(&mut child);
    child
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Resource {
    Teacher,
    Room,
    Class,
}

/// Destructive conflict repair.
///
/// Within every `(day, period)` group, scanning in slot order, a slot whose
/// teacher, room, or class already appeared earlier in the group is
/// removed. Removed slots are not reassigned. Surviving slots keep their
/// relative order.
///
/// Returns the number of slots removed.
pub fn resolve_conflicts(schedule: &mut Schedule) -> usize {
    let keep: Vec<bool> = {
        let mut seen: HashSet<(usize, u32, Resource, &str)> = HashSet::new();
        schedule
            .slots
            .iter()
            .map(|s| {
                let keys = [
                    (s.day, s.period, Resource::Teacher, s.teacher_id.as_str()),
                    (s.day, s.period, Resource::Room, s.room_id.as_str()),
                    (s.day, s.period, Resource::Class, s.class_id.as_str()),
                ];
                if keys.iter().any(|k| seen.contains(k)) {
                    false
                } else {
                    seen.extend(keys);
                    true
                }
            })
            .collect()
    };

    let before = schedule.slots.len();
    let mut flags = keep.into_iter();
    schedule.slots.retain(|_| flags.next().unwrap_or(true));
    before - schedule.slots.len()
}

// ============================================================================
// Mutation
// ============================================================================

/// The three mutation operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// [`move_mutation`]
    Move,
    /// [`swap_mutation`]
    Swap,
    /// [`room_change_mutation`]
    RoomChange,
}

impl MutationKind {
    /// All operators, in draw order.
    pub const ALL: [MutationKind; 3] = [
        MutationKind::Move,
        MutationKind::Swap,
        MutationKind::RoomChange,
    ];

    /// Draws one operator uniformly.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Applies one uniformly chosen mutation operator.
///
/// Returns the operator drawn and whether it changed the schedule.
pub fn mutate<R: Rng>(
    schedule: &mut Schedule,
    problem: &TimetableProblem,
    rng: &mut R,
) -> (MutationKind, bool) {
    let kind = MutationKind::random(rng);
    let changed = match kind {
        MutationKind::Move => move_mutation(schedule, &problem.calendar, rng),
        MutationKind::Swap => swap_mutation(schedule, problem.validate_swaps, rng),
        MutationKind::RoomChange => room_change_mutation(schedule, &problem.rooms, rng),
    };
    (kind, changed)
}

/// Moves one random slot to a random day/period.
///
/// Up to [`MOVE_ATTEMPTS`] proposals are drawn; the first one that does
/// not double-book the slot's teacher, room, or class is applied. Returns
/// `false` if every proposal conflicted.
pub fn move_mutation<R: Rng>(schedule: &mut Schedule, calendar: &Calendar, rng: &mut R) -> bool {
    let days = calendar.day_count();
    if schedule.is_empty() || days == 0 || calendar.periods_per_day == 0 {
        return false;
    }
    let idx = rng.random_range(0..schedule.len());

    for _ in 0..MOVE_ATTEMPTS {
        let candidate = AssignmentSlot {
            day: rng.random_range(0..days),
            period: rng.random_range(1..=calendar.periods_per_day),
            ..schedule.slots[idx].clone()
        };
        if !schedule.has_conflict(&candidate, Some(idx)) {
            schedule.slots[idx] = candidate;
            return true;
        }
    }
    false
}

/// Exchanges the day/period of two distinct random slots.
///
/// Teacher, room, class, and subject stay with their slot. With
/// `validate == false` the result is not checked and may contain new
/// conflicts. With `validate == true` the swap is undone if either slot
/// ends up double-booked.
pub fn swap_mutation<R: Rng>(schedule: &mut Schedule, validate: bool, rng: &mut R) -> bool {
    let n = schedule.len();
    if n < 2 {
        return false;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }

    swap_times(&mut schedule.slots, i, j);

    if validate {
        let clash = schedule.has_conflict(&schedule.slots[i], Some(i))
            || schedule.has_conflict(&schedule.slots[j], Some(j));
        if clash {
            swap_times(&mut schedule.slots, i, j);
            return false;
        }
    }
    true
}

fn swap_times(slots: &mut [AssignmentSlot], i: usize, j: usize) {
    let (day, period) = (slots[i].day, slots[i].period);
    slots[i].day = slots[j].day;
    slots[i].period = slots[j].period;
    slots[j].day = day;
    slots[j].period = period;
}

/// Reassigns one random slot to a different random room.
///
/// Accepted only if no other slot occupies that room at the same
/// day/period.
pub fn room_change_mutation<R: Rng>(schedule: &mut Schedule, rooms: &[Room], rng: &mut R) -> bool {
    if schedule.is_empty() {
        return false;
    }
    let idx = rng.random_range(0..schedule.len());
    let current = &schedule.slots[idx];

    let alternatives: Vec<&Room> = rooms.iter().filter(|r| r.id != current.room_id).collect();
    if alternatives.is_empty() {
        return false;
    }
    let room = alternatives[rng.random_range(0..alternatives.len())];

    let occupied = schedule
        .slots
        .iter()
        .enumerate()
        .any(|(i, s)| i != idx && s.same_time(current) && s.room_id == room.id);
    if occupied {
        return false;
    }

    schedule.slots[idx].room_id = room.id.clone();
    true
}
