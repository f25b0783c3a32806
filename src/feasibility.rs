//! Hard- and soft-constraint violation counting.
//!
//! [`count_violations`] is a pure function over a schedule and the teacher
//! roster. Conflicts are counted per unordered pair: three slots sharing a
//! teacher at the same day/period count as three teacher conflicts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{AssignmentSlot, Calendar, Schedule, Teacher};

/// Per-category violation counts for a schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationCounts {
    /// Pairs of slots sharing day, period, and teacher.
    pub teacher_conflicts: usize,
    /// Pairs of slots sharing day, period, and room.
    pub room_conflicts: usize,
    /// Pairs of slots sharing day, period, and class.
    pub class_conflicts: usize,
    /// Slots whose teacher is unknown or unavailable at that day/period.
    pub teacher_availability_violations: usize,
    /// Idle periods between a teacher's sessions, summed over teachers and days.
    pub gaps_in_teacher_schedule: usize,
    /// Idle periods between a class's sessions, summed over classes and days.
    pub gaps_in_class_schedule: usize,
    /// Same-subject sessions of a class on one day beyond the first.
    pub subject_distribution: usize,
}

impl ViolationCounts {
    /// Total double-booking pairs (teacher + room + class).
    pub fn hard_conflicts(&self) -> usize {
        self.teacher_conflicts + self.room_conflicts + self.class_conflicts
    }

    /// Whether every hard constraint holds.
    pub fn is_feasible(&self) -> bool {
        self.hard_conflicts() == 0 && self.teacher_availability_violations == 0
    }
}

/// Counts every violation category of `schedule`.
///
/// `calendar` maps slot day indices to the day names used by teacher
/// availability matrices.
pub fn count_violations(
    schedule: &Schedule,
    teachers: &[Teacher],
    calendar: &Calendar,
) -> ViolationCounts {
    let roster: HashMap<&str, &Teacher> = teachers.iter().map(|t| (t.id.as_str(), t)).collect();
    let slots = &schedule.slots;

    ViolationCounts {
        teacher_conflicts: pair_conflicts(slots, |s| s.teacher_id.as_str()),
        room_conflicts: pair_conflicts(slots, |s| s.room_id.as_str()),
        class_conflicts: pair_conflicts(slots, |s| s.class_id.as_str()),
        teacher_availability_violations: slots
            .iter()
            .filter(|s| !slot_available(s, &roster, calendar))
            .count(),
        gaps_in_teacher_schedule: gaps(slots, |s| s.teacher_id.as_str()),
        gaps_in_class_schedule: gaps(slots, |s| s.class_id.as_str()),
        subject_distribution: subject_distribution(slots),
    }
}

/// Whether the slot's teacher exists and is available at the slot's time.
pub(crate) fn slot_available(
    slot: &AssignmentSlot,
    roster: &HashMap<&str, &Teacher>,
    calendar: &Calendar,
) -> bool {
    let Some(teacher) = roster.get(slot.teacher_id.as_str()) else {
        return false;
    };
    calendar
        .day_name(slot.day)
        .is_some_and(|day| teacher.is_available(day, slot.period))
}

/// Counts unordered pairs of slots sharing day, period, and `key`.
fn pair_conflicts<'a, F>(slots: &'a [AssignmentSlot], key: F) -> usize
where
    F: Fn(&'a AssignmentSlot) -> &'a str,
{
    let mut groups: HashMap<(usize, u32, &str), usize> = HashMap::new();
    for s in slots {
        *groups.entry((s.day, s.period, key(s))).or_default() += 1;
    }
    groups.values().map(|&n| n * (n - 1) / 2).sum()
}

/// Sums idle periods between consecutive sessions of each entity per day.
fn gaps<'a, F>(slots: &'a [AssignmentSlot], key: F) -> usize
where
    F: Fn(&'a AssignmentSlot) -> &'a str,
{
    let mut per_day: HashMap<(&str, usize), Vec<u32>> = HashMap::new();
    for s in slots {
        per_day.entry((key(s), s.day)).or_default().push(s.period);
    }
    per_day
        .into_values()
        .map(|mut periods| {
            periods.sort_unstable();
            periods
                .windows(2)
                .map(|w| w[1].saturating_sub(w[0]).saturating_sub(1) as usize)
                .sum::<usize>()
        })
        .sum()
}

fn subject_distribution(slots: &[AssignmentSlot]) -> usize {
    let mut per_day: HashMap<(&str, &str, usize), usize> = HashMap::new();
    for s in slots {
        *per_day
            .entry((s.class_id.as_str(), s.subject.as_str(), s.day))
            .or_default() += 1;
    }
    per_day.values().map(|&n| n - 1).sum()
}
