//! Post-optimization teacher-gap reduction.
//!
//! A single best-effort local-search pass over the final schedule. For each
//! teacher and day, sessions are walked in period order; when an idle
//! period follows a session, the next session is pulled into it by swapping
//! periods with a slot of another teacher that sits there. Class schedules
//! are not targeted. Gaps without a compatible partner slot stay open.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

use crate::feasibility::slot_available;
use crate::models::{AssignmentSlot, Calendar, Schedule, Teacher};

/// Closes teacher gaps in place. Returns the number of swaps made.
///
/// A swap is made only if neither moved slot ends up sharing a teacher,
/// room, or class with another slot at its new period, and both teachers
/// are available at their new periods.
pub fn refine(schedule: &mut Schedule, teachers: &[Teacher], calendar: &Calendar) -> usize {
    let roster: HashMap<&str, &Teacher> = teachers.iter().map(|t| (t.id.as_str(), t)).collect();

    // (teacher, day) → slot indices; BTreeMap keeps the pass deterministic.
    let mut by_teacher_day: BTreeMap<(String, usize), Vec<usize>> = BTreeMap::new();
    for (i, s) in schedule.slots.iter().enumerate() {
        by_teacher_day
            .entry((s.teacher_id.clone(), s.day))
            .or_default()
            .push(i);
    }

    let mut swaps = 0;
    for ((teacher_id, day), mut indices) in by_teacher_day {
        indices.sort_by_key(|&i| schedule.slots[i].period);

        for w in 1..indices.len() {
            let prev = schedule.slots[indices[w - 1]].period;
            let mover = indices[w];
            let current = schedule.slots[mover].period;
            if current <= prev + 1 {
                continue;
            }
            let target = prev + 1;

            let partner = (0..schedule.slots.len()).find(|&j| {
                let s = &schedule.slots[j];
                j != mover
                    && s.day == day
                    && s.period == target
                    && s.teacher_id != teacher_id
                    && swap_is_clean(schedule, mover, j, &roster, calendar)
            });

            if let Some(j) = partner {
                schedule.slots[mover].period = target;
                schedule.slots[j].period = current;
                swaps += 1;
                trace!(
                    teacher = %teacher_id,
                    day,
                    from = current,
                    to = target,
                    "gap closed"
                );
            }
        }
    }

    debug!(swaps, "refinement pass complete");
    swaps
}

/// Whether exchanging the periods of slots `a` and `b` (same day) keeps
/// both conflict-free and within availability.
fn swap_is_clean(
    schedule: &Schedule,
    a: usize,
    b: usize,
    roster: &HashMap<&str, &Teacher>,
    calendar: &Calendar,
) -> bool {
    let slots = &schedule.slots;
    let moved_a = AssignmentSlot {
        period: slots[b].period,
        ..slots[a].clone()
    };
    let moved_b = AssignmentSlot {
        period: slots[a].period,
        ..slots[b].clone()
    };

    if moved_a.shares_resource(&moved_b) && moved_a.same_time(&moved_b) {
        return false;
    }
    let clashes = |moved: &AssignmentSlot| {
        slots
            .iter()
            .enumerate()
            .any(|(k, s)| k != a && k != b && s.conflicts_with(moved))
    };
    if clashes(&moved_a) || clashes(&moved_b) {
        return false;
    }

    slot_available(&moved_a, roster, calendar) && slot_available(&moved_b, roster, calendar)
}
