//! Randomized greedy candidate generation.
//!
//! Seeds the initial population. Each requirement gets up to
//! [`MAX_PLACEMENT_ATTEMPTS`] random `(day, period, teacher, room)` draws;
//! a draw is kept only if the teacher is available then and nothing already
//! placed double-books the teacher, room, or class. Candidates are usually
//! incomplete: closing the remaining gap is the optimizer's job.

use rand::Rng;

use crate::models::{AssignmentSlot, Schedule};
use crate::problem::TimetableProblem;

/// Random draws per requirement before giving up on its remaining hours.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Creates one random, possibly infeasible, candidate schedule.
pub fn generate_random_schedule<R: Rng>(problem: &TimetableProblem, rng: &mut R) -> Schedule {
    let mut schedule = Schedule::new("candidate");
    let days = problem.calendar.day_count();
    let periods = problem.calendar.periods_per_day;
    if days == 0 || periods == 0 || problem.rooms.is_empty() {
        return schedule;
    }

    for req in problem.requirements.iter().filter(|r| r.is_schedulable()) {
        let mut assigned = 0u32;
        let mut attempts = 0usize;

        while assigned < req.hours && attempts < MAX_PLACEMENT_ATTEMPTS {
            attempts += 1;

            let day = rng.random_range(0..days);
            let period = rng.random_range(1..=periods);
            let teacher = &problem.teachers
                [req.qualified_teachers[rng.random_range(0..req.qualified_teachers.len())]];
            let room = &problem.rooms[rng.random_range(0..problem.rooms.len())];

            let available = problem
                .calendar
                .day_name(day)
                .is_some_and(|d| teacher.is_available(d, period));
            if !available {
                continue;
            }

            let slot = AssignmentSlot::new(
                day,
                period,
                req.class_id.as_str(),
                req.subject.as_str(),
                teacher.id.as_str(),
                room.id.as_str(),
            );
            if schedule.has_conflict(&slot, None) {
                continue;
            }

            schedule.push(slot);
            assigned += 1;
        }
    }

    schedule
}
