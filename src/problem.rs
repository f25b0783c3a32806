//! Timetabling problem instance.
//!
//! [`TimetableProblem`] snapshots the request entities, derives the list of
//! (class, subject) hour requirements, and implements
//! [`GaProblem`](crate::ga::GaProblem) so the generic runner can evolve
//! [`Schedule`]s.

use rand::Rng;
use std::collections::HashMap;
use tracing::warn;

use crate::fitness::{FitnessEvaluator, FitnessWeights};
use crate::ga::operators::{day_crossover, mutate};
use crate::ga::GaProblem;
use crate::generator::generate_random_schedule;
use crate::models::{Calendar, Class, Course, Room, Schedule, Teacher};

/// Hours a subject gets when no course record matches it.
pub const DEFAULT_HOURS_PER_WEEK: u32 = 1;

/// A weekly (class, subject) session target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Class that must be taught.
    pub class_id: String,
    /// Subject to teach.
    pub subject: String,
    /// Target sessions per week.
    pub hours: u32,
    /// Indices into [`TimetableProblem::teachers`] qualified for the subject.
    ///
    /// Empty means the requirement is unschedulable; it is never seeded
    /// but still scored as a shortfall.
    pub qualified_teachers: Vec<usize>,
}

impl Requirement {
    /// Whether at least one teacher can cover this requirement.
    pub fn is_schedulable(&self) -> bool {
        !self.qualified_teachers.is_empty()
    }
}

/// A timetable generation problem: entities, calendar, and scoring.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    /// Classes to timetable.
    pub classes: Vec<Class>,
    /// Teacher roster.
    pub teachers: Vec<Teacher>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Course records (subject → weekly hours).
    pub courses: Vec<Course>,
    /// Working days and periods.
    pub calendar: Calendar,
    /// Derived (class, subject) targets, in class then subject order.
    pub requirements: Vec<Requirement>,
    /// Fitness weights.
    pub weights: FitnessWeights,
    /// When true, a swap mutation that introduces a conflict is undone.
    pub validate_swaps: bool,
}

impl TimetableProblem {
    /// Builds a problem and derives its requirements.
    ///
    /// Subjects without a course get [`DEFAULT_HOURS_PER_WEEK`]; subjects
    /// without a qualified teacher are kept as unschedulable requirements.
    pub fn new(
        classes: Vec<Class>,
        teachers: Vec<Teacher>,
        rooms: Vec<Room>,
        courses: Vec<Course>,
        calendar: Calendar,
    ) -> Self {
        let requirements = derive_requirements(&classes, &teachers, &courses);
        for req in requirements.iter().filter(|r| !r.is_schedulable()) {
            warn!(
                class = %req.class_id,
                subject = %req.subject,
                "no qualified teacher; requirement left unscheduled"
            );
        }

        Self {
            classes,
            teachers,
            rooms,
            courses,
            calendar,
            requirements,
            weights: FitnessWeights::default(),
            validate_swaps: false,
        }
    }

    /// Sets the fitness weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Enables or disables conflict checking on swap mutations.
    pub fn with_validate_swaps(mut self, validate: bool) -> Self {
        self.validate_swaps = validate;
        self
    }

    /// Evaluator bound to this problem.
    pub fn evaluator(&self) -> FitnessEvaluator<'_> {
        FitnessEvaluator::new(&self.teachers, &self.calendar, &self.requirements)
            .with_weights(self.weights)
    }

    /// Total sessions requested across schedulable requirements.
    pub fn schedulable_hours(&self) -> usize {
        self.requirements
            .iter()
            .filter(|r| r.is_schedulable())
            .map(|r| r.hours as usize)
            .sum()
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }
}

fn derive_requirements(
    classes: &[Class],
    teachers: &[Teacher],
    courses: &[Course],
) -> Vec<Requirement> {
    let hours: HashMap<&str, u32> = courses
        .iter()
        .map(|c| (c.name.as_str(), c.hours_per_week.max(1)))
        .collect();

    let mut requirements = Vec::new();
    for class in classes {
        for subject in class.unique_subjects() {
            let qualified_teachers = teachers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_qualified(subject))
                .map(|(i, _)| i)
                .collect();
            requirements.push(Requirement {
                class_id: class.id.clone(),
                subject: subject.to_string(),
                hours: hours.get(subject).copied().unwrap_or(DEFAULT_HOURS_PER_WEEK),
                qualified_teachers,
            });
        }
    }
    requirements
}

impl GaProblem for TimetableProblem {
    type Individual = Schedule;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Schedule {
        generate_random_schedule(self, rng)
    }

    fn evaluate(&self, schedule: &Schedule) -> f64 {
        self.evaluator().evaluate(schedule)
    }

    fn crossover<R: Rng>(&self, parent1: &Schedule, parent2: &Schedule, rng: &mut R) -> Schedule {
        day_crossover(parent1, parent2, self.calendar.day_count(), rng)
    }

    fn mutate<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        mutate(schedule, self, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> Calendar {
        Calendar::new(["monday", "tuesday"], 2)
    }

    #[test]
    fn test_requirements_use_course_hours() {
        let cal = calendar();
        let problem = TimetableProblem::new(
            vec![Class::new("10A").with_subject("Math").with_subject("Art")],
            vec![Teacher::new("T1").with_subject("Math").with_full_availability(&cal)],
            vec![Room::new("R1")],
            vec![Course::new("c1", "Math", 3)],
            cal,
        );

        assert_eq!(problem.requirements.len(), 2);
        let math = &problem.requirements[0];
        assert_eq!(math.subject, "Math");
        assert_eq!(math.hours, 3);
        assert_eq!(math.qualified_teachers, vec![0]);

        // Art: no course (default hours) and no teacher (unschedulable).
        let art = &problem.requirements[1];
        assert_eq!(art.hours, DEFAULT_HOURS_PER_WEEK);
        assert!(!art.is_schedulable());

        assert_eq!(problem.schedulable_hours(), 3);
    }

    #[test]
    fn test_duplicate_subjects_yield_one_requirement() {
        let cal = calendar();
        let mut class = Class::new("10A");
        class.subjects = vec!["Math".into(), "Math".into()];
        let problem = TimetableProblem::new(
            vec![class],
            vec![Teacher::new("T1").with_subject("Math")],
            vec![Room::new("R1")],
            vec![Course::new("c1", "Math", 2)],
            cal,
        );
        assert_eq!(problem.requirements.len(), 1);
    }

    #[test]
    fn test_teacher_lookup() {
        let problem = TimetableProblem::new(
            vec![],
            vec![Teacher::new("T1"), Teacher::new("T2")],
            vec![],
            vec![],
            calendar(),
        );
        assert_eq!(problem.teacher("T2").map(|t| t.id.as_str()), Some("T2"));
        assert!(problem.teacher("T9").is_none());
    }
}
