//! Schedule scoring.
//!
//! Higher is better and every score is at least 1, so fitness-proportional
//! selection never sees zero or negative weights. Hard-constraint penalties
//! are an order of magnitude larger than soft penalties and rewards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::feasibility::{count_violations, ViolationCounts};
use crate::models::{Calendar, Schedule, Teacher};
use crate::problem::Requirement;

/// Lowest score any schedule can receive.
pub const MIN_FITNESS: f64 = 1.0;

/// Weights of each scoring term.
///
/// # Defaults
///
/// ```
/// use u_timetable::fitness::FitnessWeights;
///
/// let w = FitnessWeights::default();
/// assert_eq!(w.conflict_penalty, 100.0);
/// assert_eq!(w.requirement_met_bonus, 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    /// Reward per scheduled slot.
    pub slot_reward: f64,
    /// Penalty per teacher, room, or class double-booking pair.
    pub conflict_penalty: f64,
    /// Penalty per slot outside its teacher's availability.
    pub availability_penalty: f64,
    /// Penalty per idle period in a teacher's day.
    pub teacher_gap_penalty: f64,
    /// Penalty per idle period in a class's day.
    pub class_gap_penalty: f64,
    /// Penalty per extra same-subject session on one day.
    pub distribution_penalty: f64,
    /// Bonus per (class, subject) whose hours are met exactly.
    pub requirement_met_bonus: f64,
    /// Penalty per hour of over- or under-scheduling.
    pub hour_deviation_penalty: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            slot_reward: 10.0,
            conflict_penalty: 100.0,
            availability_penalty: 50.0,
            teacher_gap_penalty: 2.0,
            class_gap_penalty: 3.0,
            distribution_penalty: 5.0,
            requirement_met_bonus: 50.0,
            hour_deviation_penalty: 20.0,
        }
    }
}

/// Hours shortfall (or excess) of one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourDeviation {
    /// Class concerned.
    pub class_id: String,
    /// Subject concerned.
    pub subject: String,
    /// Target sessions per week.
    pub required: u32,
    /// Sessions actually scheduled.
    pub scheduled: u32,
}

/// Score with the terms it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessBreakdown {
    /// Final clamped score.
    pub score: f64,
    /// Violation counts.
    pub violations: ViolationCounts,
    /// Requirements whose scheduled hours differ from the target.
    pub deviations: Vec<HourDeviation>,
}

/// Scores schedules against a teacher roster and requirement list.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    teachers: &'a [Teacher],
    calendar: &'a Calendar,
    requirements: &'a [Requirement],
    weights: FitnessWeights,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with default weights.
    pub fn new(
        teachers: &'a [Teacher],
        calendar: &'a Calendar,
        requirements: &'a [Requirement],
    ) -> Self {
        Self {
            teachers,
            calendar,
            requirements,
            weights: FitnessWeights::default(),
        }
    }

    /// Sets the weights.
    pub fn with_weights(mut self, weights: FitnessWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Scores `schedule`.
    pub fn evaluate(&self, schedule: &Schedule) -> f64 {
        let violations = count_violations(schedule, self.teachers, self.calendar);
        self.score(schedule, &violations, |_| {})
    }

    /// Scores `schedule` and reports the terms behind the score.
    pub fn breakdown(&self, schedule: &Schedule) -> FitnessBreakdown {
        let violations = count_violations(schedule, self.teachers, self.calendar);
        let mut deviations = Vec::new();
        let score = self.score(schedule, &violations, |d| deviations.push(d));
        FitnessBreakdown {
            score,
            violations,
            deviations,
        }
    }

    fn score<F>(&self, schedule: &Schedule, v: &ViolationCounts, mut on_deviation: F) -> f64
    where
        F: FnMut(HourDeviation),
    {
        let w = &self.weights;
        let mut score = w.slot_reward * schedule.len() as f64;

        score -= w.conflict_penalty * v.hard_conflicts() as f64;
        score -= w.availability_penalty * v.teacher_availability_violations as f64;
        score -= w.teacher_gap_penalty * v.gaps_in_teacher_schedule as f64;
        score -= w.class_gap_penalty * v.gaps_in_class_schedule as f64;
        score -= w.distribution_penalty * v.subject_distribution as f64;

        let mut scheduled: HashMap<(&str, &str), u32> = HashMap::new();
        for s in &schedule.slots {
            *scheduled
                .entry((s.class_id.as_str(), s.subject.as_str()))
                .or_default() += 1;
        }

        for req in self.requirements {
            let actual = scheduled
                .get(&(req.class_id.as_str(), req.subject.as_str()))
                .copied()
                .unwrap_or(0);
            if actual == req.hours {
                score += w.requirement_met_bonus;
            } else {
                score -= w.hour_deviation_penalty * actual.abs_diff(req.hours) as f64;
                on_deviation(HourDeviation {
                    class_id: req.class_id.clone(),
                    subject: req.subject.clone(),
                    required: req.hours,
                    scheduled: actual,
                });
            }
        }

        score.max(MIN_FITNESS)
    }
}
