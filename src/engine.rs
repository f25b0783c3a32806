//! Generation entry point.
//!
//! [`generate`] takes a [`GenerateRequest`] (the payload the HTTP layer
//! deserializes) and returns a [`GenerateResult`] ready for persistence:
//!
//! 1. precondition checks (empty entity lists, bad calendar)
//! 2. advisory validation, logged as warnings
//! 3. GA run over a [`TimetableProblem`]
//! 4. gap refinement of the best schedule
//! 5. resolution of IDs to display names
//!
//! Running out of generations with conflicts left is not an error: the
//! result carries its [`ViolationCounts`] and unmet requirements so the
//! caller can route it to a conflict review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::feasibility::ViolationCounts;
use crate::fitness::HourDeviation;
use crate::ga::{GaOverrides, GaRunner};
use crate::models::{Calendar, Class, Course, Room, Schedule, Teacher};
use crate::problem::TimetableProblem;
use crate::refine::refine;
use crate::validation::{check_preconditions, validate_input};

/// A timetable generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Classes to timetable.
    pub classes: Vec<Class>,
    /// Teacher roster.
    pub teachers: Vec<Teacher>,
    /// Rooms.
    pub rooms: Vec<Room>,
    /// Course records.
    pub courses: Vec<Course>,
    /// Working days and periods per day.
    pub constraints: Calendar,
    /// Optional GA parameter overrides.
    #[serde(default)]
    pub ga_params: Option<GaOverrides>,
    /// Optional seed; overrides the configured one.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Optional schedule name.
    #[serde(default)]
    pub name: Option<String>,
}

impl GenerateRequest {
    /// Creates a request without overrides.
    pub fn new(
        classes: Vec<Class>,
        teachers: Vec<Teacher>,
        rooms: Vec<Room>,
        courses: Vec<Course>,
        constraints: Calendar,
    ) -> Self {
        Self {
            classes,
            teachers,
            rooms,
            courses,
            constraints,
            ga_params: None,
            seed: None,
            name: None,
        }
    }

    /// Sets GA overrides.
    pub fn with_ga_params(mut self, params: GaOverrides) -> Self {
        self.ga_params = Some(params);
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the schedule name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One scheduled session with display names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSession {
    /// Day name.
    pub day: String,
    /// 1-based period.
    pub period: u32,
    /// Class ID.
    pub class_id: String,
    /// Class display name.
    pub class_name: String,
    /// Subject.
    pub subject_name: String,
    /// Teacher ID.
    pub teacher_id: String,
    /// Teacher display name.
    pub teacher_name: String,
    /// Room ID.
    pub room_id: String,
    /// Room display name.
    pub room_name: String,
}

/// The finalized timetable returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    /// Schedule name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Sessions, in schedule order.
    pub schedule: Vec<ScheduledSession>,
    /// Final fitness (≥ 1).
    pub fitness: f64,
    /// Violations remaining in the final schedule.
    pub violations: ViolationCounts,
    /// Requirements whose scheduled hours differ from the target.
    pub unmet_requirements: Vec<HourDeviation>,
    /// Generations the optimizer ran.
    pub generations: usize,
}

impl GenerateResult {
    /// Whether the timetable is free of double-bookings and availability
    /// violations.
    pub fn is_conflict_free(&self) -> bool {
        self.violations.is_feasible()
    }
}

/// Generates a timetable.
///
/// # Errors
///
/// Fails on empty entity lists, an invalid calendar, or invalid GA
/// parameters. Never fails because of a poor result.
pub fn generate(request: &GenerateRequest, config: &EngineConfig) -> Result<GenerateResult> {
    generate_with_cancel(request, config, None)
}

/// Generates a timetable, stopping early when `cancel` is set.
///
/// Cancellation is checked at generation boundaries; the best schedule so
/// far is refined and returned.
pub fn generate_with_cancel(
    request: &GenerateRequest,
    config: &EngineConfig,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<GenerateResult> {
    let calendar = &request.constraints;
    check_preconditions(
        &request.classes,
        &request.teachers,
        &request.rooms,
        &request.courses,
        calendar,
    )?;
    for issue in validate_input(
        &request.classes,
        &request.teachers,
        &request.rooms,
        &request.courses,
        calendar,
    ) {
        warn!(kind = ?issue.kind, "{}", issue.message);
    }

    let mut ga = config.ga.clone();
    if let Some(overrides) = &request.ga_params {
        ga = ga.with_overrides(overrides);
    }
    if let Some(seed) = request.seed {
        ga = ga.with_seed(seed);
    }
    ga.validate()?;

    info!(
        classes = request.classes.len(),
        teachers = request.teachers.len(),
        rooms = request.rooms.len(),
        courses = request.courses.len(),
        days = calendar.day_count(),
        periods = calendar.periods_per_day,
        "timetable generation start"
    );

    let problem = TimetableProblem::new(
        request.classes.clone(),
        request.teachers.clone(),
        request.rooms.clone(),
        request.courses.clone(),
        calendar.clone(),
    )
    .with_weights(config.weights)
    .with_validate_swaps(ga.validate_swaps);

    let result = GaRunner::run_with_cancel(&problem, &ga, cancel)?;
    let best = polish(result.best, &problem);

    let name = request
        .name
        .clone()
        .unwrap_or_else(|| format!("Timetable {}", Utc::now().format("%Y-%m-%d %H:%M")));
    let breakdown = problem.evaluator().breakdown(&best);

    info!(
        fitness = breakdown.score,
        sessions = best.len(),
        conflicts = breakdown.violations.hard_conflicts(),
        unmet = breakdown.deviations.len(),
        generations = result.generations,
        "timetable generation end"
    );

    Ok(GenerateResult {
        name,
        created_at: Utc::now(),
        schedule: resolve_names(&best, &problem),
        fitness: breakdown.score,
        violations: breakdown.violations,
        unmet_requirements: breakdown.deviations,
        generations: result.generations,
    })
}

/// Refines `best`, keeping the refined copy only if it scores no worse.
fn polish(best: Schedule, problem: &TimetableProblem) -> Schedule {
    let mut refined = best.clone();
    if refine(&mut refined, &problem.teachers, &problem.calendar) == 0 {
        return best;
    }
    let evaluator = problem.evaluator();
    refined.fitness = evaluator.evaluate(&refined);
    if refined.fitness >= best.fitness {
        refined
    } else {
        best
    }
}

fn resolve_names(schedule: &Schedule, problem: &TimetableProblem) -> Vec<ScheduledSession> {
    let classes: HashMap<&str, &str> = problem
        .classes
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    let teachers: HashMap<&str, &str> = problem
        .teachers
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();
    let rooms: HashMap<&str, &str> = problem
        .rooms
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect();
    let name_of = |map: &HashMap<&str, &str>, id: &str| {
        map.get(id).copied().unwrap_or_default().to_string()
    };

    schedule
        .slots
        .iter()
        .map(|s| ScheduledSession {
            day: problem.calendar.day_name(s.day).unwrap_or_default().to_string(),
            period: s.period,
            class_id: s.class_id.clone(),
            class_name: name_of(&classes, &s.class_id),
            subject_name: s.subject.clone(),
            teacher_id: s.teacher_id.clone(),
            teacher_name: name_of(&teachers, &s.teacher_id),
            room_id: s.room_id.clone(),
            room_name: name_of(&rooms, &s.room_id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;
    use crate::ga::GaConfig;
    use std::collections::HashSet;

    fn quick_config(seed: u64) -> EngineConfig {
        EngineConfig::default().with_ga(
            GaConfig::default()
                .with_population_size(30)
                .with_max_generations(40)
                .with_seed(seed),
        )
    }

    fn scenario() -> GenerateRequest {
        let cal = Calendar::new(["monday", "tuesday"], 2);
        GenerateRequest::new(
            vec![Class::new("10A").with_name("10A").with_subject("Math")],
            vec![Teacher::new("T1")
                .with_name("T1")
                .with_subject("Math")
                .with_full_availability(&cal)],
            vec![Room::new("R1").with_name("R1")],
            vec![Course::new("c-math", "Math", 2)],
            cal,
        )
    }

    #[test]
    fn test_two_slot_scenario() {
        let result = generate(&scenario(), &quick_config(42)).unwrap();

        assert_eq!(result.schedule.len(), 2);
        for s in &result.schedule {
            assert_eq!(s.class_id, "10A");
            assert_eq!(s.subject_name, "Math");
            assert_eq!(s.teacher_id, "T1");
            assert_eq!(s.room_id, "R1");
        }
        let times: HashSet<(&str, u32)> = result
            .schedule
            .iter()
            .map(|s| (s.day.as_str(), s.period))
            .collect();
        assert_eq!(times.len(), 2);
        assert!(result.fitness > 0.0);
        assert_eq!(result.violations.hard_conflicts(), 0);
        assert!(result.is_conflict_free());
        assert!(result.unmet_requirements.is_empty());
    }

    #[test]
    fn test_three_hour_requirement_converges() {
        let cal = Calendar::new(["monday", "tuesday", "wednesday"], 3);
        let request = GenerateRequest::new(
            vec![Class::new("10A").with_subject("Math")],
            vec![Teacher::new("T1").with_subject("Math").with_full_availability(&cal)],
            vec![Room::new("R1"), Room::new("R2"), Room::new("R3")],
            vec![Course::new("c-math", "Math", 3)],
            cal,
        );
        let result = generate(&request, &quick_config(7)).unwrap();

        let math = result
            .schedule
            .iter()
            .filter(|s| s.class_id == "10A" && s.subject_name == "Math")
            .count();
        assert_eq!(math, 3);
        assert_eq!(result.violations.teacher_conflicts, 0);
        assert_eq!(result.violations.room_conflicts, 0);
        assert_eq!(result.violations.class_conflicts, 0);
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let cal = Calendar::new(["monday", "tuesday", "wednesday"], 4);
        let request = GenerateRequest::new(
            vec![
                Class::new("10A").with_subject("Math").with_subject("Art"),
                Class::new("10B").with_subject("Math").with_subject("Music"),
            ],
            vec![
                Teacher::new("T1").with_subject("Math").with_full_availability(&cal),
                Teacher::new("T2")
                    .with_subject("Art")
                    .with_subject("Music")
                    .with_full_availability(&cal),
            ],
            vec![Room::new("R1"), Room::new("R2")],
            vec![
                Course::new("c1", "Math", 3),
                Course::new("c2", "Art", 2),
                Course::new("c3", "Music", 1),
            ],
            cal,
        )
        .with_name("fixed");

        let a = generate(&request, &quick_config(1234)).unwrap();
        let b = generate(&request, &quick_config(1234)).unwrap();
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.fitness, b.fitness);
        assert_eq!(a.name, "fixed");
    }

    #[test]
    fn test_request_seed_and_overrides() {
        let request = scenario()
            .with_seed(5)
            .with_ga_params(GaOverrides {
                population_size: Some(10),
                max_generations: Some(3),
                ..GaOverrides::default()
            });
        let result = generate(&request, &EngineConfig::default()).unwrap();
        assert_eq!(result.generations, 3);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let request = scenario().with_ga_params(GaOverrides {
            population_size: Some(2),
            elitism_count: Some(2),
            ..GaOverrides::default()
        });
        assert!(matches!(
            generate(&request, &EngineConfig::default()),
            Err(TimetableError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_lists_rejected() {
        let mut request = scenario();
        request.rooms.clear();
        assert!(matches!(
            generate(&request, &quick_config(1)),
            Err(TimetableError::NoRooms)
        ));

        let mut request = scenario();
        request.courses.clear();
        assert!(matches!(
            generate(&request, &quick_config(1)),
            Err(TimetableError::NoCourses)
        ));
    }

    #[test]
    fn test_unschedulable_subject_is_reported_not_fatal() {
        let mut request = scenario();
        request.classes[0] = request.classes[0].clone().with_subject("Latin");
        let result = generate(&request, &quick_config(3)).unwrap();

        assert!(result.schedule.iter().all(|s| s.subject_name == "Math"));
        assert_eq!(result.unmet_requirements.len(), 1);
        assert_eq!(result.unmet_requirements[0].subject, "Latin");
        assert_eq!(result.unmet_requirements[0].scheduled, 0);
    }

    #[test]
    fn test_cancelled_run_still_returns_schedule() {
        let cancel = Arc::new(AtomicBool::new(true));
        let result = generate_with_cancel(&scenario(), &quick_config(2), Some(cancel)).unwrap();
        assert_eq!(result.generations, 0);
        assert!(result.fitness >= 1.0);
    }

    #[test]
    fn test_request_json_contract() {
        let json = r#"{
            "classes": [{"id": "10A", "name": "10A", "subjects": ["Math"]}],
            "teachers": [{"id": "T1", "name": "Ada", "subjects": ["Math"],
                          "availability": {"monday": [true, true], "tuesday": [true, true]}}],
            "rooms": [{"id": "R1", "name": "Room 1", "capacity": 30}],
            "courses": [{"id": "c1", "name": "Math", "hoursPerWeek": 2}],
            "constraints": {"workingDays": ["monday", "tuesday"], "periodsPerDay": 2},
            "gaParams": {"populationSize": 20, "maxGenerations": 30},
            "seed": 9
        }"#;
        let request: GenerateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.constraints.periods_per_day, 2);
        assert_eq!(request.courses[0].hours_per_week, 2);

        let result = generate(&request, &EngineConfig::default()).unwrap();
        let out = serde_json::to_value(&result).unwrap();
        assert!(out.get("createdAt").is_some());
        assert!(out.get("fitness").is_some());
        let first = &out["schedule"][0];
        assert_eq!(first["teacherName"], "Ada");
        assert_eq!(first["roomName"], "Room 1");
        assert_eq!(first["className"], "10A");
        assert!(first["day"] == "monday" || first["day"] == "tuesday");
    }
}
