//! Input diagnostics for timetable requests.
//!
//! Two tiers:
//! - [`check_preconditions`]: fatal. Empty entity lists or an unusable
//!   calendar are rejected before the engine runs.
//! - [`validate_input`]: advisory. Reports data the engine will tolerate
//!   but that usually means a data-entry mistake:
//!   - Duplicate IDs
//!   - Class subjects with no course record (defaulted to 1 hour)
//!   - Class subjects no teacher is qualified for (left unscheduled)
//!   - Teacher availability for days outside the calendar, or with the
//!     wrong number of periods
//!   - Home rooms that do not exist

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, TimetableError};
use crate::models::{Calendar, Class, Course, Room, Teacher};

/// A non-fatal input problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Issue category.
    pub kind: ValidationIssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of input issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationIssueKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A class subject has no course record.
    MissingCourse,
    /// No teacher is qualified for a class subject.
    NoQualifiedTeacher,
    /// A teacher's availability grid does not match the calendar.
    AvailabilityMismatch,
    /// A class references a home room that does not exist.
    UnknownHomeRoom,
}

impl ValidationIssue {
    fn new(kind: ValidationIssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Rejects requests the engine cannot run on.
pub fn check_preconditions(
    classes: &[Class],
    teachers: &[Teacher],
    rooms: &[Room],
    courses: &[Course],
    calendar: &Calendar,
) -> Result<()> {
    if classes.is_empty() {
        return Err(TimetableError::NoClasses);
    }
    if teachers.is_empty() {
        return Err(TimetableError::NoTeachers);
    }
    if rooms.is_empty() {
        return Err(TimetableError::NoRooms);
    }
    if courses.is_empty() {
        return Err(TimetableError::NoCourses);
    }
    calendar.validate()
}

/// Collects every advisory issue in the input.
pub fn validate_input(
    classes: &[Class],
    teachers: &[Teacher],
    rooms: &[Room],
    courses: &[Course],
    calendar: &Calendar,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    duplicate_ids("class", classes.iter().map(|c| c.id.as_str()), &mut issues);
    duplicate_ids("teacher", teachers.iter().map(|t| t.id.as_str()), &mut issues);
    duplicate_ids("room", rooms.iter().map(|r| r.id.as_str()), &mut issues);
    duplicate_ids("course", courses.iter().map(|c| c.id.as_str()), &mut issues);

    let course_names: HashSet<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    let room_ids: HashSet<&str> = rooms.iter().map(|r| r.id.as_str()).collect();

    for class in classes {
        for subject in class.unique_subjects() {
            if !course_names.contains(subject) {
                issues.push(ValidationIssue::new(
                    ValidationIssueKind::MissingCourse,
                    format!(
                        "Class '{}' subject '{subject}' has no course; defaulting to 1 hour",
                        class.id
                    ),
                ));
            }
            if !teachers.iter().any(|t| t.is_qualified(subject)) {
                issues.push(ValidationIssue::new(
                    ValidationIssueKind::NoQualifiedTeacher,
                    format!(
                        "Class '{}' subject '{subject}' has no qualified teacher",
                        class.id
                    ),
                ));
            }
        }
        if let Some(home) = &class.home_room {
            if !room_ids.contains(home.as_str()) {
                issues.push(ValidationIssue::new(
                    ValidationIssueKind::UnknownHomeRoom,
                    format!("Class '{}' home room '{home}' does not exist", class.id),
                ));
            }
        }
    }

    for teacher in teachers {
        for (day, periods) in &teacher.availability {
            if calendar.day_index(day).is_none() {
                issues.push(ValidationIssue::new(
                    ValidationIssueKind::AvailabilityMismatch,
                    format!(
                        "Teacher '{}' has availability for non-working day '{day}'",
                        teacher.id
                    ),
                ));
            } else if periods.len() != calendar.periods_per_day as usize {
                issues.push(ValidationIssue::new(
                    ValidationIssueKind::AvailabilityMismatch,
                    format!(
                        "Teacher '{}' lists {} periods on '{day}', calendar has {}",
                        teacher.id,
                        periods.len(),
                        calendar.periods_per_day
                    ),
                ));
            }
        }
    }

    issues
}

fn duplicate_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ValidationIssue::new(
                ValidationIssueKind::DuplicateId,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
}
