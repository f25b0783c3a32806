//! Read-only input entities: classes, teachers, rooms, and courses.
//!
//! These are loaded once per generation request and never mutated by the
//! engine.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Calendar;

/// A class (student group) and the subjects it must be taught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Unique class identifier.
    pub id: String,
    /// Display name (e.g., "10A").
    #[serde(default)]
    pub name: String,
    /// Required subject names, in order. Duplicates are ignored.
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Home room. Advisory only; the scheduler does not bind to it.
    #[serde(default)]
    pub home_room: Option<String>,
}

impl Class {
    /// Creates a class with no subjects.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: Vec::new(),
            home_room: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a required subject (no-op if already present).
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        if !self.subjects.contains(&subject) {
            self.subjects.push(subject);
        }
        self
    }

    /// Sets the advisory home room.
    pub fn with_home_room(mut self, room_id: impl Into<String>) -> Self {
        self.home_room = Some(room_id.into());
        self
    }

    /// Required subjects with duplicates removed, first occurrence wins.
    pub fn unique_subjects(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.subjects
            .iter()
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

/// A teacher, their qualifications, and weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Subject names this teacher is qualified to teach.
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    /// Day name → per-period availability (`true` = available).
    ///
    /// Index `p - 1` holds period `p`. A missing day, or a period beyond
    /// the end of the list, means unavailable.
    #[serde(default)]
    pub availability: BTreeMap<String, Vec<bool>>,
}

impl Teacher {
    /// Creates a teacher with no qualifications and no availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            subjects: BTreeSet::new(),
            availability: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a subject qualification.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.insert(subject.into());
        self
    }

    /// Sets availability for one day.
    pub fn with_day_availability(mut self, day: impl Into<String>, periods: Vec<bool>) -> Self {
        self.availability.insert(day.into(), periods);
        self
    }

    /// Marks every period of every working day of `calendar` available.
    pub fn with_full_availability(mut self, calendar: &Calendar) -> Self {
        for day in &calendar.working_days {
            self.availability
                .insert(day.clone(), vec![true; calendar.periods_per_day as usize]);
        }
        self
    }

    /// Whether this teacher may teach `subject`.
    pub fn is_qualified(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    /// Whether this teacher is available on `day` at 1-based `period`.
    pub fn is_available(&self, day: &str, period: u32) -> bool {
        if period == 0 {
            return false;
        }
        self.availability
            .get(day)
            .and_then(|periods| periods.get(period as usize - 1))
            .copied()
            .unwrap_or(false)
    }
}

/// A room. Capacity and features are carried but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seating capacity.
    #[serde(default)]
    pub capacity: u32,
    /// Feature flags (e.g., "projector" → true).
    #[serde(default)]
    pub features: BTreeMap<String, bool>,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity: 0,
            features: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets a feature flag.
    pub fn with_feature(mut self, feature: impl Into<String>, present: bool) -> Self {
        self.features.insert(feature.into(), present);
        self
    }
}

/// Links a subject name to its weekly session count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Subject name, matched against `Class::subjects` and `Teacher::subjects`.
    pub name: String,
    /// Sessions required per week (at least 1).
    #[serde(default = "default_hours")]
    pub hours_per_week: u32,
}

fn default_hours() -> u32 {
    1
}

impl Course {
    /// Creates a course. `hours_per_week` is raised to 1 if zero.
    pub fn new(id: impl Into<String>, name: impl Into<String>, hours_per_week: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hours_per_week: hours_per_week.max(1),
        }
    }
}
