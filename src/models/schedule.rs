//! Schedule (solution) model.
//!
//! A schedule is an ordered list of assignment slots. Slot order carries no
//! meaning but is kept stable so crossover is reproducible. Each schedule
//! owns its slots outright; cloning is a deep copy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One taught session: a class learning a subject from a teacher in a room
/// at a day/period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSlot {
    /// Day index into [`Calendar::working_days`](super::Calendar::working_days).
    pub day: usize,
    /// 1-based period.
    pub period: u32,
    /// Class being taught.
    pub class_id: String,
    /// Subject taught.
    pub subject: String,
    /// Teacher teaching.
    pub teacher_id: String,
    /// Room used.
    pub room_id: String,
}

impl AssignmentSlot {
    /// Creates a slot.
    pub fn new(
        day: usize,
        period: u32,
        class_id: impl Into<String>,
        subject: impl Into<String>,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            day,
            period,
            class_id: class_id.into(),
            subject: subject.into(),
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
        }
    }

    /// Whether both slots occupy the same day and period.
    #[inline]
    pub fn same_time(&self, other: &Self) -> bool {
        self.day == other.day && self.period == other.period
    }

    /// Whether both slots share a teacher, room, or class.
    #[inline]
    pub fn shares_resource(&self, other: &Self) -> bool {
        self.teacher_id == other.teacher_id
            || self.room_id == other.room_id
            || self.class_id == other.class_id
    }

    /// Whether the two slots double-book anything.
    #[inline]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.same_time(other) && self.shares_resource(other)
    }
}

/// A candidate or final timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Human-readable name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Assignment slots.
    pub slots: Vec<AssignmentSlot>,
    /// Cached fitness (0.0 until evaluated; evaluated scores are ≥ 1).
    pub fitness: f64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new("")
    }
}

impl Schedule {
    /// Creates an empty, unevaluated schedule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now(),
            slots: Vec::new(),
            fitness: 0.0,
        }
    }

    /// Creates an unevaluated schedule from slots.
    pub fn from_slots(name: impl Into<String>, slots: Vec<AssignmentSlot>) -> Self {
        Self {
            slots,
            ..Self::new(name)
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the schedule has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Appends a slot.
    pub fn push(&mut self, slot: AssignmentSlot) {
        self.slots.push(slot);
    }

    /// Whether `candidate` would double-book against any existing slot,
    /// ignoring the slot at index `skip`.
    pub fn has_conflict(&self, candidate: &AssignmentSlot, skip: Option<usize>) -> bool {
        self.slots
            .iter()
            .enumerate()
            .any(|(i, s)| Some(i) != skip && s.conflicts_with(candidate))
    }

    /// Number of slots for a class/subject pair.
    pub fn count_for(&self, class_id: &str, subject: &str) -> usize {
        self.slots
            .iter()
            .filter(|s| s.class_id == class_id && s.subject == subject)
            .count()
    }

    /// Slots taught by `teacher_id`.
    pub fn slots_for_teacher<'a>(
        &'a self,
        teacher_id: &'a str,
    ) -> impl Iterator<Item = &'a AssignmentSlot> + 'a {
        self.slots.iter().filter(move |s| s.teacher_id == teacher_id)
    }

    /// Slots attended by `class_id`.
    pub fn slots_for_class<'a>(
        &'a self,
        class_id: &'a str,
    ) -> impl Iterator<Item = &'a AssignmentSlot> + 'a {
        self.slots.iter().filter(move |s| s.class_id == class_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: usize, period: u32, class: &str, teacher: &str, room: &str) -> AssignmentSlot {
        AssignmentSlot::new(day, period, class, "Math", teacher, room)
    }

    #[test]
    fn test_conflicts_require_same_time() {
        let a = slot(0, 1, "C1", "T1", "R1");
        let b = slot(0, 2, "C1", "T1", "R1");
        assert!(!a.conflicts_with(&b));
        let c = slot(0, 1, "C2", "T2", "R1");
        assert!(a.conflicts_with(&c));
        let d = slot(0, 1, "C2", "T2", "R2");
        assert!(!a.conflicts_with(&d));
    }

    #[test]
    fn test_has_conflict_skips_index() {
        let mut s = Schedule::new("test");
        s.push(slot(0, 1, "C1", "T1", "R1"));
        let same = slot(0, 1, "C1", "T1", "R1");
        assert!(s.has_conflict(&same, None));
        assert!(!s.has_conflict(&same, Some(0)));
    }

    #[test]
    fn test_count_for() {
        let mut s = Schedule::new("test");
        s.push(slot(0, 1, "C1", "T1", "R1"));
        s.push(slot(1, 1, "C1", "T1", "R1"));
        s.push(slot(1, 2, "C2", "T1", "R1"));
        assert_eq!(s.count_for("C1", "Math"), 2);
        assert_eq!(s.count_for("C2", "Math"), 1);
        assert_eq!(s.count_for("C1", "Art"), 0);
        assert_eq!(s.slots_for_teacher("T1").count(), 3);
        assert_eq!(s.slots_for_class("C2").count(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Schedule::new("a");
        a.push(slot(0, 1, "C1", "T1", "R1"));
        let mut b = a.clone();
        b.slots[0].period = 5;
        assert_eq!(a.slots[0].period, 1);
    }

    #[test]
    fn test_serialize_camel_case() {
        let s = slot(0, 1, "C1", "T1", "R1");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"classId\":\"C1\""));
        assert!(json.contains("\"teacherId\":\"T1\""));
    }
}
