//! Weekly calendar: working days and periods per day.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// The grid of teaching slots in a week.
///
/// Inside the engine a day is referred to by its index into
/// `working_days`; periods are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    /// Working day names in week order (e.g., "monday" … "friday").
    pub working_days: Vec<String>,
    /// Periods per working day.
    pub periods_per_day: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(["monday", "tuesday", "wednesday", "thursday", "friday"], 8)
    }
}

impl Calendar {
    /// Creates a calendar.
    pub fn new<I, S>(working_days: I, periods_per_day: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            working_days: working_days.into_iter().map(Into::into).collect(),
            periods_per_day,
        }
    }

    /// Number of working days.
    pub fn day_count(&self) -> usize {
        self.working_days.len()
    }

    /// Name of the day at `index`.
    pub fn day_name(&self, index: usize) -> Option<&str> {
        self.working_days.get(index).map(String::as_str)
    }

    /// Index of the day named `name`.
    pub fn day_index(&self, name: &str) -> Option<usize> {
        self.working_days.iter().position(|d| d == name)
    }

    /// Total teaching slots per week.
    pub fn slot_count(&self) -> usize {
        self.day_count() * self.periods_per_day as usize
    }

    /// Rejects calendars with no days, no periods, or repeated day names.
    pub fn validate(&self) -> Result<()> {
        if self.working_days.is_empty() {
            return Err(TimetableError::InvalidCalendar(
                "at least one working day is required".into(),
            ));
        }
        if self.periods_per_day == 0 {
            return Err(TimetableError::InvalidCalendar(
                "periods_per_day must be at least 1".into(),
            ));
        }
        for (i, day) in self.working_days.iter().enumerate() {
            if self.working_days[..i].contains(day) {
                return Err(TimetableError::InvalidCalendar(format!(
                    "working day '{day}' listed twice"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_five_days() {
        let cal = Calendar::default();
        assert_eq!(cal.day_count(), 5);
        assert_eq!(cal.slot_count(), 40);
        assert!(cal.validate().is_ok());
    }

    #[test]
    fn test_day_lookup() {
        let cal = Calendar::new(["monday", "tuesday"], 2);
        assert_eq!(cal.day_index("tuesday"), Some(1));
        assert_eq!(cal.day_name(0), Some("monday"));
        assert_eq!(cal.day_name(2), None);
        assert_eq!(cal.day_index("sunday"), None);
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(Calendar::new(Vec::<String>::new(), 4).validate().is_err());
        assert!(Calendar::new(["monday"], 0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_day() {
        let err = Calendar::new(["monday", "monday"], 4).validate().unwrap_err();
        assert!(err.to_string().contains("monday"));
    }
}
