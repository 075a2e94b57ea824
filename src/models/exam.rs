//! Exam model.
//!
//! An exam is one written test for a (class, subject) pair. Its identity
//! is fixed at creation; only the placement changes. Placement changes
//! produce new records instead of mutating shared ones.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Weekday;

/// Default exam length in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 90;

/// A (week, weekday) pair: the atomic unit of placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Target week identifier.
    pub week_id: String,
    /// Target weekday.
    pub day: Weekday,
}

impl Slot {
    /// Creates a slot.
    pub fn new(week_id: impl Into<String>, day: Weekday) -> Self {
        Self {
            week_id: week_id.into(),
            day,
        }
    }
}

/// A written exam to be placed in the calendar.
///
/// Week and day are held together in one `Option<Slot>`, so an exam is
/// either fully assigned or fully unassigned. On the wire the placement is
/// the flat pair `assignedWeekId` / `assignedDay` (see [`ExamRecord`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExamRecord", into = "ExamRecord")]
pub struct Exam {
    /// Opaque, immutable identifier.
    pub id: String,
    /// Owning class (key into the timetables).
    pub class_name: String,
    /// Examined subject.
    pub subject: String,
    /// Exam length in minutes.
    pub duration_minutes: u32,
    /// Placement is user-locked.
    pub is_pinned: bool,
    /// Current placement, if any.
    pub slot: Option<Slot>,
}

/// Serialized form of an [`Exam`].
///
/// `assignedWeekId` and `assignedDay` must be both null or both set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: String,
    pub class_name: String,
    pub subject: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub assigned_week_id: Option<String>,
    #[serde(default)]
    pub assigned_day: Option<Weekday>,
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_MINUTES
}

/// An exam record with only one of week and day set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("exam {id}: assignedWeekId and assignedDay must be both set or both null")]
pub struct HalfAssignedExam {
    /// Id of the offending exam.
    pub id: String,
}

impl TryFrom<ExamRecord> for Exam {
    type Error = HalfAssignedExam;

    fn try_from(record: ExamRecord) -> Result<Self, Self::Error> {
        let slot = match (record.assigned_week_id, record.assigned_day) {
            (Some(week_id), Some(day)) => Some(Slot { week_id, day }),
            (None, None) => None,
            _ => return Err(HalfAssignedExam { id: record.id }),
        };
        Ok(Self {
            id: record.id,
            class_name: record.class_name,
            subject: record.subject,
            duration_minutes: record.duration_minutes,
            is_pinned: record.is_pinned,
            slot,
        })
    }
}

impl From<Exam> for ExamRecord {
    fn from(exam: Exam) -> Self {
        let (assigned_week_id, assigned_day) = match exam.slot {
            Some(Slot { week_id, day }) => (Some(week_id), Some(day)),
            None => (None, None),
        };
        Self {
            id: exam.id,
            class_name: exam.class_name,
            subject: exam.subject,
            duration_minutes: exam.duration_minutes,
            is_pinned: exam.is_pinned,
            assigned_week_id,
            assigned_day,
        }
    }
}

impl Exam {
    /// Creates an unassigned, unpinned exam with a fresh identifier.
    pub fn new(class_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), class_name, subject)
    }

    /// Creates an unassigned, unpinned exam with the given identifier.
    pub fn with_id(
        id: impl Into<String>,
        class_name: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            subject: subject.into(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            is_pinned: false,
            slot: None,
        }
    }

    /// Sets the duration.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Sets the pin flag.
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    /// Returns a copy placed at `slot`.
    pub fn placed_at(&self, slot: Slot) -> Self {
        Self {
            slot: Some(slot),
            ..self.clone()
        }
    }

    /// Returns a copy with no placement.
    pub fn unassigned(&self) -> Self {
        Self {
            slot: None,
            ..self.clone()
        }
    }

    /// Whether the exam has a placement.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.slot.is_some()
    }

    /// Assigned week, if any.
    pub fn week_id(&self) -> Option<&str> {
        self.slot.as_ref().map(|s| s.week_id.as_str())
    }

    /// Assigned weekday, if any.
    pub fn day(&self) -> Option<Weekday> {
        self.slot.as_ref().map(|s| s.day)
    }

    /// Whether the exam sits in `week_id` (on any day).
    pub fn is_in_week(&self, week_id: &str) -> bool {
        self.week_id() == Some(week_id)
    }

    /// Whether the exam occupies exactly `(week_id, day)`.
    pub fn occupies(&self, week_id: &str, day: Weekday) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|s| s.week_id == week_id && s.day == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_exam_defaults() {
        let e = Exam::new("10A", "Math");
        assert_eq!(e.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert!(!e.is_pinned);
        assert!(!e.is_assigned());
        assert_eq!(e.week_id(), None);
        assert_eq!(e.day(), None);
    }

    #[test]
    fn test_placed_at_keeps_identity() {
        let e = Exam::with_id("e1", "10A", "Math").pinned(true);
        let placed = e.placed_at(Slot::new("w1", Weekday::Tuesday));
        assert_eq!(placed.id, "e1");
        assert!(placed.is_pinned);
        assert_eq!(placed.week_id(), Some("w1"));
        assert_eq!(placed.day(), Some(Weekday::Tuesday));
        // The original record is untouched.
        assert!(!e.is_assigned());

        let cleared = placed.unassigned();
        assert!(!cleared.is_assigned());
        assert_eq!(cleared.id, "e1");
    }

    #[test]
    fn test_occupies() {
        let e = Exam::with_id("e1", "10A", "Math").placed_at(Slot::new("w1", Weekday::Friday));
        assert!(e.occupies("w1", Weekday::Friday));
        assert!(!e.occupies("w1", Weekday::Monday));
        assert!(!e.occupies("w2", Weekday::Friday));
        assert!(e.is_in_week("w1"));
    }

    #[test]
    fn test_serde_flat_placement_fields() {
        let json = r#"{
            "id": "e1",
            "className": "10A",
            "subject": "Math",
            "durationMinutes": 90,
            "isPinned": true,
            "assignedWeekId": "w1",
            "assignedDay": "Monday"
        }"#;
        let exam: Exam = serde_json::from_str(json).unwrap();
        assert!(exam.is_pinned);
        assert_eq!(exam.slot, Some(Slot::new("w1", Weekday::Monday)));

        let value = serde_json::to_value(&exam).unwrap();
        assert_eq!(value["assignedWeekId"], "w1");
        assert_eq!(value["assignedDay"], "Monday");
        assert!(value.get("slot").is_none());
        assert_eq!(serde_json::from_value::<Exam>(value).unwrap(), exam);
    }

    #[test]
    fn test_serde_unassigned_writes_nulls() {
        let exam = Exam::with_id("e2", "10B", "German");
        let value = serde_json::to_value(&exam).unwrap();
        assert!(value["assignedWeekId"].is_null());
        assert!(value["assignedDay"].is_null());

        let minimal = r#"{"id":"e3","className":"10B","subject":"Art"}"#;
        let parsed: Exam = serde_json::from_str(minimal).unwrap();
        assert!(!parsed.is_assigned());
        assert_eq!(parsed.duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_serde_rejects_half_assigned() {
        let week_only = r#"{"id":"e1","className":"10A","subject":"Math",
            "assignedWeekId":"w1","assignedDay":null}"#;
        let err = serde_json::from_str::<Exam>(week_only).unwrap_err();
        assert!(err.to_string().contains("both set or both null"));

        let day_only = r#"{"id":"e1","className":"10A","subject":"Math",
            "assignedDay":"Friday"}"#;
        assert!(serde_json::from_str::<Exam>(day_only).is_err());
    }
}
