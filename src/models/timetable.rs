//! Per-class weekly teaching timetable.
//!
//! A subject listed on a weekday means an exam for that subject may be
//! written on that day. The optional B variant describes alternating
//! weeks; placement consults only the primary variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Weekday;

/// Subjects taught per weekday.
pub type WeeklySubjects = BTreeMap<Weekday, Vec<String>>;

/// Weekly timetable of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTimetable {
    /// Class name (unique key).
    pub class_name: String,
    /// Primary (week A) timetable.
    #[serde(rename = "subjects", default)]
    pub weekly_subjects: WeeklySubjects,
    /// Alternate (week B) timetable, if the class alternates.
    #[serde(rename = "subjectsB", default, skip_serializing_if = "Option::is_none")]
    pub weekly_subjects_b: Option<WeeklySubjects>,
}

impl ClassTimetable {
    /// Creates an empty timetable for a class.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            weekly_subjects: BTreeMap::new(),
            weekly_subjects_b: None,
        }
    }

    /// Adds a subject to the primary timetable on `day`.
    ///
    /// Duplicates on the same day are ignored.
    pub fn with_subject(mut self, day: Weekday, subject: impl Into<String>) -> Self {
        push_unique(self.weekly_subjects.entry(day).or_default(), subject.into());
        self
    }

    /// Adds a subject to the alternate timetable on `day`.
    pub fn with_subject_b(mut self, day: Weekday, subject: impl Into<String>) -> Self {
        let variant = self.weekly_subjects_b.get_or_insert_with(BTreeMap::new);
        push_unique(variant.entry(day).or_default(), subject.into());
        self
    }

    /// Whether `subject` is taught on `day` in the primary timetable.
    pub fn teaches(&self, subject: &str, day: Weekday) -> bool {
        self.weekly_subjects
            .get(&day)
            .is_some_and(|subjects| subjects.iter().any(|s| s == subject))
    }

    /// Subjects taught on `day` in the primary timetable.
    pub fn subjects_on(&self, day: Weekday) -> &[String] {
        self.weekly_subjects
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All distinct subjects of the primary timetable, in order of first
    /// appearance from Monday to Friday.
    pub fn unique_subjects(&self) -> Vec<String> {
        let mut unique: Vec<String> = Vec::new();
        for subjects in self.weekly_subjects.values() {
            for subject in subjects {
                push_unique(&mut unique, subject.clone());
            }
        }
        unique
    }

    /// Whether an alternate week variant is defined.
    pub fn has_alternate_week(&self) -> bool {
        self.weekly_subjects_b
            .as_ref()
            .is_some_and(|b| b.values().any(|s| !s.is_empty()))
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}
