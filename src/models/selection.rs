//! Subjects selected for examination, per class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ClassTimetable;

/// Ordered subject selection per class: class → subjects.
///
/// Order matters: the greedy engine creates and places exams in the order
/// subjects appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectSelection {
    classes: BTreeMap<String, Vec<String>>,
}

impl SubjectSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: selects `subjects` for `class_name`, replacing any previous list.
    pub fn with_subjects<I, S>(mut self, class_name: impl Into<String>, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(class_name, subjects.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the selection of `class_name`.
    pub fn set(&mut self, class_name: impl Into<String>, subjects: Vec<String>) {
        self.classes.insert(class_name.into(), subjects);
    }

    /// Selected subjects of `class_name` (empty if none).
    pub fn subjects_for(&self, class_name: &str) -> &[String] {
        self.classes
            .get(class_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `subject` is selected for `class_name`.
    pub fn is_selected(&self, class_name: &str, subject: &str) -> bool {
        self.subjects_for(class_name).iter().any(|s| s == subject)
    }

    /// Adds or removes `subject`. Returns `true` if it is now selected.
    pub fn toggle_subject(&mut self, class_name: &str, subject: &str) -> bool {
        let list = self.classes.entry(class_name.to_string()).or_default();
        if let Some(pos) = list.iter().position(|s| s == subject) {
            list.remove(pos);
            false
        } else {
            list.push(subject.to_string());
            true
        }
    }

    /// Selects every subject of the class's primary timetable.
    pub fn select_all(&mut self, timetable: &ClassTimetable) {
        self.set(timetable.class_name.clone(), timetable.unique_subjects());
    }

    /// Clears the selection of `class_name`.
    pub fn clear(&mut self, class_name: &str) {
        self.classes.insert(class_name.to_string(), Vec::new());
    }

    /// Selects all subjects if not all are selected, otherwise clears.
    pub fn toggle_all(&mut self, timetable: &ClassTimetable) {
        let all = timetable.unique_subjects();
        let current = self.subjects_for(&timetable.class_name);
        let everything_selected = all.iter().all(|s| current.contains(s));
        if everything_selected && !all.is_empty() {
            self.clear(&timetable.class_name);
        } else {
            self.set(timetable.class_name.clone(), all);
        }
    }
}
