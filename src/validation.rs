//! Input validation and plan auditing.
//!
//! [`validate_input`] checks structural integrity of the host's data
//! before planning. Detects:
//! - Duplicate class names, week ids and exam ids
//! - Exams referencing unknown classes
//! - Exams placed in unknown weeks
//!
//! [`audit_plan`] checks a finished plan against the placement rules.
//! Pinned exams are forced placements: they are exempt from the timetable
//! and block checks, but still count toward weekly load and collisions.

use std::collections::{HashMap, HashSet};

use crate::models::{BlockedClassDays, BlockedDays, ClassTimetable, Exam, Week, Weekday};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same key.
    DuplicateId,
    /// An exam references a class without timetable.
    UnknownClass,
    /// An exam is placed in a week that is not in the calendar.
    UnknownWeek,
    /// An exam is placed on a day its subject is not taught.
    SubjectNotTaught,
    /// An exam is placed on a blocked day or in a blocked week.
    BlockedSlot,
    /// A class has more exams in a week than allowed.
    WeekOverCapacity,
    /// A class has two exams on the same day.
    DayCollision,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the host data for a planning run.
///
/// Checks:
/// 1. No duplicate class names
/// 2. No duplicate week ids
/// 3. No duplicate exam ids
/// 4. Every exam's class has a timetable
/// 5. Every placed exam's week exists
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    timetables: &[ClassTimetable],
    weeks: &[Week],
    exams: &[Exam],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut class_names = HashSet::new();
    for t in timetables {
        if !class_names.insert(t.class_name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class name: {}", t.class_name),
            ));
        }
    }

    let mut week_ids = HashSet::new();
    for w in weeks {
        if !week_ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate week ID: {}", w.id),
            ));
        }
    }

    let mut exam_ids = HashSet::new();
    for exam in exams {
        if !exam_ids.insert(exam.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate exam ID: {}", exam.id),
            ));
        }

        if !class_names.contains(exam.class_name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownClass,
                format!(
                    "Exam '{}' references unknown class '{}'",
                    exam.id, exam.class_name
                ),
            ));
        }

        if let Some(week_id) = exam.week_id() {
            if !week_ids.contains(week_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownWeek,
                    format!("Exam '{}' is placed in unknown week '{week_id}'", exam.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Audits a plan against the placement rules.
///
/// Reports, per exam or per (class, week):
/// - Unpinned exams on a day their subject is not taught
/// - Unpinned exams on blocked days or in blocked weeks
/// - Classes over `max_per_week` exams in a week
/// - Classes with two exams on the same day
///
/// An empty result means the plan is consistent.
pub fn audit_plan(
    exams: &[Exam],
    timetables: &[ClassTimetable],
    weeks: &[Week],
    blocked_days: &BlockedDays,
    blocked_class_days: &BlockedClassDays,
    max_per_week: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut week_load: HashMap<(&str, &str), usize> = HashMap::new();
    let mut day_load: HashMap<(&str, &str, Weekday), usize> = HashMap::new();

    for exam in exams {
        let Some(slot) = &exam.slot else {
            continue;
        };
        *week_load
            .entry((exam.class_name.as_str(), slot.week_id.as_str()))
            .or_insert(0) += 1;
        *day_load
            .entry((exam.class_name.as_str(), slot.week_id.as_str(), slot.day))
            .or_insert(0) += 1;

        if exam.is_pinned {
            continue;
        }

        let taught = timetables
            .iter()
            .find(|t| t.class_name == exam.class_name)
            .is_some_and(|t| t.teaches(&exam.subject, slot.day));
        if !taught {
            errors.push(ValidationError::new(
                ValidationErrorKind::SubjectNotTaught,
                format!(
                    "Exam '{}': {} is not taught on {} for class {}",
                    exam.id, exam.subject, slot.day, exam.class_name
                ),
            ));
        }

        let week_blocked = weeks
            .iter()
            .any(|w| w.id == slot.week_id && w.is_blocked);
        if week_blocked
            || blocked_days.is_blocked(&slot.week_id, slot.day)
            || blocked_class_days.is_blocked(&exam.class_name, &slot.week_id, slot.day)
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlockedSlot,
                format!(
                    "Exam '{}' is placed on blocked {} of week '{}'",
                    exam.id, slot.day, slot.week_id
                ),
            ));
        }
    }

    let mut over: Vec<_> = week_load
        .into_iter()
        .filter(|&(_, n)| n > max_per_week)
        .collect();
    over.sort();
    for ((class_name, week_id), n) in over {
        errors.push(ValidationError::new(
            ValidationErrorKind::WeekOverCapacity,
            format!("Class {class_name} has {n} exams in week '{week_id}' (max {max_per_week})"),
        ));
    }

    let mut collisions: Vec<_> = day_load.into_iter().filter(|&(_, n)| n > 1).collect();
    collisions.sort();
    for ((class_name, week_id, day), n) in collisions {
        errors.push(ValidationError::new(
            ValidationErrorKind::DayCollision,
            format!("Class {class_name} has {n} exams on {day} of week '{week_id}'"),
        ));
    }

    errors
}
