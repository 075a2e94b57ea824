//! Slot legality checks shared by every placement path.
//!
//! # Check order
//! Checks short-circuit on the first failure. The order only decides
//! which reason is reported:
//!
//! 1. Day blocked globally
//! 2. Day blocked for the exam's class
//! 3. Subject not taught on the day (or the class has no timetable)
//! 4. Class already has `max_exams_per_week` other exams in the week
//! 5. Class already has another exam on that day of the week
//!
//! Live move feedback ([`validate_move`]), the greedy engine and the repair
//! engine all go through [`SlotEvaluator::check`], so they agree on what a
//! legal placement is.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BlockedClassDays, BlockedDays, ClassTimetable, Exam, Slot, Week, Weekday};

/// Maximum exams of one class in one week.
pub const MAX_EXAMS_PER_WEEK: usize = 2;

/// Why a placement is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The day is blocked for all classes.
    #[error("day blocked globally ({day}, week {week_id})")]
    BlockedGlobally { week_id: String, day: Weekday },
    /// The day is blocked for the exam's class.
    #[error("day blocked for class {class_name} ({day}, week {week_id})")]
    BlockedForClass {
        class_name: String,
        week_id: String,
        day: Weekday,
    },
    /// No timetable exists for the exam's class.
    #[error("class {class_name} has no timetable")]
    UnknownClass { class_name: String },
    /// The subject is not on the class timetable that day.
    #[error("{subject} is not taught on {day}")]
    SubjectNotTaught { subject: String, day: Weekday },
    /// The class already has the maximum number of exams that week.
    #[error("max {max} exams reached for week {week_id}")]
    WeekFull { week_id: String, max: usize },
    /// The class already writes another exam that day.
    #[error("another exam ({subject}) is already scheduled on {day}")]
    DayTaken { subject: String, day: Weekday },
}

/// Outcome of a move validation.
///
/// Advisory only: callers use it for feedback, it never aborts anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCheck {
    /// Whether the placement is legal.
    pub valid: bool,
    /// Human-readable reason when invalid.
    pub reason: Option<String>,
    /// Typed reason when invalid.
    pub rejection: Option<MoveRejection>,
}

impl MoveCheck {
    /// A legal placement.
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            rejection: None,
        }
    }

    /// An illegal placement.
    pub fn rejected(rejection: MoveRejection) -> Self {
        Self {
            valid: false,
            reason: Some(rejection.to_string()),
            rejection: Some(rejection),
        }
    }
}

impl From<Result<(), MoveRejection>> for MoveCheck {
    fn from(result: Result<(), MoveRejection>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(rejection) => Self::rejected(rejection),
        }
    }
}

/// Evaluates candidate slots against block lists, timetables, and the
/// placements made so far.
#[derive(Debug, Clone, Copy)]
pub struct SlotEvaluator<'a> {
    blocked_days: &'a BlockedDays,
    blocked_class_days: &'a BlockedClassDays,
    max_exams_per_week: usize,
}

impl<'a> SlotEvaluator<'a> {
    /// Creates an evaluator with the default weekly cap.
    pub fn new(blocked_days: &'a BlockedDays, blocked_class_days: &'a BlockedClassDays) -> Self {
        Self {
            blocked_days,
            blocked_class_days,
            max_exams_per_week: MAX_EXAMS_PER_WEEK,
        }
    }

    /// Sets the weekly cap.
    pub fn with_max_exams_per_week(mut self, max: usize) -> Self {
        self.max_exams_per_week = max;
        self
    }

    /// The weekly cap in effect.
    pub fn max_exams_per_week(&self) -> usize {
        self.max_exams_per_week
    }

    /// Checks whether `exam` may sit at `(week_id, day)` given `placed`.
    ///
    /// `placed` may contain `exam` itself (matched by id); it is never
    /// counted against its own placement.
    pub fn check(
        &self,
        exam: &Exam,
        week_id: &str,
        day: Weekday,
        placed: &[Exam],
        timetable: Option<&ClassTimetable>,
    ) -> Result<(), MoveRejection> {
        if self.blocked_days.is_blocked(week_id, day) {
            return Err(MoveRejection::BlockedGlobally {
                week_id: week_id.to_string(),
                day,
            });
        }

        if self
            .blocked_class_days
            .is_blocked(&exam.class_name, week_id, day)
        {
            return Err(MoveRejection::BlockedForClass {
                class_name: exam.class_name.clone(),
                week_id: week_id.to_string(),
                day,
            });
        }

        let Some(timetable) = timetable else {
            return Err(MoveRejection::UnknownClass {
                class_name: exam.class_name.clone(),
            });
        };
        if !timetable.teaches(&exam.subject, day) {
            return Err(MoveRejection::SubjectNotTaught {
                subject: exam.subject.clone(),
                day,
            });
        }

        let others_in_week: Vec<&Exam> = placed
            .iter()
            .filter(|e| e.id != exam.id && e.class_name == exam.class_name && e.is_in_week(week_id))
            .collect();

        if others_in_week.len() >= self.max_exams_per_week {
            return Err(MoveRejection::WeekFull {
                week_id: week_id.to_string(),
                max: self.max_exams_per_week,
            });
        }

        if let Some(other) = others_in_week.iter().find(|e| e.day() == Some(day)) {
            return Err(MoveRejection::DayTaken {
                subject: other.subject.clone(),
                day,
            });
        }

        Ok(())
    }

    /// Finds the first legal slot for `exam`.
    ///
    /// # Algorithm
    /// 1. Scan weeks in the given order, skipping blocked weeks.
    /// 2. Within a week, scan the five weekdays in a fresh random order.
    /// 3. A day failing a block, timetable, or collision check is skipped.
    /// 4. Hitting the weekly cap abandons the rest of that week.
    /// 5. The first passing day wins.
    ///
    /// Returns `None` when no slot passes (the exam stays unassigned).
    pub fn first_fit<R: Rng + ?Sized>(
        &self,
        exam: &Exam,
        weeks: &[Week],
        placed: &[Exam],
        timetable: Option<&ClassTimetable>,
        rng: &mut R,
    ) -> Option<Slot> {
        // Every day fails the timetable check without one.
        if timetable.is_none() {
            return None;
        }

        for week in weeks.iter().filter(|w| !w.is_blocked) {
            let mut days = Weekday::ALL;
            days.shuffle(rng);

            for day in days {
                match self.check(exam, &week.id, day, placed, timetable) {
                    Ok(()) => return Some(Slot::new(week.id.clone(), day)),
                    Err(MoveRejection::WeekFull { .. }) => break,
                    Err(_) => continue,
                }
            }
        }

        None
    }
}

/// Validates moving `exam` to `(target_week_id, target_day)`.
///
/// `all_exams` is the current plan (it may include `exam`). `timetable`
/// is the exam's class timetable; `None` makes every target invalid.
/// Uses the default cap of [`MAX_EXAMS_PER_WEEK`].
///
/// # Example
/// ```
/// use exam_planner::models::{BlockedClassDays, BlockedDays, ClassTimetable, Exam, Weekday};
/// use exam_planner::scheduler::validate_move;
///
/// let tt = ClassTimetable::new("10A").with_subject(Weekday::Monday, "Math");
/// let exam = Exam::new("10A", "Math");
/// let check = validate_move(
///     &exam, "w1", Weekday::Tuesday, &[], Some(&tt),
///     &BlockedDays::new(), &BlockedClassDays::new(),
/// );
/// assert!(!check.valid);
/// assert_eq!(check.reason.as_deref(), Some("Math is not taught on Tuesday"));
/// ```
pub fn validate_move(
    exam: &Exam,
    target_week_id: &str,
    target_day: Weekday,
    all_exams: &[Exam],
    timetable: Option<&ClassTimetable>,
    blocked_days: &BlockedDays,
    blocked_class_days: &BlockedClassDays,
) -> MoveCheck {
    SlotEvaluator::new(blocked_days, blocked_class_days)
        .check(exam, target_week_id, target_day, all_exams, timetable)
        .into()
}
