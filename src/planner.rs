//! Host-facing plan state.
//!
//! [`ExamPlan`] bundles the calendar model, the block lists, the subject
//! selection and the current exams, and exposes the edits an interactive
//! planner makes: importing timetables, toggling blocks and pins, manual
//! moves, fresh distribution and repair.
//!
//! Manual moves are always applied. The returned [`MoveCheck`] is feedback
//! for the user (e.g. to highlight a conflicting cell), not a veto, and a
//! pinned exam keeps its pin at the new location.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlannerError, Result};
use crate::models::{
    BlockedClassDays, BlockedDays, ClassTimetable, Exam, Slot, SubjectSelection, Week, WeekType,
    Weekday,
};
use crate::scheduler::{ExamScheduler, MoveCheck, PlacementContext, PlanKpi};

/// The complete editable state of an exam plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamPlan {
    /// Class timetables.
    pub classes: Vec<ClassTimetable>,
    /// Planning calendar, in chronological order.
    pub weeks: Vec<Week>,
    /// Current exams.
    pub exams: Vec<Exam>,
    /// Days blocked for all classes.
    #[serde(default)]
    pub blocked_days: BlockedDays,
    /// Days blocked per class.
    #[serde(default)]
    pub blocked_class_days: BlockedClassDays,
    /// Subjects to examine, per class.
    #[serde(default)]
    pub selected_subjects: SubjectSelection,
}

impl ExamPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan over the given calendar.
    pub fn with_weeks(weeks: Vec<Week>) -> Self {
        Self {
            weeks,
            ..Self::default()
        }
    }

    /// Placement input borrowed from this plan.
    pub fn context(&self) -> PlacementContext<'_> {
        PlacementContext::new(
            &self.classes,
            &self.weeks,
            &self.blocked_days,
            &self.blocked_class_days,
        )
    }

    /// Imports timetables.
    ///
    /// A timetable replaces the one with the same class name, otherwise it
    /// is appended. Each imported class gets all its subjects selected.
    pub fn import_timetables(&mut self, timetables: Vec<ClassTimetable>) {
        for timetable in timetables {
            self.selected_subjects.select_all(&timetable);
            match self
                .classes
                .iter_mut()
                .find(|c| c.class_name == timetable.class_name)
            {
                Some(existing) => *existing = timetable,
                None => self.classes.push(timetable),
            }
        }
        info!(event = "timetables_imported", classes = self.classes.len());
    }

    /// Replaces the timetable of an existing class.
    ///
    /// The subject selection is kept as is.
    pub fn update_timetable(&mut self, timetable: ClassTimetable) -> Result<()> {
        let existing = self
            .classes
            .iter_mut()
            .find(|c| c.class_name == timetable.class_name)
            .ok_or_else(|| PlannerError::UnknownClass(timetable.class_name.clone()))?;
        *existing = timetable;
        Ok(())
    }

    /// Replaces the calendar.
    ///
    /// Exams keep their placements; placements in weeks that no longer
    /// exist are reported by `validate_input` and fixed by `auto_fix`.
    pub fn set_weeks(&mut self, weeks: Vec<Week>) {
        self.weeks = weeks;
    }

    /// Blocks or unblocks a whole week. Returns the new state.
    pub fn toggle_week_blocked(&mut self, week_id: &str) -> Result<bool> {
        let week = self.week_mut(week_id)?;
        week.is_blocked = !week.is_blocked;
        Ok(week.is_blocked)
    }

    /// Sets the timetable variant of a week.
    pub fn set_week_type(&mut self, week_id: &str, week_type: WeekType) -> Result<()> {
        self.week_mut(week_id)?.week_type = week_type;
        Ok(())
    }

    /// Blocks or unblocks a day for all classes. Returns the new state.
    pub fn toggle_blocked_day(&mut self, week_id: &str, day: Weekday) -> bool {
        self.blocked_days.toggle(week_id, day)
    }

    /// Blocks or unblocks a day for one class. Returns the new state.
    pub fn toggle_blocked_class_day(
        &mut self,
        class_name: &str,
        week_id: &str,
        day: Weekday,
    ) -> bool {
        self.blocked_class_days.toggle(class_name, week_id, day)
    }

    /// Replaces all exams with a fresh greedy distribution.
    ///
    /// Previous placements and pins are discarded.
    pub fn distribute<R: Rng + ?Sized>(&mut self, scheduler: &ExamScheduler, rng: &mut R) {
        let exams = scheduler.distribute(&self.context(), &self.selected_subjects, rng);
        self.exams = exams;
    }

    /// Re-places all unpinned exams around the pinned ones.
    pub fn auto_fix<R: Rng + ?Sized>(&mut self, scheduler: &ExamScheduler, rng: &mut R) {
        let exams = scheduler.auto_fix(&self.exams, &self.context(), rng);
        self.exams = exams;
    }

    /// Moves an exam to `target`, or unassigns it when `target` is `None`.
    ///
    /// The move is applied even when the returned check is invalid.
    /// `scheduler` supplies the weekly cap used for the check.
    pub fn move_exam(
        &mut self,
        scheduler: &ExamScheduler,
        exam_id: &str,
        target: Option<Slot>,
    ) -> Result<MoveCheck> {
        if let Some(slot) = &target {
            if !self.weeks.iter().any(|w| w.id == slot.week_id) {
                return Err(PlannerError::UnknownWeek(slot.week_id.clone()));
            }
        }

        let idx = self.exam_index(exam_id)?;
        let check = match &target {
            Some(slot) => self.check_at(scheduler, &self.exams[idx], slot),
            None => MoveCheck::ok(),
        };

        let moved = match target {
            Some(slot) => self.exams[idx].placed_at(slot),
            None => self.exams[idx].unassigned(),
        };
        debug!(
            exam = %exam_id,
            pinned = moved.is_pinned,
            valid = check.valid,
            "exam moved"
        );
        self.exams[idx] = moved;

        Ok(check)
    }

    /// Flips the pin of an exam. Returns the new state.
    pub fn toggle_pin(&mut self, exam_id: &str) -> Result<bool> {
        let idx = self.exam_index(exam_id)?;
        let exam = &mut self.exams[idx];
        exam.is_pinned = !exam.is_pinned;
        Ok(exam.is_pinned)
    }

    /// Validates an exam at its current placement.
    ///
    /// Unassigned exams are always valid.
    pub fn check_exam(&self, scheduler: &ExamScheduler, exam_id: &str) -> Result<MoveCheck> {
        let exam = &self.exams[self.exam_index(exam_id)?];
        Ok(match &exam.slot {
            Some(slot) => self.check_at(scheduler, exam, slot),
            None => MoveCheck::ok(),
        })
    }

    /// Exams without a placement.
    pub fn unassigned(&self) -> Vec<&Exam> {
        self.exams.iter().filter(|e| !e.is_assigned()).collect()
    }

    /// Exams placed at `(week_id, day)` for `class_name`.
    pub fn exams_at(&self, class_name: &str, week_id: &str, day: Weekday) -> Vec<&Exam> {
        self.exams
            .iter()
            .filter(|e| e.class_name == class_name && e.occupies(week_id, day))
            .collect()
    }

    /// Plan quality metrics.
    pub fn kpi(&self) -> PlanKpi {
        PlanKpi::calculate(&self.exams, &self.weeks)
    }

    /// Serializes the plan as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restores a plan from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn check_at(&self, scheduler: &ExamScheduler, exam: &Exam, slot: &Slot) -> MoveCheck {
        let ctx = self.context();
        scheduler
            .evaluator(&ctx)
            .check(
                exam,
                &slot.week_id,
                slot.day,
                &self.exams,
                ctx.timetable(&exam.class_name),
            )
            .into()
    }

    fn exam_index(&self, exam_id: &str) -> Result<usize> {
        self.exams
            .iter()
            .position(|e| e.id == exam_id)
            .ok_or_else(|| PlannerError::UnknownExam(exam_id.to_string()))
    }

    fn week_mut(&mut self, week_id: &str) -> Result<&mut Week> {
        self.weeks
            .iter_mut()
            .find(|w| w.id == week_id)
            .ok_or_else(|| PlannerError::UnknownWeek(week_id.to_string()))
    }
}
