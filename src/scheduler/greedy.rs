//! Fresh greedy distribution of exams.
//!
//! # Algorithm
//!
//! 1. For each class (timetable order), take its selected subjects in
//!    selection order, deduplicated, keeping only subjects that appear
//!    somewhere in the primary timetable.
//! 2. Create one unpinned exam per (class, subject).
//! 3. Place it with [`SlotEvaluator::first_fit`](super::SlotEvaluator::first_fit)
//!    against the exams created so far in this run.
//! 4. An exam with no legal slot is kept, unassigned.
//!
//! The output replaces any previous plan; pins from earlier runs are lost.
//!
//! # Complexity
//! O(c * s * w * d * n) where c=classes, s=subjects/class, w=weeks,
//! d=5 weekdays, n=exams placed so far.

use rand::Rng;
use tracing::{debug, info};

use crate::models::{ClassTimetable, Exam, SubjectSelection};

use super::engine::{ExamScheduler, PlacementContext};

impl ExamScheduler {
    /// Creates and places one exam per selected (class, subject) pair.
    ///
    /// Exam ids are drawn from `rng`, so a seeded source reproduces the
    /// whole output.
    pub fn distribute<R: Rng + ?Sized>(
        &self,
        ctx: &PlacementContext<'_>,
        selection: &SubjectSelection,
        rng: &mut R,
    ) -> Vec<Exam> {
        info!(
            event = "distribute_start",
            classes = ctx.timetables.len(),
            weeks = ctx.weeks.len(),
            max_per_week = self.max_exams_per_week,
        );

        let evaluator = self.evaluator(ctx);
        let mut exams: Vec<Exam> = Vec::new();

        for timetable in ctx.timetables {
            for subject in exam_subjects(timetable, selection) {
                let exam = Exam::with_id(random_id(rng), &timetable.class_name, subject)
                    .with_duration(self.default_duration_minutes);

                let exam = match evaluator.first_fit(&exam, ctx.weeks, &exams, Some(timetable), rng)
                {
                    Some(slot) => {
                        debug!(
                            class = %exam.class_name,
                            subject = %exam.subject,
                            week = %slot.week_id,
                            day = %slot.day,
                            "exam placed"
                        );
                        exam.placed_at(slot)
                    }
                    None => {
                        debug!(
                            class = %exam.class_name,
                            subject = %exam.subject,
                            "no slot found, exam left unassigned"
                        );
                        exam
                    }
                };
                exams.push(exam);
            }
        }

        let placed = exams.iter().filter(|e| e.is_assigned()).count();
        info!(
            event = "distribute_end",
            exams = exams.len(),
            placed = placed,
            unassigned = exams.len() - placed,
        );

        exams
    }
}

/// Distributes exams with the default scheduler settings.
pub fn distribute_exams<R: Rng + ?Sized>(
    ctx: &PlacementContext<'_>,
    selection: &SubjectSelection,
    rng: &mut R,
) -> Vec<Exam> {
    ExamScheduler::new().distribute(ctx, selection, rng)
}

/// Subjects of `timetable` that need an exam, in selection order.
fn exam_subjects(timetable: &ClassTimetable, selection: &SubjectSelection) -> Vec<String> {
    let taught = timetable.unique_subjects();
    let mut subjects: Vec<String> = Vec::new();
    for subject in selection.subjects_for(&timetable.class_name) {
        if taught.contains(subject) && !subjects.contains(subject) {
            subjects.push(subject.clone());
        }
    }
    subjects
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    uuid::Builder::from_random_bytes(bytes)
        .into_uuid()
        .to_string()
}
