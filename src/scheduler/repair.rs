//! Pin-aware repair of an existing plan.
//!
//! # Algorithm
//!
//! 1. Split the input into pinned and unpinned exams.
//! 2. Copy pinned exams into the result unchanged. They are trusted as
//!    forced placements: never re-validated, never moved, but they do
//!    count toward the weekly cap and day collisions.
//! 3. For each unpinned exam, in input order: clear its placement and
//!    place it with the same first-fit scan as a fresh distribution,
//!    checked against the result built so far.
//! 4. An exam with no legal slot is appended unassigned.
//!
//! The output has the same length as the input: pinned exams first, then
//! the repaired exams in their original relative order.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::models::Exam;

use super::engine::{ExamScheduler, PlacementContext};

impl ExamScheduler {
    /// Re-places every unpinned exam around the pinned ones.
    pub fn auto_fix<R: Rng + ?Sized>(
        &self,
        exams: &[Exam],
        ctx: &PlacementContext<'_>,
        rng: &mut R,
    ) -> Vec<Exam> {
        let (pinned, free): (Vec<&Exam>, Vec<&Exam>) = exams.iter().partition(|e| e.is_pinned);

        info!(
            event = "repair_start",
            pinned = pinned.len(),
            unpinned = free.len(),
            weeks = ctx.weeks.len(),
        );

        let evaluator = self.evaluator(ctx);
        let mut result: Vec<Exam> = Vec::with_capacity(exams.len());
        result.extend(pinned.into_iter().cloned());

        let mut unplaced = 0usize;
        for exam in free {
            let exam = exam.unassigned();
            let timetable = ctx.timetable(&exam.class_name);
            if timetable.is_none() {
                warn!(
                    exam = %exam.id,
                    class = %exam.class_name,
                    "exam references unknown class, leaving it unassigned"
                );
            }

            let exam = match evaluator.first_fit(&exam, ctx.weeks, &result, timetable, rng) {
                Some(slot) => {
                    debug!(
                        exam = %exam.id,
                        week = %slot.week_id,
                        day = %slot.day,
                        "exam re-placed"
                    );
                    exam.placed_at(slot)
                }
                None => {
                    unplaced += 1;
                    exam
                }
            };
            result.push(exam);
        }

        info!(
            event = "repair_end",
            exams = result.len(),
            unassigned = unplaced,
        );

        result
    }
}

/// Repairs a plan with the default scheduler settings.
pub fn auto_fix<R: Rng + ?Sized>(
    exams: &[Exam],
    ctx: &PlacementContext<'_>,
    rng: &mut R,
) -> Vec<Exam> {
    ExamScheduler::new().auto_fix(exams, ctx, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockedClassDays, BlockedDays, ClassTimetable, Slot, Week, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn class_10a() -> ClassTimetable {
        ClassTimetable::new("10A")
            .with_subject(Weekday::Monday, "Math")
            .with_subject(Weekday::Tuesday, "German")
            .with_subject(Weekday::Monday, "English")
            .with_subject(Weekday::Wednesday, "English")
    }

    fn at(exam: Exam, week: &str, day: Weekday) -> Exam {
        exam.placed_at(Slot::new(week, day))
    }

    #[test]
    fn test_fully_pinned_is_unchanged() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let exams = vec![
            at(Exam::with_id("a", "10A", "Math").pinned(true), "w1", Weekday::Monday),
            Exam::with_id("b", "10A", "German").pinned(true),
            // Pinned on a day the subject is not taught: still untouched.
            at(Exam::with_id("c", "10A", "English").pinned(true), "w1", Weekday::Friday),
        ];

        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(auto_fix(&exams, &ctx, &mut rng), exams);
    }

    #[test]
    fn test_third_exam_in_full_week_unassigned() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let exams = vec![
            at(Exam::with_id("a", "10A", "Math").pinned(true), "w1", Weekday::Monday),
            at(Exam::with_id("b", "10A", "German").pinned(true), "w1", Weekday::Tuesday),
            at(Exam::with_id("c", "10A", "English"), "w1", Weekday::Wednesday),
        ];

        let mut rng = SmallRng::seed_from_u64(2);
        let fixed = auto_fix(&exams, &ctx, &mut rng);
        assert_eq!(fixed.len(), 3);
        assert_eq!(fixed[2].id, "c");
        assert!(!fixed[2].is_assigned());
    }

    #[test]
    fn test_pinned_slot_blocks_same_day() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new().with_blocked("w1", Weekday::Monday);
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let pinned = at(Exam::with_id("p", "10A", "Math").pinned(true), "w1", Weekday::Monday);
        let free = Exam::with_id("f", "10A", "English");

        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let fixed = auto_fix(&[free.clone(), pinned.clone()], &ctx, &mut rng);
            assert_eq!(fixed[0], pinned);
            assert_eq!(fixed[1].id, "f");
            assert_eq!(fixed[1].slot, Some(Slot::new("w1", Weekday::Wednesday)));
        }
    }

    #[test]
    fn test_pinned_exam_occupies_its_day() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let pinned = at(Exam::with_id("p", "10A", "Math").pinned(true), "w1", Weekday::Monday);
        let free = at(Exam::with_id("f", "10A", "English"), "w1", Weekday::Monday);

        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let fixed = auto_fix(&[pinned.clone(), free.clone()], &ctx, &mut rng);
            assert_eq!(fixed[1].slot, Some(Slot::new("w1", Weekday::Wednesday)));
        }
    }

    #[test]
    fn test_pinned_first_then_original_order() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024), Week::with_id("w2", 46, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let exams = vec![
            Exam::with_id("u1", "10A", "German"),
            at(Exam::with_id("p1", "10A", "Math").pinned(true), "w2", Weekday::Monday),
            Exam::with_id("u2", "10A", "English"),
        ];

        let mut rng = SmallRng::seed_from_u64(4);
        let fixed = auto_fix(&exams, &ctx, &mut rng);
        let ids: Vec<&str> = fixed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "u1", "u2"]);
        assert!(fixed.iter().all(|e| e.is_assigned()));
    }

    #[test]
    fn test_unpinned_exam_is_moved_earlier() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024), Week::with_id("w2", 46, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let exams = vec![at(Exam::with_id("g", "10A", "German"), "w2", Weekday::Tuesday)];
        let mut rng = SmallRng::seed_from_u64(8);
        let fixed = auto_fix(&exams, &ctx, &mut rng);
        assert_eq!(fixed[0].slot, Some(Slot::new("w1", Weekday::Tuesday)));
    }

    #[test]
    fn test_unknown_class_kept_unassigned() {
        let timetables = vec![class_10a()];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);

        let exams = vec![
            at(Exam::with_id("x", "gone", "Math"), "w1", Weekday::Monday),
            Exam::with_id("y", "10A", "Math"),
        ];
        let mut rng = SmallRng::seed_from_u64(3);
        let fixed = auto_fix(&exams, &ctx, &mut rng);
        assert_eq!(fixed.len(), 2);
        assert_eq!(fixed[0].id, "x");
        assert!(!fixed[0].is_assigned());
        assert_eq!(fixed[1].slot, Some(Slot::new("w1", Weekday::Monday)));
    }

    #[test]
    fn test_empty_input() {
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&[], &[], &blocked, &class_blocked);
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(auto_fix(&[], &ctx, &mut rng).is_empty());
    }
}
