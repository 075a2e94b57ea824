//! Scheduler configuration and placement input.

use crate::config::{ConfigError, PlannerConfig};
use crate::models::{
    BlockedClassDays, BlockedDays, ClassTimetable, Week, DEFAULT_DURATION_MINUTES,
};

use super::evaluator::{SlotEvaluator, MAX_EXAMS_PER_WEEK};

/// Read-only input shared by the placement engines.
///
/// Borrows the calendar model; the engines never mutate it.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Class timetables (class name is the key).
    pub timetables: &'a [ClassTimetable],
    /// Candidate weeks, scanned in this order.
    pub weeks: &'a [Week],
    /// Days blocked for every class.
    pub blocked_days: &'a BlockedDays,
    /// Days blocked per class.
    pub blocked_class_days: &'a BlockedClassDays,
}

impl<'a> PlacementContext<'a> {
    /// Creates a placement context.
    pub fn new(
        timetables: &'a [ClassTimetable],
        weeks: &'a [Week],
        blocked_days: &'a BlockedDays,
        blocked_class_days: &'a BlockedClassDays,
    ) -> Self {
        Self {
            timetables,
            weeks,
            blocked_days,
            blocked_class_days,
        }
    }

    /// Looks up the timetable of `class_name`.
    pub fn timetable(&self, class_name: &str) -> Option<&'a ClassTimetable> {
        self.timetables.iter().find(|t| t.class_name == class_name)
    }
}

/// Greedy first-fit exam scheduler.
///
/// Places exams one at a time into the earliest week that has a legal
/// day, trying weekdays in random order. No backtracking: a decision is
/// never revisited within a run, so results depend on input order and
/// on the random source.
///
/// # Example
///
/// ```
/// use exam_planner::models::{
///     BlockedClassDays, BlockedDays, ClassTimetable, SubjectSelection, Week, Weekday,
/// };
/// use exam_planner::scheduler::{ExamScheduler, PlacementContext};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let timetables = vec![ClassTimetable::new("10A").with_subject(Weekday::Tuesday, "German")];
/// let weeks = vec![Week::with_id("w1", 45, 2024)];
/// let blocked = BlockedDays::new();
/// let class_blocked = BlockedClassDays::new();
/// let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);
/// let selection = SubjectSelection::new().with_subjects("10A", ["German"]);
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let exams = ExamScheduler::new().distribute(&ctx, &selection, &mut rng);
/// assert_eq!(exams.len(), 1);
/// assert_eq!(exams[0].day(), Some(Weekday::Tuesday));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamScheduler {
    pub(crate) max_exams_per_week: usize,
    pub(crate) default_duration_minutes: u32,
}

impl ExamScheduler {
    /// Creates a scheduler with a cap of 2 exams per week and 90-minute exams.
    pub fn new() -> Self {
        Self {
            max_exams_per_week: MAX_EXAMS_PER_WEEK,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }

    /// Creates a scheduler from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails
    /// [`PlannerConfig::validate`], e.g. a zero weekly cap.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            max_exams_per_week: config.max_exams_per_week,
            default_duration_minutes: config.default_duration_minutes,
        })
    }

    /// Sets the per-class weekly cap.
    ///
    /// A cap of 0 makes every week full: nothing gets placed.
    pub fn with_max_exams_per_week(mut self, max: usize) -> Self {
        self.max_exams_per_week = max;
        self
    }

    /// Sets the duration given to newly created exams.
    pub fn with_default_duration(mut self, minutes: u32) -> Self {
        self.default_duration_minutes = minutes;
        self
    }

    /// Per-class weekly cap.
    pub fn max_exams_per_week(&self) -> usize {
        self.max_exams_per_week
    }

    /// Duration given to newly created exams.
    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    /// Slot evaluator bound to the context's block lists and this cap.
    pub fn evaluator<'a>(&self, ctx: &PlacementContext<'a>) -> SlotEvaluator<'a> {
        SlotEvaluator::new(ctx.blocked_days, ctx.blocked_class_days)
            .with_max_exams_per_week(self.max_exams_per_week)
    }
}

impl Default for ExamScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubjectSelection, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults() {
        let s = ExamScheduler::default();
        assert_eq!(s.max_exams_per_week(), 2);
        assert_eq!(s.default_duration_minutes(), 90);
    }

    #[test]
    fn test_from_config() {
        let config = PlannerConfig {
            max_exams_per_week: 3,
            default_duration_minutes: 45,
            random_seed: None,
        };
        let s = ExamScheduler::from_config(&config).unwrap();
        assert_eq!(s.max_exams_per_week(), 3);
        assert_eq!(s.default_duration_minutes(), 45);
    }

    #[test]
    fn test_from_config_rejects_zero_cap() {
        let config = PlannerConfig {
            max_exams_per_week: 0,
            default_duration_minutes: 90,
            random_seed: None,
        };
        let err = ExamScheduler::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_cap_places_nothing() {
        let timetables = vec![ClassTimetable::new("10A").with_subject(Weekday::Monday, "Math")];
        let weeks = vec![Week::with_id("w1", 45, 2024)];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &weeks, &blocked, &class_blocked);
        let selection = SubjectSelection::new().with_subjects("10A", ["Math"]);

        let mut rng = SmallRng::seed_from_u64(1);
        let exams = ExamScheduler::new()
            .with_max_exams_per_week(0)
            .distribute(&ctx, &selection, &mut rng);
        assert_eq!(exams.len(), 1);
        assert!(!exams[0].is_assigned());
    }

    #[test]
    fn test_context_timetable_lookup() {
        let timetables = vec![ClassTimetable::new("10A"), ClassTimetable::new("10B")];
        let blocked = BlockedDays::new();
        let class_blocked = BlockedClassDays::new();
        let ctx = PlacementContext::new(&timetables, &[], &blocked, &class_blocked);
        assert_eq!(ctx.timetable("10B").map(|t| t.class_name.as_str()), Some("10B"));
        assert!(ctx.timetable("10C").is_none());
    }
}
