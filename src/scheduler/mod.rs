//! Exam placement engines and KPI evaluation.
//!
//! Provides the move validator, the greedy first-fit distributor, the
//! pin-aware repair engine, and plan quality metrics.
//!
//! # Algorithm
//!
//! Both engines scan weeks in calendar order (earliest week first) and,
//! within a week, the five weekdays in a random order drawn from an
//! injected [`rand::Rng`]. The first slot passing [`SlotEvaluator::check`]
//! wins. There is no backtracking and no optimality guarantee; a seeded
//! random source makes runs reproducible.
//!
//! # KPI
//!
//! `PlanKpi` computes placement rate, load, and weekday spread.

mod engine;
mod evaluator;
mod greedy;
mod kpi;
mod repair;

pub use engine::{ExamScheduler, PlacementContext};
pub use evaluator::{validate_move, MoveCheck, MoveRejection, SlotEvaluator, MAX_EXAMS_PER_WEEK};
pub use greedy::distribute_exams;
pub use kpi::PlanKpi;
pub use repair::auto_fix;
