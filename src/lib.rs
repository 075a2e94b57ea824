//! Constraint-based exam placement for school classes.
//!
//! Assigns written exams to calendar slots (week × weekday) under
//! per-class timetables, global and class-specific blocked days, manual
//! pins, and a maximum number of exams per class and week.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `Week`, `ClassTimetable`,
//!   `Exam`, `Slot`, `BlockedDays`, `BlockedClassDays`, `SubjectSelection`
//! - **`scheduler`**: Move validation, greedy distribution, pin-aware repair, KPIs
//! - **`validation`**: Input integrity checks and plan auditing
//! - **`planner`**: Editable plan state for interactive hosts
//! - **`config`**: TOML-backed placement settings
//!
//! # Architecture
//!
//! Data flows one way: calendar model + existing exams → slot evaluator →
//! greedy or repair engine → new exam list. The engines are synchronous,
//! never touch storage, and take their randomness from the caller.
//!
//! # Example
//!
//! ```
//! use exam_planner::models::{ClassTimetable, Week, Weekday};
//! use exam_planner::planner::ExamPlan;
//! use exam_planner::scheduler::ExamScheduler;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut plan = ExamPlan::with_weeks(vec![Week::new(45, 2024), Week::new(46, 2024)]);
//! plan.import_timetables(vec![ClassTimetable::new("10A")
//!     .with_subject(Weekday::Monday, "Math")
//!     .with_subject(Weekday::Tuesday, "German")]);
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! plan.distribute(&ExamScheduler::new(), &mut rng);
//! assert_eq!(plan.exams.len(), 2);
//! assert!(plan.unassigned().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::{PlannerError, Result};
