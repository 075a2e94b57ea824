//! Exam planning domain models.
//!
//! Provides the data types the placement engines consume and produce:
//! the calendar (weeks, weekdays), class timetables, block lists, the
//! subject selection, and the exam records themselves.
//!
//! # Domain Mappings
//!
//! | exam-planner | Generic scheduling |
//! |--------------|--------------------|
//! | Exam | Task |
//! | ClassTimetable | Resource calendar |
//! | Slot (week × weekday) | Time bucket |
//! | Pinned exam | Fixed assignment |

mod blocks;
mod exam;
mod selection;
mod timetable;
mod week;
mod weekday;

pub use blocks::{BlockedClassDays, BlockedDays};
pub use exam::{Exam, ExamRecord, HalfAssignedExam, Slot, DEFAULT_DURATION_MINUTES};
pub use selection::SubjectSelection;
pub use timetable::{ClassTimetable, WeeklySubjects};
pub use week::{weeks_between, Week, WeekType};
pub use weekday::Weekday;
