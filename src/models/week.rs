//! Calendar week model.
//!
//! A week is the outer placement unit. Weeks are scanned in the order the
//! host supplies them, which is assumed to be chronological; this gives
//! the engines their earliest-week preference.
//!
//! # Lifecycle
//! Weeks are produced by [`weeks_between`] (or by the host) and afterwards
//! only have `is_blocked` and `week_type` toggled. The engines never
//! mutate them.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::Weekday;

/// Alternating timetable variant of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekType {
    /// Primary timetable week.
    #[default]
    A,
    /// Alternate timetable week.
    B,
}

/// A calendar week available for exam placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    /// Opaque week identifier.
    pub id: String,
    /// ISO week number (1..=53).
    pub week_number: u32,
    /// ISO week-based year.
    pub year: i32,
    /// Whole week excluded from placement.
    #[serde(default)]
    pub is_blocked: bool,
    /// Timetable variant for this week.
    #[serde(default)]
    pub week_type: WeekType,
}

impl Week {
    /// Creates an unblocked type-A week with a fresh identifier.
    pub fn new(week_number: u32, year: i32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), week_number, year)
    }

    /// Creates an unblocked type-A week with the given identifier.
    pub fn with_id(id: impl Into<String>, week_number: u32, year: i32) -> Self {
        Self {
            id: id.into(),
            week_number,
            year,
            is_blocked: false,
            week_type: WeekType::A,
        }
    }

    /// Marks the week as blocked.
    pub fn blocked(mut self) -> Self {
        self.is_blocked = true;
        self
    }

    /// Sets the timetable variant.
    pub fn with_week_type(mut self, week_type: WeekType) -> Self {
        self.week_type = week_type;
        self
    }

    /// Calendar date of `day` in this week.
    ///
    /// Returns `None` if the week number does not exist in `year`.
    pub fn date_of(&self, day: Weekday) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week_number, day.to_chrono())
    }
}

/// Generates the weeks covering the date range `[start, end]`.
///
/// The start is aligned back to its Monday, then the range is walked one
/// week at a time while the cursor is on or before `end`. Each distinct
/// ISO (year, week) pair yields one unblocked type-A week. The bounds may
/// be given in either order.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use exam_planner::models::weeks_between;
///
/// let start = NaiveDate::from_ymd_opt(2024, 11, 6).unwrap(); // Wed, week 45
/// let end = NaiveDate::from_ymd_opt(2024, 11, 18).unwrap(); // Mon, week 47
/// let weeks = weeks_between(start, end);
/// let numbers: Vec<u32> = weeks.iter().map(|w| w.week_number).collect();
/// assert_eq!(numbers, vec![45, 46, 47]);
/// ```
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> Vec<Week> {
    let (start, end) = if end < start { (end, start) } else { (start, end) };

    let mut current = start - Duration::days(i64::from(start.weekday().num_days_from_monday()));
    let mut seen = HashSet::new();
    let mut weeks = Vec::new();

    while current <= end {
        let iso = current.iso_week();
        if seen.insert((iso.year(), iso.week())) {
            weeks.push(Week::new(iso.week(), iso.year()));
        }
        current += Duration::days(7);
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_defaults() {
        let w = Week::new(45, 2024);
        assert!(!w.is_blocked);
        assert_eq!(w.week_type, WeekType::A);
        assert!(!w.id.is_empty());
        assert_ne!(w.id, Week::new(45, 2024).id);
    }

    #[test]
    fn test_date_of() {
        let w = Week::with_id("w", 1, 2025);
        // ISO week 1 of 2025 starts on Monday 2024-12-30.
        assert_eq!(w.date_of(Weekday::Monday), Some(date(2024, 12, 30)));
        assert_eq!(w.date_of(Weekday::Friday), Some(date(2025, 1, 3)));
        assert_eq!(Week::with_id("x", 60, 2025).date_of(Weekday::Monday), None);
    }

    #[test]
    fn test_weeks_between_year_boundary() {
        let weeks = weeks_between(date(2024, 12, 20), date(2025, 1, 8));
        let keys: Vec<(i32, u32)> = weeks.iter().map(|w| (w.year, w.week_number)).collect();
        assert_eq!(keys, vec![(2024, 51), (2024, 52), (2025, 1), (2025, 2)]);
    }

    #[test]
    fn test_weeks_between_single_day() {
        let weeks = weeks_between(date(2024, 11, 8), date(2024, 11, 8));
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week_number, 45);
    }

    #[test]
    fn test_weeks_between_reversed_bounds() {
        let forward = weeks_between(date(2024, 11, 4), date(2024, 11, 25));
        let reversed = weeks_between(date(2024, 11, 25), date(2024, 11, 4));
        let f: Vec<u32> = forward.iter().map(|w| w.week_number).collect();
        let r: Vec<u32> = reversed.iter().map(|w| w.week_number).collect();
        assert_eq!(f, vec![45, 46, 47, 48]);
        assert_eq!(f, r);
    }

    #[test]
    fn test_week_serde_camel_case() {
        let w = Week::with_id("w1", 46, 2024).with_week_type(WeekType::B);
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["weekNumber"], 46);
        assert_eq!(json["isBlocked"], false);
        assert_eq!(json["weekType"], "B");
    }
}
