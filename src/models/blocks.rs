//! Blocked days, global and per class.
//!
//! # Precedence
//! A slot is unavailable for a class iff it is blocked globally OR blocked
//! for that class. Absent entries mean "not blocked". A blocked week
//! (`Week::is_blocked`) overrides both maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Weekday;

/// Days blocked for every class: week id → weekday → blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockedDays {
    weeks: BTreeMap<String, BTreeMap<Weekday, bool>>,
}

impl BlockedDays {
    /// Creates an empty map (nothing blocked).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: blocks `(week_id, day)`.
    pub fn with_blocked(mut self, week_id: impl Into<String>, day: Weekday) -> Self {
        self.set(week_id, day, true);
        self
    }

    /// Whether `(week_id, day)` is blocked.
    pub fn is_blocked(&self, week_id: &str, day: Weekday) -> bool {
        self.weeks
            .get(week_id)
            .and_then(|days| days.get(&day))
            .copied()
            .unwrap_or(false)
    }

    /// Sets the block flag for `(week_id, day)`.
    pub fn set(&mut self, week_id: impl Into<String>, day: Weekday, blocked: bool) {
        self.weeks.entry(week_id.into()).or_default().insert(day, blocked);
    }

    /// Flips the block flag and returns the new value.
    pub fn toggle(&mut self, week_id: impl Into<String>, day: Weekday) -> bool {
        let flag = self.weeks.entry(week_id.into()).or_default().entry(day).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Number of blocked (week, day) pairs.
    pub fn blocked_count(&self) -> usize {
        self.weeks
            .values()
            .flat_map(|days| days.values())
            .filter(|&&b| b)
            .count()
    }
}

/// Days blocked for one class: class → week id → weekday → blocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockedClassDays {
    classes: BTreeMap<String, BlockedDays>,
}

impl BlockedClassDays {
    /// Creates an empty map (nothing blocked).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: blocks `(week_id, day)` for `class_name`.
    pub fn with_blocked(
        mut self,
        class_name: impl Into<String>,
        week_id: impl Into<String>,
        day: Weekday,
    ) -> Self {
        self.set(class_name, week_id, day, true);
        self
    }

    /// Whether `(week_id, day)` is blocked for `class_name`.
    pub fn is_blocked(&self, class_name: &str, week_id: &str, day: Weekday) -> bool {
        self.classes
            .get(class_name)
            .is_some_and(|days| days.is_blocked(week_id, day))
    }

    /// Sets the block flag for `(week_id, day)` of `class_name`.
    pub fn set(
        &mut self,
        class_name: impl Into<String>,
        week_id: impl Into<String>,
        day: Weekday,
        blocked: bool,
    ) {
        self.classes
            .entry(class_name.into())
            .or_default()
            .set(week_id, day, blocked);
    }

    /// Flips the block flag and returns the new value.
    pub fn toggle(
        &mut self,
        class_name: impl Into<String>,
        week_id: impl Into<String>,
        day: Weekday,
    ) -> bool {
        self.classes
            .entry(class_name.into())
            .or_default()
            .toggle(week_id, day)
    }

    /// Blocked days of one class, if any were recorded.
    pub fn for_class(&self, class_name: &str) -> Option<&BlockedDays> {
        self.classes.get(class_name)
    }
}
