//! Plan quality metrics (KPIs).
//!
//! Summarizes how completely and how evenly a plan places its exams.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placement rate | assigned / total (1.0 for an empty plan) |
//! | Max class-week load | Most exams any one class writes in one week |
//! | Weekday histogram | Assigned exams per weekday |
//! | Load by week | Assigned exams per week, all classes |
//! | Stray exams | Assigned to a week id not in the calendar |

use std::collections::{BTreeMap, HashMap};

use crate::models::{Exam, Week, Weekday};

/// Plan performance indicators.
#[derive(Debug, Clone)]
pub struct PlanKpi {
    /// Number of exams in the plan.
    pub total: usize,
    /// Exams with a placement.
    pub placed: usize,
    /// Exams without a placement.
    pub unassigned: usize,
    /// Pinned exams.
    pub pinned: usize,
    /// Fraction of exams placed (0.0..1.0).
    pub placement_rate: f64,
    /// Highest number of exams one class has in one week.
    pub max_class_week_load: usize,
    /// Assigned exams per weekday.
    pub weekday_histogram: BTreeMap<Weekday, usize>,
    /// Assigned exams per week id.
    pub load_by_week: HashMap<String, usize>,
    /// Assigned exams whose week id is not among the given weeks.
    pub stray: usize,
}

impl PlanKpi {
    /// Computes KPIs for a plan.
    ///
    /// # Arguments
    /// * `exams` - The plan.
    /// * `weeks` - The calendar (to detect placements in unknown weeks).
    pub fn calculate(exams: &[Exam], weeks: &[Week]) -> Self {
        let mut placed = 0usize;
        let mut pinned = 0usize;
        let mut stray = 0usize;
        let mut weekday_histogram: BTreeMap<Weekday, usize> =
            Weekday::ALL.iter().map(|&d| (d, 0)).collect();
        let mut load_by_week: HashMap<String, usize> = HashMap::new();
        let mut class_week: HashMap<(&str, &str), usize> = HashMap::new();

        for exam in exams {
            if exam.is_pinned {
                pinned += 1;
            }
            let Some(slot) = &exam.slot else {
                continue;
            };
            placed += 1;
            *weekday_histogram.entry(slot.day).or_insert(0) += 1;
            *load_by_week.entry(slot.week_id.clone()).or_insert(0) += 1;
            *class_week
                .entry((exam.class_name.as_str(), slot.week_id.as_str()))
                .or_insert(0) += 1;
            if !weeks.iter().any(|w| w.id == slot.week_id) {
                stray += 1;
            }
        }

        let total = exams.len();
        let placement_rate = if total == 0 {
            1.0
        } else {
            placed as f64 / total as f64
        };

        Self {
            total,
            placed,
            unassigned: total - placed,
            pinned,
            placement_rate,
            max_class_week_load: class_week.values().copied().max().unwrap_or(0),
            weekday_histogram,
            load_by_week,
            stray,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_placement_rate: f64, max_class_week_load: usize) -> bool {
        self.placement_rate >= min_placement_rate && self.max_class_week_load <= max_class_week_load
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn plan() -> (Vec<Exam>, Vec<Week>) {
        let weeks = vec![Week::with_id("w1", 45, 2024), Week::with_id("w2", 46, 2024)];
        let exams = vec![
            Exam::with_id("a", "10A", "Math").placed_at(Slot::new("w1", Weekday::Monday)),
            Exam::with_id("b", "10A", "German").placed_at(Slot::new("w1", Weekday::Tuesday)),
            Exam::with_id("c", "10B", "Math")
                .pinned(true)
                .placed_at(Slot::new("w1", Weekday::Monday)),
            Exam::with_id("d", "10B", "Art"),
        ];
        (exams, weeks)
    }

    #[test]
    fn test_kpi_basic() {
        let (exams, weeks) = plan();
        let kpi = PlanKpi::calculate(&exams, &weeks);
        assert_eq!(kpi.total, 4);
        assert_eq!(kpi.placed, 3);
        assert_eq!(kpi.unassigned, 1);
        assert_eq!(kpi.pinned, 1);
        assert!((kpi.placement_rate - 0.75).abs() < 1e-10);
        assert_eq!(kpi.max_class_week_load, 2);
        assert_eq!(kpi.stray, 0);
    }

    #[test]
    fn test_kpi_histograms() {
        let (exams, weeks) = plan();
        let kpi = PlanKpi::calculate(&exams, &weeks);
        assert_eq!(kpi.weekday_histogram[&Weekday::Monday], 2);
        assert_eq!(kpi.weekday_histogram[&Weekday::Tuesday], 1);
        assert_eq!(kpi.weekday_histogram[&Weekday::Friday], 0);
        assert_eq!(kpi.load_by_week["w1"], 3);
        assert!(!kpi.load_by_week.contains_key("w2"));
    }

    #[test]
    fn test_kpi_stray_week() {
        let exams =
            vec![Exam::with_id("a", "10A", "Math").placed_at(Slot::new("gone", Weekday::Monday))];
        let kpi = PlanKpi::calculate(&exams, &[]);
        assert_eq!(kpi.stray, 1);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = PlanKpi::calculate(&[], &[]);
        assert_eq!(kpi.total, 0);
        assert!((kpi.placement_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.max_class_week_load, 0);
    }

    #[test]
    fn test_meets_thresholds() {
        let (exams, weeks) = plan();
        let kpi = PlanKpi::calculate(&exams, &weeks);
        assert!(kpi.meets_thresholds(0.75, 2));
        assert!(!kpi.meets_thresholds(0.8, 2));
        assert!(!kpi.meets_thresholds(0.5, 1));
    }
}
