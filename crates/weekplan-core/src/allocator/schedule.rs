//! Output types of an allocation run.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days in every allocation window.
pub const WINDOW_DAYS: usize = 7;

const DAY_LABEL_FORMAT: &str = "%A, %d %b";

/// One calendar day of the window, e.g. `Monday, 19 Oct`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySlot {
    pub date: NaiveDate,
    pub label: String,
}

impl DaySlot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            label: date.format(DAY_LABEL_FORMAT).to_string(),
        }
    }

    /// The seven consecutive days starting at `today`.
    pub fn window(today: NaiveDate) -> Vec<DaySlot> {
        (0..WINDOW_DAYS as i64)
            .map(|i| DaySlot::new(today + Duration::days(i)))
            .collect()
    }
}

/// Hours of one task placed on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allocation {
    pub task_name: String,
    pub hours: u32,
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} hrs)", self.task_name, self.hours)
    }
}

/// A day of the window and everything assigned to it, in allocation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySchedule {
    pub slot: DaySlot,
    pub allocations: Vec<Allocation>,
}

impl DaySchedule {
    pub fn assignments(&self) -> Vec<String> {
        self.allocations.iter().map(ToString::to_string).collect()
    }

    pub fn total_hours(&self) -> u32 {
        self.allocations.iter().map(|a| a.hours).sum()
    }
}

/// Serializable per-day view handed to presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayReport {
    pub day: String,
    pub date: NaiveDate,
    pub assignments: Vec<String>,
}

/// Result of one allocation run over the 7-day window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    days: Vec<DaySchedule>,
    /// Hours per task that did not fit in the window.
    unassigned: Vec<Allocation>,
}

impl Schedule {
    pub(crate) fn new(days: Vec<DaySchedule>, unassigned: Vec<Allocation>) -> Self {
        Self { days, unassigned }
    }

    /// Days in chronological order, always [`WINDOW_DAYS`] of them.
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn unassigned(&self) -> &[Allocation] {
        &self.unassigned
    }

    /// Day label to assignment strings, in window order.
    pub fn entries(&self) -> Vec<(&str, Vec<String>)> {
        self.days
            .iter()
            .map(|d| (d.slot.label.as_str(), d.assignments()))
            .collect()
    }

    pub fn report(&self) -> Vec<DayReport> {
        self.days
            .iter()
            .map(|d| DayReport {
                day: d.slot.label.clone(),
                date: d.slot.date,
                assignments: d.assignments(),
            })
            .collect()
    }

    /// Total hours assigned to `task_name` across the window.
    pub fn hours_for(&self, task_name: &str) -> u32 {
        self.days
            .iter()
            .flat_map(|d| &d.allocations)
            .filter(|a| a.task_name == task_name)
            .map(|a| a.hours)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.allocations.is_empty())
    }
}
