//! Task records and the drafts they are built from.
//!
//! A [`Task`] is immutable once added to a [`TaskStore`]. Input surfaces
//! build a [`TaskDraft`] and hand it to [`crate::Session::add_task`], which
//! enforces the field constraints before appending.

mod store;

pub use store::TaskStore;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Shortest task the input form accepts, in hours.
pub const MIN_DURATION_HOURS: u32 = 1;
/// Longest task the input form accepts, in hours.
pub const MAX_DURATION_HOURS: u32 = 8;

/// Priority label attached to a task.
///
/// Serialized as the literal labels `"High"`, `"Medium"` and `"Low"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// The literal label, which is also the default sort key.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Severity rank, 0 being most urgent.
    pub fn severity(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::High
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownPriority(s.to_string()))
    }
}

/// A unit of work to spread across the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub deadline: NaiveDate,
    /// Preferred start time; stored for display only.
    pub start_time: NaiveTime,
    /// Whole hours, 1-8.
    pub duration: u32,
    pub priority: Priority,
}

/// Unvalidated task fields as collected by an input surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub deadline: NaiveDate,
    /// Falls back to the session default start time when absent.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub priority: Priority,
}

fn default_duration() -> u32 {
    MIN_DURATION_HOURS
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, deadline: NaiveDate) -> Self {
        Self {
            name: name.into(),
            deadline,
            start_time: None,
            duration: default_duration(),
            priority: Priority::default(),
        }
    }

    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_duration(mut self, hours: u32) -> Self {
        self.duration = hours;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Apply the form constraints and build an immutable [`Task`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DeadlineInPast`] when the deadline precedes
    /// `today`, or [`ValidationError::InvalidValue`] when the duration is
    /// outside 1-8 hours. The name is not checked.
    pub fn validate(
        self,
        today: NaiveDate,
        default_start: NaiveTime,
    ) -> Result<Task, ValidationError> {
        if self.deadline < today {
            return Err(ValidationError::DeadlineInPast {
                deadline: self.deadline,
                today,
            });
        }
        if !(MIN_DURATION_HOURS..=MAX_DURATION_HOURS).contains(&self.duration) {
            return Err(ValidationError::invalid(
                "duration",
                format!(
                    "{} hours is outside {MIN_DURATION_HOURS}-{MAX_DURATION_HOURS}",
                    self.duration
                ),
            ));
        }

        Ok(Task {
            name: self.name,
            deadline: self.deadline,
            start_time: self.start_time.unwrap_or(default_start),
            duration: self.duration,
            priority: self.priority,
        })
    }
}
