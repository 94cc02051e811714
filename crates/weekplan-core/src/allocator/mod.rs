//! Greedy weekly allocator.
//!
//! Spreads each task's hours over the 7-day window starting at "today":
//! - Orders tasks by (priority, deadline)
//! - Walks the window day by day, skipping days after the task's deadline
//! - Puts `min(remaining, daily_limit)` hours on every eligible day until the
//!   task is exhausted
//!
//! Hours that do not fit before the deadline or inside the window are dropped.
//! There is no backtracking.

mod schedule;

pub use schedule::{Allocation, DayReport, DaySchedule, DaySlot, Schedule, WINDOW_DAYS};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::task::Task;

/// Daily hours available when nothing else is configured.
pub const DEFAULT_DAILY_LIMIT: u32 = 8;

/// How tasks are ordered before allocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Compare the literal labels: High < Low < Medium.
    #[default]
    Lexical,
    /// High, then Medium, then Low.
    Severity,
}

/// How `daily_limit` is accounted across tasks sharing a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DailyLimitMode {
    /// Each task sees the full limit on every day, so a day's total may
    /// exceed it when several tasks land there.
    #[default]
    PerTask,
    /// One budget per day, drawn down by tasks in allocation order.
    Shared,
}

macro_rules! impl_option_label {
    ($ty:ty, $field:literal, { $($variant:path => $label:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($label => Ok($variant),)+
                    other => Err(ValidationError::invalid(
                        $field,
                        format!("unknown value '{other}'"),
                    )),
                }
            }
        }
    };
}

impl_option_label!(PriorityOrder, "priority_order", {
    PriorityOrder::Lexical => "lexical",
    PriorityOrder::Severity => "severity",
});

impl_option_label!(DailyLimitMode, "limit_mode", {
    DailyLimitMode::PerTask => "per_task",
    DailyLimitMode::Shared => "shared",
});

/// Allocator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorOptions {
    /// Hours a task may take on a single day
    pub daily_limit: u32,
    pub priority_order: PriorityOrder,
    pub limit_mode: DailyLimitMode,
}

impl Default for AllocatorOptions {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            priority_order: PriorityOrder::default(),
            limit_mode: DailyLimitMode::default(),
        }
    }
}

/// Greedy allocator over a 7-day window.
#[derive(Debug, Clone)]
pub struct Allocator {
    options: AllocatorOptions,
}

impl Allocator {
    /// Create an allocator with default options
    pub fn new() -> Self {
        Self {
            options: AllocatorOptions::default(),
        }
    }

    /// Create with custom options
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidValue`] if `daily_limit` is 0.
    pub fn with_options(options: AllocatorOptions) -> Result<Self, ValidationError> {
        if options.daily_limit == 0 {
            return Err(ValidationError::invalid(
                "daily_limit",
                "must be at least 1 hour",
            ));
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &AllocatorOptions {
        &self.options
    }

    /// Allocate `tasks` over the window starting at `today`.
    ///
    /// The input slice is not modified; running this twice on the same
    /// arguments yields equal schedules.
    pub fn allocate(&self, tasks: &[Task], today: NaiveDate) -> Schedule {
        let span = tracing::debug_span!(
            "allocate",
            %today,
            tasks = tasks.len(),
            daily_limit = self.options.daily_limit,
            order = %self.options.priority_order,
            mode = %self.options.limit_mode,
        );
        let _guard = span.enter();

        let mut ordered: Vec<&Task> = tasks.iter().collect();
        self.sort_tasks(&mut ordered);

        let mut days: Vec<DaySchedule> = DaySlot::window(today)
            .into_iter()
            .map(|slot| DaySchedule {
                slot,
                allocations: Vec::new(),
            })
            .collect();
        let mut capacity = vec![self.options.daily_limit; days.len()];
        let mut unassigned = Vec::new();

        for task in ordered {
            let mut remaining = task.duration;

            for (day, left) in days.iter_mut().zip(capacity.iter_mut()) {
                if remaining == 0 {
                    break;
                }
                if task.deadline < day.slot.date {
                    continue;
                }

                let available = match self.options.limit_mode {
                    DailyLimitMode::PerTask => self.options.daily_limit,
                    DailyLimitMode::Shared => *left,
                };
                if available == 0 {
                    continue;
                }

                let hours = remaining.min(available);
                day.allocations.push(Allocation {
                    task_name: task.name.clone(),
                    hours,
                });
                if self.options.limit_mode == DailyLimitMode::Shared {
                    *left -= hours;
                }
                remaining -= hours;
            }

            if remaining > 0 {
                tracing::debug!(
                    task = %task.name,
                    deadline = %task.deadline,
                    remaining,
                    "task not fully allocated within window"
                );
                unassigned.push(Allocation {
                    task_name: task.name.clone(),
                    hours: remaining,
                });
            }
        }

        tracing::debug!(
            assigned = days.iter().map(DaySchedule::total_hours).sum::<u32>(),
            unassigned = unassigned.iter().map(|a| a.hours).sum::<u32>(),
            "allocation finished"
        );

        Schedule::new(days, unassigned)
    }

    /// Stable sort by (priority key, deadline).
    fn sort_tasks(&self, tasks: &mut [&Task]) {
        let order = self.options.priority_order;
        tasks.sort_by(|a, b| {
            let by_priority = match order {
                PriorityOrder::Lexical => a.priority.label().cmp(b.priority.label()),
                PriorityOrder::Severity => a.priority.severity().cmp(&b.priority.severity()),
            };
            match by_priority {
                Ordering::Equal => a.deadline.cmp(&b.deadline),
                other => other,
            }
        });
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}
