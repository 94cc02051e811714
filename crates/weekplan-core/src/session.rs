//! Explicit per-session planner state.
//!
//! A [`Session`] owns the task store and the defaults used by the add and
//! generate actions. It lives as long as the caller keeps it; nothing is
//! written to disk.

use chrono::{NaiveDate, NaiveTime};

use crate::allocator::{Allocator, AllocatorOptions, Schedule};
use crate::error::{CoreError, ValidationError};
use crate::storage::Config;
use crate::task::{Task, TaskDraft, TaskStore};

#[derive(Debug, Clone)]
pub struct Session {
    store: TaskStore,
    default_start_time: NaiveTime,
    options: AllocatorOptions,
}

impl Session {
    /// Empty session with a 09:00 default start time and default options.
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
            default_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            options: AllocatorOptions::default(),
        }
    }

    /// Empty session seeded from the planner configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured start time is malformed.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        Ok(Self {
            store: TaskStore::new(),
            default_start_time: config.planner.start_time()?,
            options: config.allocator_options(),
        })
    }

    /// Validate `draft` against `today` and append it.
    ///
    /// # Errors
    ///
    /// Returns the validation error; the store is unchanged in that case.
    pub fn add_task(&mut self, draft: TaskDraft, today: NaiveDate) -> Result<&Task, ValidationError> {
        let task = draft.validate(today, self.default_start_time)?;
        tracing::info!(
            name = %task.name,
            deadline = %task.deadline,
            duration = task.duration,
            priority = %task.priority,
            "task added"
        );
        self.store.add(task);
        Ok(&self.store.snapshot()[self.store.len() - 1])
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.store
    }

    pub fn default_start_time(&self) -> NaiveTime {
        self.default_start_time
    }

    pub fn set_default_start_time(&mut self, time: NaiveTime) {
        self.default_start_time = time;
    }

    pub fn options(&self) -> &AllocatorOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut AllocatorOptions {
        &mut self.options
    }

    /// Allocate the current tasks with the session options.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's daily limit is 0.
    pub fn generate(&self, today: NaiveDate) -> Result<Schedule, ValidationError> {
        self.generate_with(self.options, today)
    }

    /// Allocate the current tasks with one-off options.
    ///
    /// # Errors
    ///
    /// Returns an error if `options.daily_limit` is 0.
    pub fn generate_with(
        &self,
        options: AllocatorOptions,
        today: NaiveDate,
    ) -> Result<Schedule, ValidationError> {
        let allocator = Allocator::with_options(options)?;
        Ok(allocator.allocate(self.store.snapshot(), today))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
