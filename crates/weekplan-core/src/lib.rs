//! # Weekplan Core Library
//!
//! Core logic for the Weekplan task planner. Tasks are collected into an
//! append-only store for the length of a session, and a greedy allocator
//! spreads their hours over the next seven days within a daily budget.
//! The CLI binary is a thin input and rendering layer over this crate.
//!
//! ## Key Components
//!
//! - [`Session`]: Explicit session state (task store, default start time, options)
//! - [`TaskStore`]: Append-only task list
//! - [`Allocator`]: Day-by-day greedy allocation over the 7-day window
//! - [`Config`]: Application configuration management

pub mod allocator;
pub mod error;
pub mod session;
pub mod storage;
pub mod task;

pub use allocator::{
    Allocation, Allocator, AllocatorOptions, DailyLimitMode, DayReport, DaySchedule, DaySlot,
    PriorityOrder, Schedule, DEFAULT_DAILY_LIMIT, WINDOW_DAYS,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use session::Session;
pub use storage::{Config, PlannerConfig};
pub use task::{Priority, Task, TaskDraft, TaskStore, MAX_DURATION_HOURS, MIN_DURATION_HOURS};
