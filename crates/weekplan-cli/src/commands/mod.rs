pub mod config;
pub mod plan;
pub mod session;

use chrono::NaiveTime;
use clap::Args;
use std::io::Write;
use weekplan_core::{AllocatorOptions, DailyLimitMode, PriorityOrder, Schedule};

use crate::render;

/// Per-run allocator overrides shared by `plan` and the session `generate`.
#[derive(Args, Debug, Clone, Default)]
pub struct AllocationArgs {
    /// Daily available hours
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub daily_hours: Option<u32>,
    /// Task ordering: lexical or severity
    #[arg(long)]
    pub order: Option<PriorityOrder>,
    /// Daily limit accounting: per_task or shared
    #[arg(long)]
    pub limit_mode: Option<DailyLimitMode>,
    /// Print the schedule as JSON
    #[arg(long)]
    pub json: bool,
}

impl AllocationArgs {
    pub fn apply(&self, base: AllocatorOptions) -> AllocatorOptions {
        AllocatorOptions {
            daily_limit: self.daily_hours.unwrap_or(base.daily_limit),
            priority_order: self.order.unwrap_or(base.priority_order),
            limit_mode: self.limit_mode.unwrap_or(base.limit_mode),
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{s}', expected HH:MM"))
}

pub fn write_schedule<W: Write>(
    out: &mut W,
    schedule: &Schedule,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&schedule.report())?)?;
    } else {
        writeln!(out, "Weekly Schedule")?;
        write!(out, "{}", render::schedule_columns(schedule))?;
    }
    Ok(())
}
