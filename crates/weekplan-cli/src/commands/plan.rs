//! One-shot planning from a JSON task list.

use chrono::NaiveDate;
use clap::Args;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use weekplan_core::{Config, Session, TaskDraft};

use super::{write_schedule, AllocationArgs};
use crate::render;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// JSON array of tasks, or '-' to read stdin
    input: PathBuf,
    #[command(flatten)]
    allocation: AllocationArgs,
}

pub fn run(args: PlanArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let content = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.input)
            .map_err(|e| format!("cannot read {}: {e}", args.input.display()))?
    };

    let config = Config::load_or_default();
    let mut session = Session::from_config(&config)?;
    plan(&content, &mut session, &args.allocation, today, &mut io::stdout().lock())
}

fn plan<W: Write>(
    content: &str,
    session: &mut Session,
    allocation: &AllocationArgs,
    today: NaiveDate,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let drafts: Vec<TaskDraft> = serde_json::from_str(content)?;
    for (index, draft) in drafts.into_iter().enumerate() {
        session
            .add_task(draft, today)
            .map_err(|e| format!("task #{index}: {e}"))?;
    }

    let schedule = session.generate_with(allocation.apply(*session.options()), today)?;
    if !allocation.json {
        writeln!(out, "Task List")?;
        write!(out, "{}", render::task_table(session.tasks().snapshot()))?;
        writeln!(out)?;
    }
    write_schedule(out, &schedule, allocation.json)
}
