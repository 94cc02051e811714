//! Interactive session: one in-memory task list for the life of the loop.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};
use weekplan_core::{Config, Priority, Session, TaskDraft};

use super::{parse_time, write_schedule, AllocationArgs};
use crate::render;

#[derive(Parser, Debug)]
#[command(name = "session", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Deadline (YYYY-MM-DD), not before today
        #[arg(long)]
        deadline: NaiveDate,
        /// Start time (HH:MM); defaults to the session default
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveTime>,
        /// Duration in hours (1-8)
        #[arg(long, default_value_t = 1)]
        duration: u32,
        /// Priority: High, Medium or Low
        #[arg(long, default_value = "High")]
        priority: Priority,
    },
    /// Show the task list
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate the weekly schedule
    Generate(AllocationArgs),
    /// Change the default start time for new tasks
    DefaultStart {
        #[arg(value_parser = parse_time)]
        time: NaiveTime,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

pub fn run(today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut session = Session::from_config(&config)?;

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let stdout = io::stdout();
    run_loop(stdin.lock(), &mut stdout.lock(), &mut session, today, prompt)
}

/// Read commands line by line until `quit` or end of input.
pub fn run_loop<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    session: &mut Session,
    today: NaiveDate,
    prompt: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(
        out,
        "Weekplan session starting {}. Type 'help' for commands.",
        today.format("%A, %d %b")
    )?;

    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(tokens) = shlex::split(line) else {
            writeln!(out, "error: unbalanced quotes")?;
            continue;
        };

        match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => match handle(parsed.command, session, today, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(out, "error: {e}")?,
            },
            // Usage errors and `help` output both come through here.
            Err(e) => write!(out, "{e}")?,
        }
    }

    tracing::debug!(tasks = session.tasks().len(), "session ended");
    Ok(())
}

fn handle<W: Write>(
    command: SessionCommand,
    session: &mut Session,
    today: NaiveDate,
    out: &mut W,
) -> Result<Flow, Box<dyn std::error::Error>> {
    match command {
        SessionCommand::Add {
            name,
            deadline,
            start,
            duration,
            priority,
        } => {
            let mut draft = TaskDraft::new(name, deadline)
                .with_duration(duration)
                .with_priority(priority);
            draft.start_time = start;
            let task = session.add_task(draft, today)?;
            writeln!(out, "Task '{}' added!", task.name)?;
        }
        SessionCommand::List { json } => {
            let tasks = session.tasks().snapshot();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(tasks)?)?;
            } else {
                writeln!(out, "Task List")?;
                write!(out, "{}", render::task_table(tasks))?;
            }
        }
        SessionCommand::Generate(args) => {
            let options = args.apply(*session.options());
            let schedule = session.generate_with(options, today)?;
            write_schedule(out, &schedule, args.json)?;
        }
        SessionCommand::DefaultStart { time } => {
            session.set_default_start_time(time);
            writeln!(out, "Default start time set to {}", time.format("%H:%M"))?;
        }
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
