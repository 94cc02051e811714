//! Plain-text rendering of tasks and schedules.

use weekplan_core::{Schedule, Task};

pub const EMPTY_DAY: &str = "No tasks assigned.";

const COLUMN_GAP: &str = " | ";

/// One column per day, in window order. Empty days show [`EMPTY_DAY`].
pub fn schedule_columns(schedule: &Schedule) -> String {
    let columns: Vec<(String, Vec<String>)> = schedule
        .entries()
        .into_iter()
        .map(|(label, assignments)| {
            let cells = if assignments.is_empty() {
                vec![EMPTY_DAY.to_string()]
            } else {
                assignments
            };
            (label.to_string(), cells)
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|(label, cells)| {
            cells
                .iter()
                .map(|c| c.chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let rows = columns.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);

    let mut out = String::new();
    push_row(&mut out, columns.iter().map(|(label, _)| label.as_str()), &widths);
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rules.iter().map(String::as_str), &widths);
    for row in 0..rows {
        push_row(
            &mut out,
            columns
                .iter()
                .map(|(_, cells)| cells.get(row).map(String::as_str).unwrap_or("")),
            &widths,
        );
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Task list as a simple aligned table.
pub fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.\n".to_string();
    }

    let name_width = tasks
        .iter()
        .map(|t| t.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(4);

    let mut out = format!(
        "{:>3}  {:<name_width$}  {:<10}  {:<5}  {:>8}  {}\n",
        "#", "Name", "Deadline", "Start", "Duration", "Priority"
    );
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:<10}  {:<5}  {:>8}  {}\n",
            i,
            task.name,
            task.deadline.format("%Y-%m-%d").to_string(),
            task.start_time.format("%H:%M").to_string(),
            format!("{}h", task.duration),
            task.priority,
        ));
    }
    out
}
