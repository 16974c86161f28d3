//! Output formatting for CLI commands.
//!
//! Provides both human-readable text output (colored, width-aware) and JSON
//! output for programmatic use. All JSON goes through [`print_json`] so the
//! `--json` flag has one consistent shape per command.

use crate::domain::{Project, Task, TaskDetail, TaskId, TaskStatus};
use colored::Colorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

/// How command results should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable colored text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

const DEFAULT_CONTENT_WIDTH: usize = 80;
const MAX_CONTENT_WIDTH: usize = 100;

/// Width to wrap long text at, based on the terminal if one is attached.
fn content_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).min(MAX_CONTENT_WIDTH),
        None => DEFAULT_CONTENT_WIDTH,
    }
}

/// Print a serializable value as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an informational message.
pub fn info(msg: &str) {
    println!("{} {}", "·".dimmed(), msg);
}

/// Status icon for a task.
fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "○",
        TaskStatus::InProgress => "◐",
        TaskStatus::Completed => "●",
    }
}

/// Colored status label.
fn colorize_status(status: TaskStatus) -> colored::ColoredString {
    match status {
        TaskStatus::Pending => "pending".yellow(),
        TaskStatus::InProgress => "in_progress".cyan(),
        TaskStatus::Completed => "completed".green(),
    }
}

/// Comma-separated id list, or a dash when empty.
fn format_id_list(ids: &[TaskId]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Print a list of tasks.
pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found");
        return;
    }
    for task in tasks {
        println!(
            "{} {:>4}  {}  {}",
            status_icon(task.status),
            task.id.to_string().bold(),
            task.title,
            colorize_status(task.status)
        );
    }
    println!();
    println!("{}", format!("{} task(s)", tasks.len()).dimmed());
}

/// Print full details of a task, including its dependency neighborhood.
pub fn print_task_detail(detail: &TaskDetail) {
    let task = &detail.task;
    println!(
        "{} {}  {}",
        status_icon(task.status),
        format!("#{}", task.id).bold(),
        task.title.bold()
    );
    println!("  Status:       {}", colorize_status(task.status));
    println!("  Project:      {}", task.project_id);
    println!(
        "  Created:      {}",
        task.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("  Depends on:   {}", format_id_list(&detail.dependencies));
    println!("  Required by:  {}", format_id_list(&detail.dependents));

    if let Some(description) = &task.description {
        println!();
        let width = content_width().saturating_sub(2).max(20);
        for line in textwrap::wrap(description, width) {
            println!("  {line}");
        }
    }
}

/// Print a list of projects with their task counts.
pub fn print_project_list(projects: &[(Project, usize)]) {
    if projects.is_empty() {
        println!("No projects found");
        return;
    }
    for (project, task_count) in projects {
        println!(
            "{:>4}  {}  {}  {}",
            project.id.to_string().bold(),
            project.color.dimmed(),
            project.name,
            format!("{task_count} task(s)").dimmed()
        );
        if let Some(description) = &project.description {
            println!("      {}", description.dimmed());
        }
    }
}
