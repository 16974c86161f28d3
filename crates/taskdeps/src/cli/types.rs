//! Bridge types between clap argument parsing and the domain model.

use crate::domain::TaskStatus;
use clap::ValueEnum;

/// Task status as a CLI argument.
///
/// Kept separate from [`TaskStatus`] so clap derive attributes stay out of
/// the domain layer. `in_progress` is accepted as an alias for the kebab
/// form, and `done` for `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    /// Not started yet.
    Pending,

    /// Currently being worked on.
    #[value(alias = "in_progress")]
    InProgress,

    /// Finished.
    #[value(alias = "done")]
    Completed,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(arg: TaskStatusArg) -> Self {
        match arg {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Completed => TaskStatus::Completed,
        }
    }
}
