//! Error types for taskdeps operations.

use crate::domain::{ProjectId, TaskId};
use std::io;
use thiserror::Error;

/// The error type for taskdeps operations.
///
/// Validation failures are deterministic given the current store state and
/// never retried internally: the caller must change the request, not repeat
/// it. No error masks a partial write.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No taskdeps repository found in the directory tree.
    #[error("Not a taskdeps repository (run 'taskdeps init' first)")]
    NotInitialized,

    /// Backend-specific storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Field validation failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced task does not exist.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Referenced project does not exist.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The requested dependency edge does not exist.
    #[error("Dependency not found: {task} -> {depends_on}")]
    DependencyNotFound {
        /// The dependent task.
        task: TaskId,
        /// The prerequisite task.
        depends_on: TaskId,
    },

    /// The dependency edge already exists.
    #[error("Dependency already exists: {task} -> {depends_on}")]
    DependencyExists {
        /// The dependent task.
        task: TaskId,
        /// The prerequisite task.
        depends_on: TaskId,
    },

    /// A task cannot depend on itself.
    #[error("Task {0} cannot depend on itself")]
    SelfDependency(TaskId),

    /// Adding the edge would close a cycle in the dependency graph.
    #[error("Adding dependency {task} -> {depends_on} would create a cycle")]
    CircularDependency {
        /// The dependent task.
        task: TaskId,
        /// The prerequisite task.
        depends_on: TaskId,
    },

    /// Another project already uses this name.
    #[error("A project named '{0}' already exists")]
    DuplicateProjectName(String),

    /// The project still owns tasks and cannot be deleted.
    #[error("Project {project} still owns {task_count} task(s) and cannot be deleted")]
    ProjectNotEmpty {
        /// The project that was targeted for deletion.
        project: ProjectId,
        /// How many tasks it still owns.
        task_count: usize,
    },
}

/// A specialized Result type for taskdeps operations.
pub type Result<T> = std::result::Result<T, Error>;
