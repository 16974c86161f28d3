//! Domain types for task and project management.
//!
//! This module contains the core domain types for the taskdeps task manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a task title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a project name.
pub const MAX_PROJECT_NAME_LENGTH: usize = 100;

/// Color assigned to projects created without an explicit color.
pub const DEFAULT_PROJECT_COLOR: &str = "#2196f3";

/// Id of the automatically created default project.
pub const DEFAULT_PROJECT_ID: ProjectId = ProjectId(1);

/// Name of the automatically created default project.
pub const DEFAULT_PROJECT_NAME: &str = "Default";

/// Unique identifier for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Create a new task ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl ProjectId {
    /// Create a new project ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started yet.
    #[default]
    Pending,

    /// Task is currently being worked on.
    InProgress,

    /// Task has been completed.
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        };
        write!(f, "{s}")
    }
}

/// A unit of work belonging to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: TaskId,

    /// Task title.
    pub title: String,

    /// Detailed description (optional).
    pub description: Option<String>,

    /// Current status.
    pub status: TaskStatus,

    /// The project that owns this task.
    pub project_id: ProjectId,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A named grouping that owns tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: ProjectId,

    /// Project name (unique across the store).
    pub name: String,

    /// Detailed description (optional).
    pub description: Option<String>,

    /// Display color as `#rrggbb`.
    pub color: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A directed dependency edge: `task_id` requires `depends_on_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Unique identifier for the edge.
    pub id: u64,

    /// The dependent task.
    pub task_id: TaskId,

    /// The prerequisite task.
    pub depends_on_id: TaskId,
}

/// The dependency neighborhood of a single task.
///
/// `dependencies` are the tasks this task depends on (outgoing edges);
/// `dependents` are the tasks depending on this task (incoming edges).
/// The ordering of either sequence carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyView {
    /// Ids of prerequisite tasks.
    pub dependencies: Vec<TaskId>,

    /// Ids of dependent tasks.
    pub dependents: Vec<TaskId>,
}

/// A task together with its dependency neighborhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDetail {
    /// The task record.
    #[serde(flatten)]
    pub task: Task,

    /// Ids of prerequisite tasks.
    pub dependencies: Vec<TaskId>,

    /// Ids of dependent tasks.
    pub dependents: Vec<TaskId>,
}

/// Data for creating a new task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    /// Task title.
    pub title: String,

    /// Detailed description (optional).
    pub description: Option<String>,

    /// Initial status (defaults to pending).
    pub status: TaskStatus,

    /// Owning project. `None` targets the default project.
    pub project_id: Option<ProjectId>,
}

/// Data for updating an existing task. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    /// New title (if updating).
    pub title: Option<String>,

    /// New description (if updating).
    pub description: Option<String>,

    /// New status (if updating).
    pub status: Option<TaskStatus>,
}

/// Data for creating a new project.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    /// Project name (must be unique).
    pub name: String,

    /// Detailed description (optional).
    pub description: Option<String>,

    /// Display color (defaults to [`DEFAULT_PROJECT_COLOR`]).
    pub color: Option<String>,
}

/// Data for updating an existing project. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New name (if updating; uniqueness is re-checked).
    pub name: Option<String>,

    /// New description (if updating).
    pub description: Option<String>,

    /// New color (if updating).
    pub color: Option<String>,
}

/// Filter for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by owning project.
    pub project: Option<ProjectId>,

    /// Filter by status.
    pub status: Option<TaskStatus>,

    /// Limit number of results.
    pub limit: Option<usize>,
}

/// Validate a task title.
///
/// Titles must be non-empty (after trimming) and at most
/// [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!("Title cannot exceed {MAX_TITLE_LENGTH} characters"));
    }
    Ok(())
}

/// Validate a project name.
///
/// Names must be non-empty (after trimming) and at most
/// [`MAX_PROJECT_NAME_LENGTH`] characters.
pub fn validate_project_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Project name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        return Err(format!(
            "Project name cannot exceed {MAX_PROJECT_NAME_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate a project color.
///
/// Colors must be `#` followed by six hexadecimal digits, e.g. `#2196f3`.
pub fn validate_color(color: &str) -> Result<(), String> {
    let rest = color
        .strip_prefix('#')
        .ok_or_else(|| "Color must start with '#'".to_string())?;
    if rest.len() != 6 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("Color must be '#' followed by six hex digits, e.g. #2196f3".to_string());
    }
    Ok(())
}

impl NewTask {
    /// Validate the fields of a task about to be created.
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)
    }
}

impl NewProject {
    /// Validate the fields of a project about to be created.
    pub fn validate(&self) -> Result<(), String> {
        validate_project_name(&self.name)?;
        if let Some(color) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }
}
