//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::{Parser, Subcommand};

use super::types::TaskStatusArg;
use super::validators::{validate_color, validate_id, validate_project_name, validate_title};

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InitArgs {
    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug, Clone, Default)]
pub struct InfoArgs {}

/// Arguments for the `add` command
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Task title (maximum 200 characters)
    #[arg(value_parser = validate_title)]
    pub title: String,

    /// Detailed description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// Initial status
    #[arg(short, long, value_enum, default_value = "pending")]
    pub status: TaskStatusArg,

    /// Project id to file the task under (defaults to the default project)
    #[arg(short, long, value_parser = validate_id)]
    pub project: Option<u64>,
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone, Default)]
pub struct ListArgs {
    /// Filter by status
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,

    /// Filter by project id
    #[arg(short, long, value_parser = validate_id)]
    pub project: Option<u64>,

    /// Maximum number of tasks to display
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Task id to display
    #[arg(value_parser = validate_id)]
    pub id: u64,
}

/// Arguments for the `update` command
#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Task id to update
    #[arg(value_parser = validate_id)]
    pub id: u64,

    /// New title (maximum 200 characters)
    #[arg(long, value_parser = validate_title)]
    pub title: Option<String>,

    /// New description
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// New status
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,
}

/// Arguments for the `done` command
#[derive(Parser, Debug, Clone)]
pub struct DoneArgs {
    /// Task id to mark completed
    #[arg(value_parser = validate_id)]
    pub id: u64,
}

/// Arguments for the `delete` command
#[derive(Parser, Debug, Clone)]
pub struct DeleteArgs {
    /// Task id to delete
    #[arg(value_parser = validate_id)]
    pub id: u64,
}

/// Arguments for the `dep` command
#[derive(Parser, Debug, Clone)]
pub struct DepArgs {
    /// Dependency subcommand
    #[command(subcommand)]
    pub action: DepAction,
}

/// Dependency management actions
#[derive(Subcommand, Debug, Clone)]
pub enum DepAction {
    /// Add a dependency (task cannot proceed until the prerequisite is done)
    Add {
        /// Task that depends on another
        #[arg(value_parser = validate_id)]
        task: u64,

        /// Task being depended on
        #[arg(value_parser = validate_id)]
        depends_on: u64,
    },

    /// Remove a dependency
    #[command(alias = "rm")]
    Remove {
        /// Task that depends on another
        #[arg(value_parser = validate_id)]
        task: u64,

        /// Task being depended on
        #[arg(value_parser = validate_id)]
        depends_on: u64,
    },

    /// List the dependency neighborhood of a task
    List {
        /// Task id
        #[arg(value_parser = validate_id)]
        task: u64,
    },
}

/// Arguments for the `project` command
#[derive(Parser, Debug, Clone)]
pub struct ProjectArgs {
    /// Project subcommand
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project management actions
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectAction {
    /// Create a new project
    Add {
        /// Project name (unique, maximum 100 characters)
        #[arg(value_parser = validate_project_name)]
        name: String,

        /// Detailed description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Display color as '#rrggbb'
        #[arg(short, long, value_parser = validate_color)]
        color: Option<String>,
    },

    /// List all projects with task counts
    List,

    /// Update an existing project
    Update {
        /// Project id to update
        #[arg(value_parser = validate_id)]
        id: u64,

        /// New name (uniqueness is re-checked)
        #[arg(long, value_parser = validate_project_name)]
        name: Option<String>,

        /// New description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// New color as '#rrggbb'
        #[arg(short, long, value_parser = validate_color)]
        color: Option<String>,
    },

    /// Remove an empty project
    #[command(alias = "rm")]
    Remove {
        /// Project id to remove
        #[arg(value_parser = validate_id)]
        id: u64,
    },
}
