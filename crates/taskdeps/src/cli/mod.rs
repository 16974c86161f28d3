//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for taskdeps using clap's
//! derive API. Each command has its own argument struct with validation and
//! helpful error messages.
//!
//! # Commands
//!
//! - `init`: Initialize a new taskdeps repository
//! - `info`: Show repository information
//! - `add`: Create a new task
//! - `list`: List tasks with optional filters
//! - `show`: Show task details
//! - `update`: Update an existing task
//! - `done`: Mark a task completed
//! - `delete`: Delete a task (and its dependency edges)
//! - `dep`: Manage dependencies between tasks
//! - `project`: Manage projects
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! taskdeps add "Write the report" --project 2
//! taskdeps dep add 3 1
//! taskdeps list --status pending
//! ```

mod args;
mod execute;
mod types;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{
    AddArgs, DeleteArgs, DepAction, DepArgs, DoneArgs, InfoArgs, InitArgs, ListArgs, ProjectAction,
    ProjectArgs, ShowArgs, UpdateArgs,
};

// Re-export types
pub use types::TaskStatusArg;

// Re-export validators for external use
pub use validators::{validate_color, validate_id, validate_project_name, validate_title};

/// Taskdeps - task management with dependency tracking
///
/// Track tasks, projects, and the dependencies between tasks using JSONL
/// storage. Data lives in `.taskdeps/tasks.jsonl` for easy version control
/// integration. Dependency edges are kept acyclic.
#[derive(Parser, Debug)]
#[command(name = "taskdeps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new taskdeps repository
    ///
    /// Creates the `.taskdeps/` directory with configuration and an empty
    /// task database. Run this once in your project root.
    Init(InitArgs),

    /// Show repository information
    ///
    /// Displays the data file path and summary statistics.
    Info(InfoArgs),

    /// Create a new task
    ///
    /// Creates a task with the given title. Without `--project` the task
    /// lands in the default project.
    Add(AddArgs),

    /// List tasks with optional filters
    ///
    /// Shows tasks matching the filter criteria, ordered by id.
    List(ListArgs),

    /// Show detailed information about a task
    ///
    /// Displays all fields of a task including its dependencies and the
    /// tasks that depend on it.
    Show(ShowArgs),

    /// Update an existing task
    ///
    /// Modifies one or more fields. Only provided fields are changed.
    Update(UpdateArgs),

    /// Mark a task completed
    Done(DoneArgs),

    /// Delete a task permanently
    ///
    /// Also removes every dependency edge the task participates in.
    /// This cannot be undone.
    Delete(DeleteArgs),

    /// Manage dependencies between tasks
    ///
    /// Add, remove, or list dependency edges. Adding an edge that would
    /// close a cycle is rejected.
    Dep(DepArgs),

    /// Manage projects
    ///
    /// Create, list, update, or remove projects. A project that still owns
    /// tasks cannot be removed.
    Project(ProjectArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Info(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_info(&app, args, output_mode).await
            }
            Some(Commands::Add(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_add(&mut app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Update(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_update(&mut app, args, output_mode).await
            }
            Some(Commands::Done(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_done(&mut app, args, output_mode).await
            }
            Some(Commands::Delete(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_delete(&mut app, args, output_mode).await
            }
            Some(Commands::Dep(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_dep(&mut app, args, output_mode).await
            }
            Some(Commands::Project(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_project(&mut app, args, output_mode).await
            }
            None => {
                println!("Taskdeps task management system");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_command() {
        let cli = Cli::try_parse_from(["taskdeps"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parse_global_json_flag() {
        let cli = Cli::try_parse_from(["taskdeps", "--json", "list"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn parse_init_quiet() {
        let cli = Cli::try_parse_from(["taskdeps", "init", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => assert!(args.quiet),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_add_minimal() {
        let cli = Cli::try_parse_from(["taskdeps", "add", "Write the report"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.title, "Write the report");
                assert!(args.description.is_none());
                assert_eq!(args.status, TaskStatusArg::Pending);
                assert!(args.project.is_none());
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn parse_add_full() {
        let cli = Cli::try_parse_from([
            "taskdeps",
            "add",
            "Fix bug",
            "--description",
            "Detailed desc",
            "--status",
            "in-progress",
            "--project",
            "2",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.title, "Fix bug");
                assert_eq!(args.description, Some("Detailed desc".to_string()));
                assert_eq!(args.status, TaskStatusArg::InProgress);
                assert_eq!(args.project, Some(2));
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn parse_add_rejects_empty_title() {
        let result = Cli::try_parse_from(["taskdeps", "add", "   "]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_list_with_filters() {
        let cli = Cli::try_parse_from([
            "taskdeps", "list", "--status", "pending", "--project", "3", "-n", "10",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, Some(TaskStatusArg::Pending));
                assert_eq!(args.project, Some(3));
                assert_eq!(args.limit, Some(10));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn parse_list_status_underscore_alias() {
        let cli = Cli::try_parse_from(["taskdeps", "list", "--status", "in_progress"]).unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.status, Some(TaskStatusArg::InProgress));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["taskdeps", "show", "7"]).unwrap();
        match cli.command {
            Some(Commands::Show(args)) => assert_eq!(args.id, 7),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn parse_show_rejects_non_numeric_id() {
        let result = Cli::try_parse_from(["taskdeps", "show", "abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_show_rejects_zero_id() {
        let result = Cli::try_parse_from(["taskdeps", "show", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_update() {
        let cli = Cli::try_parse_from([
            "taskdeps",
            "update",
            "4",
            "--title",
            "New title",
            "--status",
            "completed",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, 4);
                assert_eq!(args.title, Some("New title".to_string()));
                assert_eq!(args.status, Some(TaskStatusArg::Completed));
                assert!(args.description.is_none());
            }
            _ => panic!("Expected Update command"),
        }
    }

    #[test]
    fn parse_done() {
        let cli = Cli::try_parse_from(["taskdeps", "done", "5"]).unwrap();
        match cli.command {
            Some(Commands::Done(args)) => assert_eq!(args.id, 5),
            _ => panic!("Expected Done command"),
        }
    }

    #[test]
    fn parse_delete() {
        let cli = Cli::try_parse_from(["taskdeps", "delete", "9"]).unwrap();
        match cli.command {
            Some(Commands::Delete(args)) => assert_eq!(args.id, 9),
            _ => panic!("Expected Delete command"),
        }
    }

    #[test]
    fn parse_dep_add() {
        let cli = Cli::try_parse_from(["taskdeps", "dep", "add", "3", "1"]).unwrap();
        match cli.command {
            Some(Commands::Dep(args)) => match args.action {
                DepAction::Add { task, depends_on } => {
                    assert_eq!(task, 3);
                    assert_eq!(depends_on, 1);
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Dep command"),
        }
    }

    #[test]
    fn parse_dep_remove_alias() {
        let cli = Cli::try_parse_from(["taskdeps", "dep", "rm", "3", "1"]).unwrap();
        match cli.command {
            Some(Commands::Dep(args)) => match args.action {
                DepAction::Remove { task, depends_on } => {
                    assert_eq!(task, 3);
                    assert_eq!(depends_on, 1);
                }
                _ => panic!("Expected Remove action"),
            },
            _ => panic!("Expected Dep command"),
        }
    }

    #[test]
    fn parse_dep_list() {
        let cli = Cli::try_parse_from(["taskdeps", "dep", "list", "2"]).unwrap();
        match cli.command {
            Some(Commands::Dep(args)) => match args.action {
                DepAction::List { task } => assert_eq!(task, 2),
                _ => panic!("Expected List action"),
            },
            _ => panic!("Expected Dep command"),
        }
    }

    #[test]
    fn parse_project_add() {
        let cli = Cli::try_parse_from([
            "taskdeps", "project", "add", "Work", "--color", "#ff0000",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Project(args)) => match args.action {
                ProjectAction::Add { name, color, .. } => {
                    assert_eq!(name, "Work");
                    assert_eq!(color, Some("#ff0000".to_string()));
                }
                _ => panic!("Expected Add action"),
            },
            _ => panic!("Expected Project command"),
        }
    }

    #[test]
    fn parse_project_add_rejects_bad_color() {
        let result = Cli::try_parse_from(["taskdeps", "project", "add", "Work", "--color", "red"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_project_list() {
        let cli = Cli::try_parse_from(["taskdeps", "project", "list"]).unwrap();
        match cli.command {
            Some(Commands::Project(args)) => {
                assert!(matches!(args.action, ProjectAction::List));
            }
            _ => panic!("Expected Project command"),
        }
    }

    #[test]
    fn parse_project_update() {
        let cli = Cli::try_parse_from([
            "taskdeps", "project", "update", "2", "--name", "Renamed",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Project(args)) => match args.action {
                ProjectAction::Update { id, name, .. } => {
                    assert_eq!(id, 2);
                    assert_eq!(name, Some("Renamed".to_string()));
                }
                _ => panic!("Expected Update action"),
            },
            _ => panic!("Expected Project command"),
        }
    }

    #[test]
    fn parse_project_remove_alias() {
        let cli = Cli::try_parse_from(["taskdeps", "project", "rm", "2"]).unwrap();
        match cli.command {
            Some(Commands::Project(args)) => match args.action {
                ProjectAction::Remove { id } => assert_eq!(id, 2),
                _ => panic!("Expected Remove action"),
            },
            _ => panic!("Expected Project command"),
        }
    }
}
