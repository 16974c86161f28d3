//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{
    AddArgs, DeleteArgs, DepAction, DepArgs, DoneArgs, InfoArgs, InitArgs, ListArgs, ProjectAction,
    ProjectArgs, ShowArgs, UpdateArgs,
};
use crate::app::App;
use crate::domain::{
    NewProject, NewTask, ProjectId, ProjectUpdate, TaskFilter, TaskId, TaskStatus, TaskUpdate,
};
use crate::output::{self, OutputMode};

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!(
            "Initialized taskdeps in {}",
            result.taskdeps_dir.display()
        );
        println!("  Config: {}", result.config_file.display());
        println!("  Tasks:  {}", result.tasks_file.display());
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(app: &App, _args: &InfoArgs, output_mode: OutputMode) -> Result<()> {
    let data_file = app.taskdeps_dir().join("tasks.jsonl");

    // Count tasks per status in one pass
    let tasks = app.storage().list_tasks(&TaskFilter::default()).await?;
    let (total, pending, in_progress, completed) =
        tasks
            .iter()
            .fold((0, 0, 0, 0), |(t, p, ip, c), task| match task.status {
                TaskStatus::Pending => (t + 1, p + 1, ip, c),
                TaskStatus::InProgress => (t + 1, p, ip + 1, c),
                TaskStatus::Completed => (t + 1, p, ip, c + 1),
            });

    let projects = app.storage().list_projects().await?;
    let dependencies = app.storage().list_dependencies().await?;

    match output_mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "data_file": data_file.display().to_string(),
                "projects": projects.len(),
                "dependencies": dependencies.len(),
                "tasks": {
                    "total": total,
                    "pending": pending,
                    "in_progress": in_progress,
                    "completed": completed
                }
            }))?;
        }
        OutputMode::Text => {
            println!("Taskdeps Repository Information");
            println!("===============================");
            println!();
            println!("Data file: {}", data_file.display());
            println!();
            println!(
                "Tasks: {} total ({} pending, {} in progress, {} completed)",
                total, pending, in_progress, completed
            );
            println!("Projects: {}", projects.len());
            println!("Dependencies: {}", dependencies.len());
        }
    }

    Ok(())
}

/// Execute the add command
pub async fn execute_add(app: &mut App, args: &AddArgs, output_mode: OutputMode) -> Result<()> {
    let new_task = NewTask {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.into(),
        project_id: args.project.map(ProjectId::new),
    };

    let task = app.storage_mut().create_task(new_task).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => output::success(&format!("Created task #{}: {}", task.id, task.title)),
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    let filter = TaskFilter {
        project: args.project.map(ProjectId::new),
        status: args.status.map(Into::into),
        limit: args.limit,
    };

    let tasks = app.storage().list_tasks(&filter).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&tasks)?,
        OutputMode::Text => output::print_task_list(&tasks),
    }

    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &ShowArgs, output_mode: OutputMode) -> Result<()> {
    let detail = app.storage().get_task_detail(TaskId::new(args.id)).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&detail)?,
        OutputMode::Text => output::print_task_detail(&detail),
    }

    Ok(())
}

/// Execute the update command
pub async fn execute_update(app: &mut App, args: &UpdateArgs, output_mode: OutputMode) -> Result<()> {
    let update = TaskUpdate {
        title: args.title.clone(),
        description: args.description.clone(),
        status: args.status.map(Into::into),
    };

    let task = app.storage_mut().update_task(TaskId::new(args.id), update).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => output::success(&format!("Updated task #{}", task.id)),
    }

    Ok(())
}

/// Execute the done command
pub async fn execute_done(app: &mut App, args: &DoneArgs, output_mode: OutputMode) -> Result<()> {
    let update = TaskUpdate {
        status: Some(TaskStatus::Completed),
        ..Default::default()
    };

    let task = app.storage_mut().update_task(TaskId::new(args.id), update).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&task)?,
        OutputMode::Text => output::success(&format!("Completed task #{}: {}", task.id, task.title)),
    }

    Ok(())
}

/// Execute the delete command
pub async fn execute_delete(app: &mut App, args: &DeleteArgs, output_mode: OutputMode) -> Result<()> {
    let id = TaskId::new(args.id);
    app.storage_mut().delete_task(id).await?;
    app.save().await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({ "deleted": id }))?,
        OutputMode::Text => output::success(&format!("Deleted task #{id}")),
    }

    Ok(())
}

/// Execute the dep command
pub async fn execute_dep(app: &mut App, args: &DepArgs, output_mode: OutputMode) -> Result<()> {
    match &args.action {
        DepAction::Add { task, depends_on } => {
            let view = app
                .storage_mut()
                .add_dependency(TaskId::new(*task), TaskId::new(*depends_on))
                .await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => output::print_json(&view)?,
                OutputMode::Text => {
                    output::success(&format!("Task #{task} now depends on #{depends_on}"));
                }
            }
        }
        DepAction::Remove { task, depends_on } => {
            app.storage_mut()
                .remove_dependency(TaskId::new(*task), TaskId::new(*depends_on))
                .await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "removed": { "task": task, "depends_on": depends_on }
                }))?,
                OutputMode::Text => {
                    output::success(&format!("Task #{task} no longer depends on #{depends_on}"));
                }
            }
        }
        DepAction::List { task } => {
            let view = app.storage().dependency_view(TaskId::new(*task)).await?;

            match output_mode {
                OutputMode::Json => output::print_json(&view)?,
                OutputMode::Text => {
                    if view.dependencies.is_empty() && view.dependents.is_empty() {
                        output::info(&format!("Task #{task} has no dependencies"));
                    } else {
                        println!("Task #{task}");
                        println!(
                            "  Depends on:   {}",
                            ids_or_dash(&view.dependencies)
                        );
                        println!(
                            "  Required by:  {}",
                            ids_or_dash(&view.dependents)
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn ids_or_dash(ids: &[TaskId]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Execute the project command
pub async fn execute_project(
    app: &mut App,
    args: &ProjectArgs,
    output_mode: OutputMode,
) -> Result<()> {
    match &args.action {
        ProjectAction::Add {
            name,
            description,
            color,
        } => {
            let new_project = NewProject {
                name: name.clone(),
                description: description.clone(),
                color: color.clone(),
            };

            let project = app.storage_mut().create_project(new_project).await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => output::print_json(&project)?,
                OutputMode::Text => {
                    output::success(&format!("Created project #{}: {}", project.id, project.name));
                }
            }
        }
        ProjectAction::List => {
            let projects = app.storage().list_projects().await?;

            match output_mode {
                OutputMode::Json => {
                    let entries: Vec<_> = projects
                        .iter()
                        .map(|(project, task_count)| {
                            serde_json::json!({
                                "id": project.id,
                                "name": project.name,
                                "description": project.description,
                                "color": project.color,
                                "created_at": project.created_at,
                                "task_count": task_count,
                            })
                        })
                        .collect();
                    output::print_json(&entries)?;
                }
                OutputMode::Text => output::print_project_list(&projects),
            }
        }
        ProjectAction::Update {
            id,
            name,
            description,
            color,
        } => {
            let update = ProjectUpdate {
                name: name.clone(),
                description: description.clone(),
                color: color.clone(),
            };

            let project = app
                .storage_mut()
                .update_project(ProjectId::new(*id), update)
                .await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => output::print_json(&project)?,
                OutputMode::Text => output::success(&format!("Updated project #{}", project.id)),
            }
        }
        ProjectAction::Remove { id } => {
            let project_id = ProjectId::new(*id);
            app.storage_mut().delete_project(project_id).await?;
            app.save().await?;

            match output_mode {
                OutputMode::Json => {
                    output::print_json(&serde_json::json!({ "deleted": project_id }))?;
                }
                OutputMode::Text => output::success(&format!("Deleted project #{project_id}")),
            }
        }
    }

    Ok(())
}
