//! TaskStorage trait implementation for the in-memory store.
//!
//! This is where request-level orchestration happens: ordered validation
//! for dependency edits, the cycle guard consultation, and the edge cascade
//! on task deletion. Each method holds the store lock for its whole
//! read-validate-write sequence, so concurrent mutations are serialized and
//! two overlapping inserts can never jointly produce a cycle.

use super::graph::would_create_cycle_impl;
use super::InMemoryStore;
use crate::domain::{
    validate_color, validate_project_name, validate_title, Dependency, DependencyView, NewProject,
    NewTask, Project, ProjectId, ProjectUpdate, Task, TaskDetail, TaskFilter, TaskId, TaskUpdate,
    DEFAULT_PROJECT_COLOR,
};
use crate::error::{Error, Result};
use crate::storage::TaskStorage;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl TaskStorage for InMemoryStore {
    // ========== Projects ==========

    async fn create_project(&mut self, new_project: NewProject) -> Result<Project> {
        let mut inner = self.lock().await;

        new_project.validate().map_err(Error::Validation)?;

        let name = new_project.name.trim().to_string();
        if inner.project_by_name(&name, None).is_some() {
            return Err(Error::DuplicateProjectName(name));
        }

        let id = inner.alloc_project_id();
        let project = Project {
            id,
            name,
            description: new_project.description,
            color: new_project
                .color
                .unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            created_at: Utc::now(),
        };

        inner.projects.insert(id, project.clone());
        tracing::debug!(project = %id, name = %project.name, "created project");
        Ok(project)
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>> {
        let inner = self.lock().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn update_project(&mut self, id: ProjectId, updates: ProjectUpdate) -> Result<Project> {
        let mut inner = self.lock().await;

        if !inner.projects.contains_key(&id) {
            return Err(Error::ProjectNotFound(id));
        }

        if let Some(name) = &updates.name {
            validate_project_name(name).map_err(Error::Validation)?;
            if inner.project_by_name(name.trim(), Some(id)).is_some() {
                return Err(Error::DuplicateProjectName(name.trim().to_string()));
            }
        }
        if let Some(color) = &updates.color {
            validate_color(color).map_err(Error::Validation)?;
        }

        let project = inner
            .projects
            .get_mut(&id)
            .ok_or(Error::ProjectNotFound(id))?;

        if let Some(name) = updates.name {
            project.name = name.trim().to_string();
        }
        if let Some(description) = updates.description {
            project.description = Some(description);
        }
        if let Some(color) = updates.color {
            project.color = color;
        }

        Ok(project.clone())
    }

    async fn delete_project(&mut self, id: ProjectId) -> Result<()> {
        let mut inner = self.lock().await;

        if !inner.projects.contains_key(&id) {
            return Err(Error::ProjectNotFound(id));
        }

        let task_count = inner.task_count(id);
        if task_count > 0 {
            return Err(Error::ProjectNotEmpty {
                project: id,
                task_count,
            });
        }

        inner.projects.remove(&id);
        tracing::debug!(project = %id, "deleted project");
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<(Project, usize)>> {
        let inner = self.lock().await;

        let mut projects: Vec<(Project, usize)> = inner
            .projects
            .values()
            .map(|p| (p.clone(), inner.task_count(p.id)))
            .collect();
        projects.sort_unstable_by_key(|(p, _)| p.id);
        Ok(projects)
    }

    // ========== Tasks ==========

    async fn create_task(&mut self, new_task: NewTask) -> Result<Task> {
        let mut inner = self.lock().await;

        new_task.validate().map_err(Error::Validation)?;

        // Resolve the owning project: an explicit id must exist, no id
        // targets the default project (created on demand).
        let project_id = match new_task.project_id {
            Some(id) => {
                if !inner.projects.contains_key(&id) {
                    return Err(Error::ProjectNotFound(id));
                }
                id
            }
            None => inner.ensure_default_project(),
        };

        let id = inner.alloc_task_id();
        let task = Task {
            id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            project_id,
            created_at: Utc::now(),
        };

        inner.tasks.insert(id, task.clone());
        inner.add_task_node(id);
        tracing::debug!(task = %id, project = %project_id, "created task");
        Ok(task)
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        let inner = self.lock().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn get_task_detail(&self, id: TaskId) -> Result<TaskDetail> {
        let inner = self.lock().await;

        let task = inner.tasks.get(&id).ok_or(Error::TaskNotFound(id))?.clone();
        let view = inner.dependency_view(id)?;
        Ok(TaskDetail {
            task,
            dependencies: view.dependencies,
            dependents: view.dependents,
        })
    }

    async fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> Result<Task> {
        let mut inner = self.lock().await;

        if let Some(title) = &updates.title {
            validate_title(title).map_err(Error::Validation)?;
        }

        let task = inner.tasks.get_mut(&id).ok_or(Error::TaskNotFound(id))?;

        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(description) = updates.description {
            task.description = Some(description);
        }
        if let Some(status) = updates.status {
            task.status = status;
        }

        Ok(task.clone())
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        let mut inner = self.lock().await;

        if !inner.tasks.contains_key(&id) {
            return Err(Error::TaskNotFound(id));
        }

        // Cascade: drop every edge touching this task before the record
        // goes away, so no dangling edge can survive.
        let removed = inner.remove_incident_edges(id);
        inner.remove_task_node(id);
        inner.tasks.remove(&id);

        tracing::debug!(task = %id, edges_removed = removed, "deleted task");
        Ok(())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let inner = self.lock().await;

        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|task| {
                if let Some(project) = filter.project {
                    if task.project_id != project {
                        return false;
                    }
                }
                if let Some(status) = filter.status {
                    if task.status != status {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        tasks.sort_unstable_by_key(|t| t.id);

        if let Some(limit) = filter.limit {
            tasks.truncate(limit);
        }

        Ok(tasks)
    }

    async fn list_task_details(&self) -> Result<Vec<TaskDetail>> {
        let inner = self.lock().await;

        let mut tasks: Vec<Task> = inner.tasks.values().cloned().collect();
        tasks.sort_unstable_by_key(|t| t.id);

        tasks
            .into_iter()
            .map(|task| {
                let view = inner.dependency_view(task.id)?;
                Ok(TaskDetail {
                    task,
                    dependencies: view.dependencies,
                    dependents: view.dependents,
                })
            })
            .collect()
    }

    // ========== Dependencies ==========

    async fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<DependencyView> {
        let mut inner = self.lock().await;

        // Validation order is part of the contract: a missing task is a more
        // fundamental problem than a self-loop, a self-loop than a
        // duplicate, a duplicate than a cycle.
        if !inner.tasks.contains_key(&task) {
            return Err(Error::TaskNotFound(task));
        }
        if !inner.tasks.contains_key(&depends_on) {
            return Err(Error::TaskNotFound(depends_on));
        }
        if task == depends_on {
            return Err(Error::SelfDependency(task));
        }
        if inner.edge_exists(task, depends_on) {
            return Err(Error::DependencyExists { task, depends_on });
        }
        if would_create_cycle_impl(&inner.graph, &inner.node_map, task, depends_on)? {
            return Err(Error::CircularDependency { task, depends_on });
        }

        inner.insert_edge(task, depends_on)?;
        tracing::debug!(task = %task, depends_on = %depends_on, "added dependency");

        inner.dependency_view(task)
    }

    async fn remove_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<()> {
        let mut inner = self.lock().await;

        if !inner.tasks.contains_key(&task) {
            return Err(Error::TaskNotFound(task));
        }
        if !inner.tasks.contains_key(&depends_on) {
            return Err(Error::TaskNotFound(depends_on));
        }

        inner.remove_edge(task, depends_on)?;
        tracing::debug!(task = %task, depends_on = %depends_on, "removed dependency");
        Ok(())
    }

    async fn dependency_view(&self, id: TaskId) -> Result<DependencyView> {
        let inner = self.lock().await;

        if !inner.tasks.contains_key(&id) {
            return Err(Error::TaskNotFound(id));
        }
        inner.dependency_view(id)
    }

    async fn would_create_cycle(&self, task: TaskId, depends_on: TaskId) -> Result<bool> {
        let inner = self.lock().await;
        would_create_cycle_impl(&inner.graph, &inner.node_map, task, depends_on)
    }

    async fn list_dependencies(&self) -> Result<Vec<Dependency>> {
        let inner = self.lock().await;
        Ok(inner.all_edges())
    }

    // ========== Persistence ==========

    async fn save(&self) -> Result<()> {
        // Plain in-memory storage has no backing file; the JSONL wrapper
        // overrides this.
        Ok(())
    }

    async fn reload(&mut self) -> Result<()> {
        Ok(())
    }
}
