//! Storage abstraction layer for taskdeps.
//!
//! This module provides the core storage trait and the factory for creating
//! storage backends:
//!
//! - **In-memory**: fast, ephemeral storage backed by HashMap and petgraph
//! - **JSONL**: the in-memory backend with file persistence
//!
//! The trait is async and object-safe, so callers hold a
//! `Box<dyn TaskStorage>` and stay independent of the backend.
//!
//! # Dependency semantics
//!
//! Dependency edges are directed `task -> depends_on` ("task cannot proceed
//! until depends_on is done"). The trait guarantees the edge set stays
//! acyclic: `add_dependency` validates both endpoints, rejects self-loops
//! and duplicates, and consults the cycle guard before inserting, in that
//! order. Deleting a task removes every edge incident to it.

use crate::domain::{
    Dependency, DependencyView, NewProject, NewTask, Project, ProjectId, ProjectUpdate, Task,
    TaskDetail, TaskFilter, TaskId, TaskUpdate,
};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// Storage backend implementations
pub mod in_memory;

/// Core storage trait for projects, tasks, and dependency edges.
///
/// Implementations must be `Send + Sync` to support concurrent access in
/// async contexts, and must serialize each mutation against the reads that
/// validate it (the in-memory backend holds one mutex across the whole
/// operation).
///
/// # Error handling
///
/// All methods return [`Result`]; the error taxonomy is:
/// - not found: `TaskNotFound`, `ProjectNotFound`, `DependencyNotFound`
/// - invalid operation: `SelfDependency`, `CircularDependency`,
///   `ProjectNotEmpty`, `Validation`
/// - conflict: `DependencyExists`, `DuplicateProjectName`
///
/// Every failure is terminal and caller-visible; nothing is retried
/// internally and no error leaves a partial write behind.
#[async_trait]
pub trait TaskStorage: Send + Sync {
    // ========== Projects ==========

    /// Create a new project.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad name or color, `DuplicateProjectName` if the
    /// name is taken.
    async fn create_project(&mut self, project: NewProject) -> Result<Project>;

    /// Get a project by id. Returns `None` if it doesn't exist.
    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>>;

    /// Update an existing project. Only `Some` fields are applied.
    ///
    /// # Errors
    ///
    /// `ProjectNotFound`, `Validation`, or `DuplicateProjectName` when the
    /// new name collides with another project.
    async fn update_project(&mut self, id: ProjectId, updates: ProjectUpdate) -> Result<Project>;

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// `ProjectNotFound`, or `ProjectNotEmpty` while it still owns tasks.
    async fn delete_project(&mut self, id: ProjectId) -> Result<()>;

    /// List all projects with their task counts, ordered by id.
    async fn list_projects(&self) -> Result<Vec<(Project, usize)>>;

    // ========== Tasks ==========

    /// Create a new task.
    ///
    /// A task created without a `project_id` lands in the default project,
    /// which is created on demand.
    ///
    /// # Errors
    ///
    /// `Validation` for a bad title, `ProjectNotFound` for an explicit
    /// project id that doesn't exist.
    async fn create_task(&mut self, task: NewTask) -> Result<Task>;

    /// Get a task by id. Returns `None` if it doesn't exist.
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// Get a task together with its dependency neighborhood.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if the task doesn't exist.
    async fn get_task_detail(&self, id: TaskId) -> Result<TaskDetail>;

    /// Update an existing task. Only `Some` fields are applied.
    ///
    /// # Errors
    ///
    /// `TaskNotFound`, or `Validation` for a bad title.
    async fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> Result<Task>;

    /// Delete a task, cascading removal of every dependency edge where the
    /// task is either endpoint. The edges go first, so no dangling edge can
    /// survive the deletion.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if the task doesn't exist.
    async fn delete_task(&mut self, id: TaskId) -> Result<()>;

    /// List tasks matching the filter, ordered by id.
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// List every task with its dependency neighborhood, ordered by id.
    async fn list_task_details(&self) -> Result<Vec<TaskDetail>>;

    // ========== Dependencies ==========

    /// Record that `task` depends on `depends_on` and return the refreshed
    /// view for `task`.
    ///
    /// Validation order (fixed): existence of `task`, existence of
    /// `depends_on`, self-loop, duplicate, cycle.
    ///
    /// # Errors
    ///
    /// `TaskNotFound`, `SelfDependency`, `DependencyExists`, or
    /// `CircularDependency` per the order above.
    async fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<DependencyView>;

    /// Remove the dependency `task -> depends_on`.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if either task is missing, `DependencyNotFound` if the
    /// edge is missing.
    async fn remove_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<()>;

    /// The dependency neighborhood of a task.
    ///
    /// # Errors
    ///
    /// `TaskNotFound` if the task doesn't exist.
    async fn dependency_view(&self, id: TaskId) -> Result<DependencyView>;

    /// Would adding `task -> depends_on` create a cycle?
    ///
    /// Pure query; nothing is inserted. `true` for the degenerate case
    /// `task == depends_on`.
    async fn would_create_cycle(&self, task: TaskId, depends_on: TaskId) -> Result<bool>;

    /// All stored dependency edges, ordered by edge id.
    async fn list_dependencies(&self) -> Result<Vec<Dependency>>;

    // ========== Persistence ==========

    /// Save state to persistent storage.
    ///
    /// Takes `&self` so saving is possible from shared references;
    /// implementations use interior mutability. A no-op for the plain
    /// in-memory backend.
    async fn save(&self) -> Result<()>;

    /// Reload state from persistent storage, discarding unsaved in-memory
    /// changes. A no-op for the plain in-memory backend.
    async fn reload(&mut self) -> Result<()>;
}

/// Storage backend configuration.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    /// In-memory storage (ephemeral).
    InMemory,

    /// JSONL file storage (persistent).
    Jsonl(PathBuf),
}

impl StorageBackend {
    /// Returns the data file path for file-based backends.
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StorageBackend::Jsonl(path) => Some(path),
            StorageBackend::InMemory => None,
        }
    }
}

/// Wrapper that adds JSONL file persistence to the in-memory backend.
///
/// Delegates everything to the inner store and implements `save()` by
/// writing all records to the JSONL file atomically.
struct JsonlBackedStorage {
    inner: Box<dyn TaskStorage>,
    path: PathBuf,
}

#[async_trait]
impl TaskStorage for JsonlBackedStorage {
    async fn create_project(&mut self, project: NewProject) -> Result<Project> {
        self.inner.create_project(project).await
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>> {
        self.inner.get_project(id).await
    }

    async fn update_project(&mut self, id: ProjectId, updates: ProjectUpdate) -> Result<Project> {
        self.inner.update_project(id, updates).await
    }

    async fn delete_project(&mut self, id: ProjectId) -> Result<()> {
        self.inner.delete_project(id).await
    }

    async fn list_projects(&self) -> Result<Vec<(Project, usize)>> {
        self.inner.list_projects().await
    }

    async fn create_task(&mut self, task: NewTask) -> Result<Task> {
        self.inner.create_task(task).await
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.inner.get_task(id).await
    }

    async fn get_task_detail(&self, id: TaskId) -> Result<TaskDetail> {
        self.inner.get_task_detail(id).await
    }

    async fn update_task(&mut self, id: TaskId, updates: TaskUpdate) -> Result<Task> {
        self.inner.update_task(id, updates).await
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        self.inner.delete_task(id).await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        self.inner.list_tasks(filter).await
    }

    async fn list_task_details(&self) -> Result<Vec<TaskDetail>> {
        self.inner.list_task_details().await
    }

    async fn add_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<DependencyView> {
        self.inner.add_dependency(task, depends_on).await
    }

    async fn remove_dependency(&mut self, task: TaskId, depends_on: TaskId) -> Result<()> {
        self.inner.remove_dependency(task, depends_on).await
    }

    async fn dependency_view(&self, id: TaskId) -> Result<DependencyView> {
        self.inner.dependency_view(id).await
    }

    async fn would_create_cycle(&self, task: TaskId, depends_on: TaskId) -> Result<bool> {
        self.inner.would_create_cycle(task, depends_on).await
    }

    async fn list_dependencies(&self) -> Result<Vec<Dependency>> {
        self.inner.list_dependencies().await
    }

    async fn save(&self) -> Result<()> {
        in_memory::save_to_jsonl(self.inner.as_ref(), &self.path).await
    }

    async fn reload(&mut self) -> Result<()> {
        if self.path.exists() {
            let (store, warnings) = in_memory::load_from_jsonl(&self.path).await?;
            for warning in &warnings {
                tracing::warn!(warning = ?warning, "JSONL reload warning");
            }
            self.inner = store;
        } else {
            // File gone - reset to empty storage
            self.inner = in_memory::new_in_memory_store();
        }
        Ok(())
    }
}

/// Create a storage instance for the given backend.
///
/// # Errors
///
/// `Io` if the data file cannot be read (JSONL backend), `Json`/`Storage`
/// for malformed state that resists even resilient loading.
pub async fn create_storage(backend: StorageBackend) -> Result<Box<dyn TaskStorage>> {
    match backend {
        StorageBackend::InMemory => Ok(in_memory::new_in_memory_store()),
        StorageBackend::Jsonl(path) => {
            let inner = if path.exists() {
                let (store, warnings) = in_memory::load_from_jsonl(&path).await?;
                for warning in &warnings {
                    // Log but continue - storage is still usable
                    tracing::warn!(warning = ?warning, "JSONL load warning");
                }
                store
            } else {
                // First run - start empty
                in_memory::new_in_memory_store()
            };
            Ok(Box::new(JsonlBackedStorage { inner, path }))
        }
    }
}
