//! JSONL persistence for the in-memory store.
//!
//! The whole store is serialized to one JSON-Lines file. Each line is a
//! tagged record: a project, a task, or a dependency edge. Saving is atomic
//! (write to a sibling temp file, then rename); loading is resilient — bad
//! lines and records that would violate an invariant are skipped or repaired
//! and reported as [`LoadWarning`] values instead of failing the load.

use super::graph::would_create_cycle_impl;
use super::inner::InMemoryStoreInner;
use crate::domain::{validate_title, Dependency, Project, ProjectId, Task, TaskId};
use crate::error::{Error, Result};
use crate::storage::TaskStorage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// One line of the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    /// A project record.
    Project(Project),
    /// A task record.
    Task(Task),
    /// A dependency-edge record.
    Dependency(Dependency),
}

/// Non-fatal problems encountered while loading a JSONL file.
///
/// Loading continues past each of these; the problematic data is skipped or
/// repaired. Callers should surface them (taskdeps logs them via
/// `tracing::warn!`) since they indicate a hand-edited or corrupted file.
#[derive(Debug, Clone)]
pub enum LoadWarning {
    /// A line that could not be parsed as a record. The line is skipped.
    MalformedJson {
        /// 1-based line number in the file.
        line_number: usize,
        /// Parser error message.
        error: String,
    },

    /// A task whose title or fields fail validation. The task is skipped.
    InvalidTask {
        /// Id of the skipped task.
        task_id: TaskId,
        /// Validation error message.
        error: String,
    },

    /// A task referencing a project that is not in the file. The task is
    /// kept and reassigned to the default project.
    UnknownProject {
        /// The task that was reassigned.
        task_id: TaskId,
        /// The project id that did not resolve.
        project_id: ProjectId,
    },

    /// An edge whose endpoint task is not in the file. The edge is skipped.
    OrphanedDependency {
        /// The dependent end of the skipped edge.
        task_id: TaskId,
        /// The prerequisite end of the skipped edge.
        depends_on_id: TaskId,
    },

    /// An edge from a task to itself. The edge is skipped.
    SelfDependency {
        /// The offending task.
        task_id: TaskId,
    },

    /// An edge that repeats an already-loaded ordered pair. Skipped.
    DuplicateDependency {
        /// The dependent end of the skipped edge.
        task_id: TaskId,
        /// The prerequisite end of the skipped edge.
        depends_on_id: TaskId,
    },

    /// An edge that would close a cycle with already-loaded edges. Skipped
    /// to keep the acyclicity invariant.
    CircularDependency {
        /// The dependent end of the skipped edge.
        task_id: TaskId,
        /// The prerequisite end of the skipped edge.
        depends_on_id: TaskId,
    },
}

/// Load a store from a JSONL file.
///
/// Records are applied in three passes (projects, then tasks, then edges) so
/// that forward references within the file do not matter. Id counters resume
/// above the highest id seen.
///
/// Returns the store and all non-fatal warnings.
pub async fn load_from_jsonl(path: &Path) -> Result<(Box<dyn TaskStorage>, Vec<LoadWarning>)> {
    let content = tokio::fs::read_to_string(path).await?;

    let mut warnings = Vec::new();
    let mut projects = Vec::new();
    let mut tasks = Vec::new();
    let mut edges = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(line) {
            Ok(Record::Project(project)) => projects.push(project),
            Ok(Record::Task(task)) => tasks.push(task),
            Ok(Record::Dependency(edge)) => edges.push(edge),
            Err(error) => warnings.push(LoadWarning::MalformedJson {
                line_number: index + 1,
                error: error.to_string(),
            }),
        }
    }

    let mut inner = InMemoryStoreInner::new();

    // Pass 1: projects
    for project in projects {
        inner.import_project(project);
    }

    // Pass 2: tasks; unknown projects are repaired the way the original
    // data migration did, by reassigning to the default project
    for mut task in tasks {
        if let Err(error) = validate_title(&task.title) {
            warnings.push(LoadWarning::InvalidTask {
                task_id: task.id,
                error,
            });
            continue;
        }
        if !inner.projects.contains_key(&task.project_id) {
            warnings.push(LoadWarning::UnknownProject {
                task_id: task.id,
                project_id: task.project_id,
            });
            task.project_id = inner.ensure_default_project();
        }
        inner.import_task(task);
    }

    // Pass 3: edges, re-checking every invariant the service enforces
    for edge in edges {
        if !inner.node_map.contains_key(&edge.task_id)
            || !inner.node_map.contains_key(&edge.depends_on_id)
        {
            warnings.push(LoadWarning::OrphanedDependency {
                task_id: edge.task_id,
                depends_on_id: edge.depends_on_id,
            });
            continue;
        }
        if edge.task_id == edge.depends_on_id {
            warnings.push(LoadWarning::SelfDependency {
                task_id: edge.task_id,
            });
            continue;
        }
        if inner.edge_exists(edge.task_id, edge.depends_on_id) {
            warnings.push(LoadWarning::DuplicateDependency {
                task_id: edge.task_id,
                depends_on_id: edge.depends_on_id,
            });
            continue;
        }
        if would_create_cycle_impl(
            &inner.graph,
            &inner.node_map,
            edge.task_id,
            edge.depends_on_id,
        )? {
            warnings.push(LoadWarning::CircularDependency {
                task_id: edge.task_id,
                depends_on_id: edge.depends_on_id,
            });
            continue;
        }

        let from = inner.node_map[&edge.task_id];
        let to = inner.node_map[&edge.depends_on_id];
        inner.graph.add_edge(from, to, edge.id);
        inner.next_edge_id = inner.next_edge_id.max(edge.id + 1);
    }

    Ok((Box::new(Arc::new(Mutex::new(inner))), warnings))
}

/// Save a store to a JSONL file with an atomic write.
///
/// Records are written projects first, then tasks, then edges, each group
/// ordered by id, so repeated saves of the same state produce byte-identical
/// files. The data is written to a `.tmp` sibling and renamed into place, so
/// an interrupted save leaves the previous file intact.
pub async fn save_to_jsonl(storage: &dyn TaskStorage, path: &Path) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path).await?;
    let mut writer = BufWriter::new(file);

    let projects = storage.list_projects().await?;
    let tasks = storage.list_tasks(&Default::default()).await?;
    let edges = storage.list_dependencies().await?;

    let records = projects
        .into_iter()
        .map(|(project, _)| Record::Project(project))
        .chain(tasks.into_iter().map(Record::Task))
        .chain(edges.into_iter().map(Record::Dependency));

    for record in records {
        let json = serde_json::to_string(&record)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    tokio::fs::rename(&temp_path, path).await.map_err(Error::Io)?;

    Ok(())
}
