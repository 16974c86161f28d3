//! Integration tests for the in-memory storage backend.
//!
//! These tests exercise the full `TaskStorage` trait surface: task and
//! project lifecycles, dependency edge management, and the acyclicity
//! guarantees of the dependency graph.

use taskdeps::domain::{
    NewProject, NewTask, ProjectId, ProjectUpdate, TaskFilter, TaskId, TaskStatus, TaskUpdate,
    DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME,
};
use taskdeps::error::Error;
use taskdeps::storage::{in_memory::new_in_memory_store, TaskStorage};

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        ..Default::default()
    }
}

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        ..Default::default()
    }
}

/// Build a store holding `n` tasks and return their ids.
async fn store_with_tasks(n: usize) -> (Box<dyn TaskStorage>, Vec<TaskId>) {
    let mut storage = new_in_memory_store();
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let task = storage
            .create_task(new_task(&format!("task {}", i + 1)))
            .await
            .unwrap();
        ids.push(task.id);
    }
    (storage, ids)
}

// ============================================================================
// Task Lifecycle
// ============================================================================

#[tokio::test]
async fn create_task_uses_defaults() {
    let mut storage = new_in_memory_store();

    let task = storage.create_task(new_task("first")).await.unwrap();

    assert_eq!(task.id, TaskId::new(1));
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.project_id, DEFAULT_PROJECT_ID);
    assert!(task.description.is_none());
}

#[tokio::test]
async fn create_task_spawns_default_project_on_demand() {
    let mut storage = new_in_memory_store();
    assert!(storage.list_projects().await.unwrap().is_empty());

    storage.create_task(new_task("first")).await.unwrap();

    let projects = storage.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].0.id, DEFAULT_PROJECT_ID);
    assert_eq!(projects[0].0.name, DEFAULT_PROJECT_NAME);
    assert_eq!(projects[0].1, 1);
}

#[tokio::test]
async fn create_task_with_unknown_project_fails() {
    let mut storage = new_in_memory_store();

    let result = storage
        .create_task(NewTask {
            title: "orphan".to_string(),
            project_id: Some(ProjectId::new(42)),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(Error::ProjectNotFound(id)) if id == ProjectId::new(42)));
}

#[tokio::test]
async fn create_task_rejects_blank_title() {
    let mut storage = new_in_memory_store();

    let result = storage.create_task(new_task("   ")).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn get_missing_task_returns_none() {
    let storage = new_in_memory_store();
    assert!(storage.get_task(TaskId::new(99)).await.unwrap().is_none());
}

#[tokio::test]
async fn update_task_applies_only_some_fields() {
    let (mut storage, ids) = store_with_tasks(1).await;

    let updated = storage
        .update_task(
            ids[0],
            TaskUpdate {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "task 1");
    assert_eq!(updated.status, TaskStatus::InProgress);
}

#[tokio::test]
async fn update_task_rejects_bad_title_without_side_effects() {
    let (mut storage, ids) = store_with_tasks(1).await;

    let result = storage
        .update_task(
            ids[0],
            TaskUpdate {
                title: Some("  ".to_string()),
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));

    // The rejected update must not have applied the status change either
    let task = storage.get_task(ids[0]).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
}

#[tokio::test]
async fn update_missing_task_fails() {
    let mut storage = new_in_memory_store();

    let result = storage
        .update_task(TaskId::new(7), TaskUpdate::default())
        .await;
    assert!(matches!(result, Err(Error::TaskNotFound(id)) if id == TaskId::new(7)));
}

#[tokio::test]
async fn delete_missing_task_fails() {
    let mut storage = new_in_memory_store();

    let result = storage.delete_task(TaskId::new(7)).await;
    assert!(matches!(result, Err(Error::TaskNotFound(_))));
}

#[tokio::test]
async fn task_ids_are_not_reused_after_delete() {
    let (mut storage, ids) = store_with_tasks(2).await;

    storage.delete_task(ids[1]).await.unwrap();
    let next = storage.create_task(new_task("third")).await.unwrap();

    assert_eq!(next.id, TaskId::new(3));
}

// ============================================================================
// Listing and Filtering
// ============================================================================

#[tokio::test]
async fn list_tasks_is_ordered_by_id() {
    let (storage, ids) = store_with_tasks(3).await;

    let tasks = storage.list_tasks(&TaskFilter::default()).await.unwrap();
    let listed: Vec<_> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn list_tasks_filters_by_status() {
    let (mut storage, ids) = store_with_tasks(3).await;
    storage
        .update_task(
            ids[1],
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let completed = storage
        .list_tasks(&TaskFilter {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, ids[1]);
}

#[tokio::test]
async fn list_tasks_filters_by_project() {
    let mut storage = new_in_memory_store();
    let project = storage.create_project(new_project("Work")).await.unwrap();

    storage.create_task(new_task("default")).await.unwrap();
    let in_project = storage
        .create_task(NewTask {
            title: "work item".to_string(),
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();

    let tasks = storage
        .list_tasks(&TaskFilter {
            project: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, in_project.id);
}

#[tokio::test]
async fn list_tasks_honors_limit() {
    let (storage, _) = store_with_tasks(5).await;

    let tasks = storage
        .list_tasks(&TaskFilter {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, TaskId::new(1));
}

#[tokio::test]
async fn list_task_details_includes_neighborhoods() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    let details = storage.list_task_details().await.unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].dependents, vec![ids[1]]);
    assert_eq!(details[1].dependencies, vec![ids[0]]);
}

// ============================================================================
// Dependencies
// ============================================================================

#[tokio::test]
async fn add_dependency_returns_refreshed_view() {
    let (mut storage, ids) = store_with_tasks(2).await;

    let view = storage.add_dependency(ids[1], ids[0]).await.unwrap();

    assert_eq!(view.dependencies, vec![ids[0]]);
    assert!(view.dependents.is_empty());
}

#[tokio::test]
async fn add_dependency_validates_task_before_prerequisite() {
    let (mut storage, ids) = store_with_tasks(1).await;

    // Both endpoints missing: the dependent is reported first
    let result = storage
        .add_dependency(TaskId::new(50), TaskId::new(60))
        .await;
    assert!(matches!(result, Err(Error::TaskNotFound(id)) if id == TaskId::new(50)));

    let result = storage.add_dependency(ids[0], TaskId::new(60)).await;
    assert!(matches!(result, Err(Error::TaskNotFound(id)) if id == TaskId::new(60)));
}

#[tokio::test]
async fn add_dependency_rejects_self_loop() {
    let (mut storage, ids) = store_with_tasks(1).await;

    let result = storage.add_dependency(ids[0], ids[0]).await;
    assert!(matches!(result, Err(Error::SelfDependency(id)) if id == ids[0]));
}

#[tokio::test]
async fn add_dependency_rejects_duplicate() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    let result = storage.add_dependency(ids[1], ids[0]).await;
    assert!(matches!(result, Err(Error::DependencyExists { .. })));
}

#[tokio::test]
async fn add_dependency_rejects_two_node_cycle() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    let result = storage.add_dependency(ids[0], ids[1]).await;
    assert!(matches!(result, Err(Error::CircularDependency { .. })));
}

#[tokio::test]
async fn add_dependency_rejects_transitive_cycle() {
    // Chain: 2 depends on 1, 3 depends on 2. Closing 1 -> 3 must fail.
    let (mut storage, ids) = store_with_tasks(3).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();
    storage.add_dependency(ids[2], ids[1]).await.unwrap();

    let result = storage.add_dependency(ids[0], ids[2]).await;
    assert!(matches!(result, Err(Error::CircularDependency { task, depends_on })
        if task == ids[0] && depends_on == ids[2]));

    // The failed attempt must not have inserted anything
    let view = storage.dependency_view(ids[0]).await.unwrap();
    assert!(view.dependencies.is_empty());
}

#[tokio::test]
async fn diamond_dependencies_are_allowed() {
    // 4 -> {2, 3}, {2, 3} -> 1: multiple paths but no cycle
    let (mut storage, ids) = store_with_tasks(4).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();
    storage.add_dependency(ids[2], ids[0]).await.unwrap();
    storage.add_dependency(ids[3], ids[1]).await.unwrap();
    storage.add_dependency(ids[3], ids[2]).await.unwrap();

    let view = storage.dependency_view(ids[3]).await.unwrap();
    assert_eq!(view.dependencies, vec![ids[1], ids[2]]);
}

#[tokio::test]
async fn would_create_cycle_is_a_pure_query() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    // The converse edge would close a cycle; asking doesn't insert it
    assert!(storage.would_create_cycle(ids[0], ids[1]).await.unwrap());
    assert!(storage.would_create_cycle(ids[0], ids[0]).await.unwrap());
    assert!(!storage.would_create_cycle(ids[1], ids[0]).await.unwrap());

    let edges = storage.list_dependencies().await.unwrap();
    assert_eq!(edges.len(), 1);
}

#[tokio::test]
async fn remove_dependency_is_not_idempotent() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    storage.remove_dependency(ids[1], ids[0]).await.unwrap();

    let result = storage.remove_dependency(ids[1], ids[0]).await;
    assert!(matches!(result, Err(Error::DependencyNotFound { .. })));
}

#[tokio::test]
async fn removed_edge_frees_the_cycle_check() {
    let (mut storage, ids) = store_with_tasks(2).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();
    storage.remove_dependency(ids[1], ids[0]).await.unwrap();

    // With the edge gone, the converse direction is fine
    storage.add_dependency(ids[0], ids[1]).await.unwrap();
}

#[tokio::test]
async fn delete_task_cascades_incident_edges() {
    // 2 -> 1 and 3 -> 2; deleting 2 removes both edges
    let (mut storage, ids) = store_with_tasks(3).await;
    storage.add_dependency(ids[1], ids[0]).await.unwrap();
    storage.add_dependency(ids[2], ids[1]).await.unwrap();

    storage.delete_task(ids[1]).await.unwrap();

    assert!(storage.list_dependencies().await.unwrap().is_empty());
    let view = storage.dependency_view(ids[2]).await.unwrap();
    assert!(view.dependencies.is_empty());
    let view = storage.dependency_view(ids[0]).await.unwrap();
    assert!(view.dependents.is_empty());
}

#[tokio::test]
async fn dependency_view_for_missing_task_fails() {
    let storage = new_in_memory_store();

    let result = storage.dependency_view(TaskId::new(1)).await;
    assert!(matches!(result, Err(Error::TaskNotFound(_))));
}

#[tokio::test]
async fn list_dependencies_is_ordered_by_edge_id() {
    let (mut storage, ids) = store_with_tasks(3).await;
    storage.add_dependency(ids[2], ids[0]).await.unwrap();
    storage.add_dependency(ids[1], ids[0]).await.unwrap();

    let edges = storage.list_dependencies().await.unwrap();
    assert_eq!(edges.len(), 2);
    assert!(edges[0].id < edges[1].id);
    assert_eq!(edges[0].task_id, ids[2]);
    assert_eq!(edges[1].task_id, ids[1]);
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn create_project_assigns_ids_above_the_default() {
    let mut storage = new_in_memory_store();

    let project = storage.create_project(new_project("Work")).await.unwrap();

    // Id 1 is reserved for the default project
    assert_eq!(project.id, ProjectId::new(2));
    assert_eq!(project.color, taskdeps::domain::DEFAULT_PROJECT_COLOR);
}

#[tokio::test]
async fn create_project_rejects_duplicate_name() {
    let mut storage = new_in_memory_store();
    storage.create_project(new_project("Work")).await.unwrap();

    let result = storage.create_project(new_project("Work")).await;
    assert!(matches!(result, Err(Error::DuplicateProjectName(name)) if name == "Work"));
}

#[tokio::test]
async fn update_project_rejects_name_collision() {
    let mut storage = new_in_memory_store();
    storage.create_project(new_project("Work")).await.unwrap();
    let other = storage.create_project(new_project("Home")).await.unwrap();

    let result = storage
        .update_project(
            other.id,
            ProjectUpdate {
                name: Some("Work".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(Error::DuplicateProjectName(_))));

    // Renaming to its own current name is fine
    let renamed = storage
        .update_project(
            other.id,
            ProjectUpdate {
                name: Some("Home".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Home");
}

#[tokio::test]
async fn delete_project_refuses_while_tasks_remain() {
    let mut storage = new_in_memory_store();
    let project = storage.create_project(new_project("Work")).await.unwrap();
    let task = storage
        .create_task(NewTask {
            title: "work item".to_string(),
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();

    let result = storage.delete_project(project.id).await;
    assert!(matches!(
        result,
        Err(Error::ProjectNotEmpty { task_count: 1, .. })
    ));

    storage.delete_task(task.id).await.unwrap();
    storage.delete_project(project.id).await.unwrap();
    assert!(storage.get_project(project.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_projects_reports_task_counts() {
    let mut storage = new_in_memory_store();
    let work = storage.create_project(new_project("Work")).await.unwrap();
    storage.create_project(new_project("Home")).await.unwrap();

    for title in ["a", "b"] {
        storage
            .create_task(NewTask {
                title: title.to_string(),
                project_id: Some(work.id),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let projects = storage.list_projects().await.unwrap();
    assert_eq!(projects.len(), 2);
    let counts: Vec<_> = projects
        .iter()
        .map(|(p, count)| (p.name.clone(), *count))
        .collect();
    assert!(counts.contains(&("Work".to_string(), 2)));
    assert!(counts.contains(&("Home".to_string(), 0)));
}
