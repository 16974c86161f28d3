//! Core in-memory store data structures.
//!
//! This module contains the inner store that holds projects, tasks, and the
//! dependency edge set. It is wrapped in `Arc<Mutex<>>` for thread safety.
//!
//! The edge-set methods here are dumb storage: they know nothing about
//! cycles. Cycle prevention lives in the service layer (`trait_impl.rs`),
//! which consults the guard in `graph.rs` before every insert.

use crate::domain::{
    Dependency, DependencyView, Project, ProjectId, Task, TaskId, DEFAULT_PROJECT_COLOR,
    DEFAULT_PROJECT_ID, DEFAULT_PROJECT_NAME,
};
use crate::error::{Error, Result};
use chrono::Utc;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::HashMap;

/// Inner store structure (not thread-safe on its own).
///
/// # Graph representation
///
/// The dependency graph is a `StableDiGraph` with edges directed from
/// **dependent to prerequisite** (source depends on target) and the edge id
/// as weight. A stable graph is used so that removing a task's node does not
/// invalidate the indices held in `node_map`.
pub(crate) struct InMemoryStoreInner {
    /// Projects indexed by id.
    pub(super) projects: HashMap<ProjectId, Project>,

    /// Tasks indexed by id.
    pub(super) tasks: HashMap<TaskId, Task>,

    /// Dependency graph. Nodes carry `TaskId`, edges carry the edge id.
    pub(super) graph: StableDiGraph<TaskId, u64>,

    /// Mapping from task id to graph node index. Every task in `self.tasks`
    /// has exactly one entry here.
    pub(super) node_map: HashMap<TaskId, NodeIndex>,

    /// Next project id to hand out. Starts at 2: id 1 is reserved for the
    /// default project.
    pub(super) next_project_id: u64,

    /// Next task id to hand out.
    pub(super) next_task_id: u64,

    /// Next dependency-edge id to hand out.
    pub(super) next_edge_id: u64,
}

impl InMemoryStoreInner {
    /// Create a new empty store.
    pub(crate) fn new() -> Self {
        Self {
            projects: HashMap::new(),
            tasks: HashMap::new(),
            graph: StableDiGraph::new(),
            node_map: HashMap::new(),
            next_project_id: DEFAULT_PROJECT_ID.value() + 1,
            next_task_id: 1,
            next_edge_id: 1,
        }
    }

    /// Allocate the next project id.
    pub(super) fn alloc_project_id(&mut self) -> ProjectId {
        let id = ProjectId::new(self.next_project_id);
        self.next_project_id += 1;
        id
    }

    /// Allocate the next task id.
    pub(super) fn alloc_task_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_task_id);
        self.next_task_id += 1;
        id
    }

    /// Return the default project's id, creating the project if needed.
    ///
    /// Id 1 is reserved for this project. If a project with the default name
    /// already exists under a different id, that project is used instead so
    /// the unique-name invariant holds.
    pub(super) fn ensure_default_project(&mut self) -> ProjectId {
        if self.projects.contains_key(&DEFAULT_PROJECT_ID) {
            return DEFAULT_PROJECT_ID;
        }
        if let Some(project) = self
            .projects
            .values()
            .find(|p| p.name == DEFAULT_PROJECT_NAME)
        {
            return project.id;
        }

        self.projects.insert(
            DEFAULT_PROJECT_ID,
            Project {
                id: DEFAULT_PROJECT_ID,
                name: DEFAULT_PROJECT_NAME.to_string(),
                description: Some("Automatically created default project".to_string()),
                color: DEFAULT_PROJECT_COLOR.to_string(),
                created_at: Utc::now(),
            },
        );
        DEFAULT_PROJECT_ID
    }

    /// Register a task in the graph, returning its node index.
    pub(super) fn add_task_node(&mut self, id: TaskId) -> NodeIndex {
        let node = self.graph.add_node(id);
        self.node_map.insert(id, node);
        node
    }

    /// Resolve a task id to its graph node.
    pub(super) fn node(&self, id: TaskId) -> Result<NodeIndex> {
        self.node_map
            .get(&id)
            .copied()
            .ok_or(Error::TaskNotFound(id))
    }

    // ========== Edge-set primitives ==========

    /// All tasks that `id` depends on (outgoing edges). Empty if none.
    pub(super) fn outgoing(&self, id: TaskId) -> Result<Vec<TaskId>> {
        let node = self.node(id)?;
        Ok(self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n])
            .collect())
    }

    /// All tasks that depend on `id` (incoming edges). Empty if none.
    pub(super) fn incoming(&self, id: TaskId) -> Result<Vec<TaskId>> {
        let node = self.node(id)?;
        Ok(self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|n| self.graph[n])
            .collect())
    }

    /// Whether the edge `task -> depends_on` is stored.
    ///
    /// Returns false when either endpoint is unknown.
    pub(super) fn edge_exists(&self, task: TaskId, depends_on: TaskId) -> bool {
        match (self.node_map.get(&task), self.node_map.get(&depends_on)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Insert the edge `task -> depends_on`.
    ///
    /// Fails if either endpoint is unknown or the pair is already stored.
    /// No cycle check happens here; callers must consult the guard first.
    pub(super) fn insert_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<Dependency> {
        let from = self.node(task)?;
        let to = self.node(depends_on)?;
        if self.graph.find_edge(from, to).is_some() {
            return Err(Error::DependencyExists { task, depends_on });
        }

        let id = self.next_edge_id;
        self.next_edge_id += 1;
        self.graph.add_edge(from, to, id);

        Ok(Dependency {
            id,
            task_id: task,
            depends_on_id: depends_on,
        })
    }

    /// Remove the edge `task -> depends_on`.
    pub(super) fn remove_edge(&mut self, task: TaskId, depends_on: TaskId) -> Result<()> {
        let from = self.node(task)?;
        let to = self.node(depends_on)?;
        let edge = self
            .graph
            .find_edge(from, to)
            .ok_or(Error::DependencyNotFound { task, depends_on })?;
        self.graph.remove_edge(edge);
        Ok(())
    }

    /// Remove every edge where `id` is either endpoint.
    ///
    /// Idempotent: unknown tasks and edgeless tasks remove nothing. Returns
    /// the number of edges removed.
    pub(super) fn remove_incident_edges(&mut self, id: TaskId) -> usize {
        let Some(&node) = self.node_map.get(&id) else {
            return 0;
        };

        let edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .chain(self.graph.edges_directed(node, Direction::Incoming))
            .map(|edge| petgraph::visit::EdgeRef::id(&edge))
            .collect();

        let count = edges.len();
        for edge in edges {
            self.graph.remove_edge(edge);
        }
        count
    }

    /// Remove a task's node from the graph.
    ///
    /// Any incident edges still present are removed along with the node;
    /// callers that need the cascade accounted for should call
    /// [`Self::remove_incident_edges`] first.
    pub(super) fn remove_task_node(&mut self, id: TaskId) {
        if let Some(node) = self.node_map.remove(&id) {
            self.graph.remove_node(node);
        }
    }

    /// The dependency neighborhood of `id`, with both sequences sorted by
    /// id for deterministic output. Consumers must not rely on the order.
    pub(super) fn dependency_view(&self, id: TaskId) -> Result<DependencyView> {
        let mut dependencies = self.outgoing(id)?;
        let mut dependents = self.incoming(id)?;
        dependencies.sort_unstable();
        dependents.sort_unstable();
        Ok(DependencyView {
            dependencies,
            dependents,
        })
    }

    /// All stored dependency edges, sorted by edge id.
    pub(super) fn all_edges(&self) -> Vec<Dependency> {
        let mut edges: Vec<Dependency> = self
            .graph
            .edge_indices()
            .map(|idx| {
                let (from, to) = self
                    .graph
                    .edge_endpoints(idx)
                    .expect("edge index from edge_indices is valid");
                Dependency {
                    id: self.graph[idx],
                    task_id: self.graph[from],
                    depends_on_id: self.graph[to],
                }
            })
            .collect();
        edges.sort_unstable_by_key(|e| e.id);
        edges
    }

    /// Number of tasks owned by `project`.
    pub(super) fn task_count(&self, project: ProjectId) -> usize {
        self.tasks
            .values()
            .filter(|t| t.project_id == project)
            .count()
    }

    /// Find a project by name, excluding `exclude` (for rename checks).
    pub(super) fn project_by_name(&self, name: &str, exclude: Option<ProjectId>) -> Option<&Project> {
        self.projects
            .values()
            .find(|p| p.name == name && Some(p.id) != exclude)
    }

    /// Register a task record and its graph node. Used by the JSONL loader.
    pub(super) fn import_task(&mut self, task: Task) {
        let id = task.id;
        self.next_task_id = self.next_task_id.max(id.value() + 1);
        self.tasks.insert(id, task);
        self.add_task_node(id);
    }

    /// Register a project record. Used by the JSONL loader.
    pub(super) fn import_project(&mut self, project: Project) {
        let id = project.id;
        self.next_project_id = self.next_project_id.max(id.value() + 1);
        self.projects.insert(id, project);
    }
}
