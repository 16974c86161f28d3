//! Cycle detection for the dependency graph.
//!
//! The guard here is a pure decision function over the graph as it exists
//! *before* a candidate edge is added. It never mutates anything.

use crate::domain::TaskId;
use crate::error::{Error, Result};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// Would adding the edge `task -> depends_on` create a cycle?
///
/// A cycle would be created iff `task` is already reachable from
/// `depends_on` through existing outgoing edges: the new edge would close
/// that path into a loop. The traversal is an iterative depth-first search
/// with an explicit stack and a visited set owned by this invocation, so
/// shared sub-paths are walked once and pathological graphs cannot blow the
/// call stack.
///
/// The candidate edge must not be inserted before this check runs.
///
/// The degenerate candidate `task == depends_on` reports `true` (a trivial
/// single-node cycle); the service rejects self-dependencies before ever
/// asking the guard.
///
/// # Errors
///
/// Returns `Error::TaskNotFound` if either id has no node in the graph.
pub(super) fn would_create_cycle_impl(
    graph: &StableDiGraph<TaskId, u64>,
    node_map: &HashMap<TaskId, NodeIndex>,
    task: TaskId,
    depends_on: TaskId,
) -> Result<bool> {
    let target = *node_map.get(&task).ok_or(Error::TaskNotFound(task))?;
    let start = *node_map
        .get(&depends_on)
        .ok_or(Error::TaskNotFound(depends_on))?;

    if task == depends_on {
        return Ok(true);
    }

    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if node == target {
            return Ok(true);
        }
        if !visited.insert(node) {
            continue;
        }
        for next in graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    Ok(false)
}
