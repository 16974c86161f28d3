//! In-memory storage backend using HashMap and petgraph.
//!
//! All data lives in RAM; the optional JSONL layer in [`jsonl`] persists it
//! to disk. The implementation uses:
//!
//! - `HashMap<ProjectId, Project>` and `HashMap<TaskId, Task>` for O(1)
//!   record lookups
//! - `petgraph::stable_graph::StableDiGraph` for the dependency edge set,
//!   with a `HashMap<TaskId, NodeIndex>` node map
//! - sequential integer ids for projects, tasks, and edges
//!
//! # Edge direction convention
//!
//! Edges point from **dependent to prerequisite**: if task A depends on
//! task B, the edge is `A -> B`. "Dependencies" of a task are its outgoing
//! neighbors; "dependents" are its incoming neighbors.
//!
//! # Thread safety
//!
//! The store is wrapped in `Arc<tokio::sync::Mutex<_>>`. Every trait method
//! acquires the lock for its entire read-validate-write sequence, which is
//! what keeps the acyclicity invariant safe under concurrent use: two
//! add-dependency calls can never both pass the cycle check against the same
//! pre-insert graph.

mod graph;
mod inner;
mod jsonl;
mod trait_impl;

use crate::storage::TaskStorage;
use inner::InMemoryStoreInner;
use std::sync::Arc;
use tokio::sync::Mutex;

// Re-export public API
pub use jsonl::{load_from_jsonl, save_to_jsonl, LoadWarning};

/// Thread-safe in-memory store.
///
/// Implements [`TaskStorage`] via the trait implementation in
/// `trait_impl.rs`.
pub(crate) type InMemoryStore = Arc<Mutex<InMemoryStoreInner>>;

/// Create a new empty in-memory store (no backing file).
pub fn new_in_memory_store() -> Box<dyn TaskStorage> {
    Box::new(Arc::new(Mutex::new(InMemoryStoreInner::new())))
}
