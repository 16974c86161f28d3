//! Implementation of the `init` command.
//!
//! This module handles initialization of a new taskdeps data directory,
//! creating `.taskdeps/` with configuration and an empty data file.

use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Name of the taskdeps directory.
pub const TASKDEPS_DIR_NAME: &str = ".taskdeps";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the data file.
pub const TASKS_FILE_NAME: &str = "tasks.jsonl";

/// Name of the gitignore file within `.taskdeps`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Maximum directory depth to traverse when searching for the taskdeps root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for taskdeps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskdepsConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("memory" for in-memory with JSONL persistence).
    pub backend: String,

    /// Path to the data file, relative to the repository root.
    pub data_file: String,
}

impl StorageConfig {
    /// Resolve this configuration to a concrete storage backend.
    ///
    /// The "memory" backend persists through the JSONL data file, so both
    /// are mapped to [`StorageBackend::Jsonl`].
    pub fn to_backend(&self, root_dir: &Path) -> Result<StorageBackend> {
        match self.backend.as_str() {
            "memory" | "jsonl" => Ok(StorageBackend::Jsonl(root_dir.join(&self.data_file))),
            other => Err(Error::Config(format!("Unknown storage backend '{other}'"))),
        }
    }
}

impl TaskdepsConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self {
            storage: StorageConfig {
                backend: "memory".to_string(),
                data_file: format!("{TASKDEPS_DIR_NAME}/{TASKS_FILE_NAME}"),
            },
        }
    }

    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for TaskdepsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of the init command.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created taskdeps directory.
    pub taskdeps_dir: PathBuf,
    /// Path to the created config file.
    pub config_file: PathBuf,
    /// Path to the created data file.
    pub tasks_file: PathBuf,
    /// Path to the created gitignore file.
    pub gitignore_file: PathBuf,
}

/// Initialize a new taskdeps repository in the given directory.
///
/// # Errors
///
/// Returns an error if `.taskdeps/` already exists or file system
/// operations fail.
pub async fn init(base_dir: &Path) -> Result<InitResult> {
    let taskdeps_dir = base_dir.join(TASKDEPS_DIR_NAME);

    if taskdeps_dir.exists() {
        return Err(Error::Config(format!(
            "Taskdeps is already initialized in this directory. Found existing '{TASKDEPS_DIR_NAME}'"
        )));
    }

    fs::create_dir_all(&taskdeps_dir).await?;

    let config_file = taskdeps_dir.join(CONFIG_FILE_NAME);
    let config = TaskdepsConfig::new();
    config.save(&config_file).await?;

    let tasks_file = taskdeps_dir.join(TASKS_FILE_NAME);
    fs::write(&tasks_file, "").await?;

    let gitignore_file = taskdeps_dir.join(GITIGNORE_FILE_NAME);
    let gitignore_content = "\
# Taskdeps metadata files that should not be tracked
# The tasks.jsonl file can be tracked if you want your tasks in version control
*.tmp
";
    fs::write(&gitignore_file, gitignore_content).await?;

    Ok(InitResult {
        taskdeps_dir,
        config_file,
        tasks_file,
        gitignore_file,
    })
}

/// Check if a directory has been initialized with taskdeps.
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TASKDEPS_DIR_NAME).exists()
}

/// Find the taskdeps root directory by searching up the directory tree.
///
/// Returns `Some(path)` with the directory containing `.taskdeps/`, or
/// `None` if no repository is found within the depth limit.
pub fn find_taskdeps_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(TASKDEPS_DIR_NAME).exists() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
