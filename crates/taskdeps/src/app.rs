//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that locates the `.taskdeps/`
//! directory, loads configuration, and owns the storage backend for the
//! duration of one command.

use crate::commands::init::{find_taskdeps_root, TaskdepsConfig, CONFIG_FILE_NAME, TASKDEPS_DIR_NAME};
use crate::error::{Error, Result};
use crate::storage::{create_storage, TaskStorage};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
///
/// Storage is loaded from the taskdeps directory on creation; mutating
/// commands call [`App::save`] afterwards to persist.
pub struct App {
    /// The storage backend (trait object for polymorphism).
    storage: Box<dyn TaskStorage>,

    /// Path to the taskdeps directory (`.taskdeps`).
    taskdeps_dir: PathBuf,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("taskdeps_dir", &self.taskdeps_dir)
            .field("storage", &"<dyn TaskStorage>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree for a `.taskdeps/` directory, loads
    /// configuration, and initializes storage.
    ///
    /// # Errors
    ///
    /// Returns an error if no taskdeps repository is found, the
    /// configuration cannot be loaded, or storage initialization fails.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_taskdeps_root(working_dir).ok_or(Error::NotInitialized)?;

        let taskdeps_dir = root_dir.join(TASKDEPS_DIR_NAME);
        let config_path = taskdeps_dir.join(CONFIG_FILE_NAME);

        let config = TaskdepsConfig::load(&config_path).await?;
        let backend = config.storage.to_backend(&root_dir)?;
        let storage = create_storage(backend).await?;

        Ok(Self {
            storage,
            taskdeps_dir,
        })
    }

    /// Get a mutable reference to the storage.
    pub fn storage_mut(&mut self) -> &mut dyn TaskStorage {
        self.storage.as_mut()
    }

    /// Get an immutable reference to the storage.
    pub fn storage(&self) -> &dyn TaskStorage {
        self.storage.as_ref()
    }

    /// Get the path to the taskdeps directory.
    pub fn taskdeps_dir(&self) -> &Path {
        &self.taskdeps_dir
    }

    /// Save storage state to persistent storage.
    ///
    /// This should be called after any mutating operation.
    pub async fn save(&self) -> Result<()> {
        self.storage.save().await
    }
}
