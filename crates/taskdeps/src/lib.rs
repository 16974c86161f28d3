//! Taskdeps - task management with dependency tracking.
//!
//! This crate provides both a CLI application and a library for managing
//! tasks, projects, and the acyclic dependency graph between tasks.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod app;
pub mod domain;
pub mod error;
pub mod output;
pub mod storage;

// Public CLI module (needed by binary)
pub mod cli;

// Command implementations
pub mod commands;
