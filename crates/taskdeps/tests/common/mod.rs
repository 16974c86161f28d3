//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the taskdeps binary in the specified directory.
///
/// Cargo builds the binary before running integration tests and exposes its
/// path through `CARGO_BIN_EXE_taskdeps`.
pub fn run_taskdeps_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_taskdeps"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute taskdeps binary")
}

/// Create a task via the CLI and return its id, parsed from JSON output.
pub fn add_task(dir: &Path, title: &str) -> u64 {
    let output = run_taskdeps_in_dir(dir, &["--json", "add", title]);
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let task: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("add --json should emit valid JSON");
    task["id"].as_u64().expect("task JSON should carry an id")
}
