//! Engine-wide constants
//!
//! This module contains all constant values used throughout the engine.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// WORKSPACE DEFAULTS
// =============================================================================

/// Default root directory for per-submission scratch workspaces
pub const DEFAULT_WORKSPACE_ROOT: &str = "/tmp/themis";

/// Fixed stdin file name inside a workspace, overwritten before each run
pub const STDIN_FILE: &str = "input.txt";

/// Mount point of the workspace inside the isolation environment
pub const CONTAINER_WORKSPACE: &str = "/workspace";

// =============================================================================
// EXECUTION LIMITS
// =============================================================================

/// Default memory limit for interpreted (Python) runs in megabytes
pub const PYTHON_MEMORY_LIMIT_MB: u64 = 128;

/// Default memory limit for compiled (Java) runs in megabytes
pub const JAVA_MEMORY_LIMIT_MB: u64 = 512;

/// CPU limit per container (number of cores)
pub const CPU_LIMIT: f64 = 0.5;

/// Process-count limit per container (fork-bomb guard)
pub const PIDS_LIMIT: u32 = 64;

/// Inner guard wrapping the Python interpreter invocation, in seconds
pub const PYTHON_RUN_TIMEOUT_SECS: u64 = 10;

/// Inner guard wrapping the JVM run (compilation excluded), in seconds
pub const JAVA_RUN_TIMEOUT_SECS: u64 = 5;

/// Outer supervisory wall-clock ceiling for Python, in milliseconds
pub const PYTHON_WALL_TIMEOUT_MS: u64 = 12_000;

/// Outer supervisory wall-clock ceiling for Java, in milliseconds.
/// Must also cover `javac`, so it exceeds the inner run guard by a wide margin.
pub const JAVA_WALL_TIMEOUT_MS: u64 = 20_000;

/// Exit code `timeout(1)` reports when the inner guard kills the process
pub const INNER_TIMEOUT_EXIT_CODE: i32 = 124;

/// Cap on stderr diagnostics carried into execution results
pub const DIAGNOSTIC_LIMIT_CHARS: usize = 500;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Container images for each language
pub mod container_images {
    pub const PYTHON: &str = "python:3.12-bookworm";
    pub const JAVA: &str = "eclipse-temurin:17-jdk";
}
