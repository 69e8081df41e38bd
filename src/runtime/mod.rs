//! Isolation runtime abstraction
//!
//! This trait abstracts "launch one throwaway isolated environment, feed it
//! source + stdin, capture its output" behind a single operation, so the
//! coordinator never depends on a specific isolation technology. One
//! implementation exists per target platform's isolation primitive;
//! [`docker::DockerRuntime`] is the Docker one.

pub mod docker;

pub use docker::DockerRuntime;

use std::path::Path;

use async_trait::async_trait;

use crate::languages::Language;

/// Outcome of one isolated execution.
///
/// Always a value, never an error: abnormal exits, timeouts and launch
/// failures are folded into `stdout` as an `Error:`-prefixed diagnostic so
/// downstream treats them uniformly as failed comparisons.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Trimmed stdout on clean exit, `Error: <diagnostic>` otherwise
    pub stdout: String,
    pub exited_cleanly: bool,
    pub timed_out: bool,
}

impl RunOutcome {
    /// Outcome of a clean (zero-status) exit
    pub fn clean(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            exited_cleanly: true,
            timed_out: false,
        }
    }

    /// Outcome of a crash, non-zero exit or launch failure
    pub fn runtime_error(diagnostic: &str) -> Self {
        Self {
            stdout: format!("Error: {diagnostic}"),
            exited_cleanly: false,
            timed_out: false,
        }
    }

    /// Outcome of either timeout layer firing
    pub fn timed_out(diagnostic: &str) -> Self {
        Self {
            stdout: format!("Error: {diagnostic}"),
            exited_cleanly: false,
            timed_out: true,
        }
    }
}

/// Capability interface for one-off isolated execution
#[async_trait]
pub trait IsolationRuntime: Send + Sync {
    /// Execute the workspace's source against the workspace's stdin file
    /// in a brand-new, resource-capped, networkless environment.
    ///
    /// Stateless across calls: every call gets a fresh environment, so a
    /// corrupted interpreter state from one test case can never leak into
    /// the next.
    async fn execute(&self, workspace: &Path, language: Language) -> RunOutcome;
}
