//! Test utilities: fake isolation runtimes
//!
//! Behavior tests exercise the coordinator and facade through the
//! [`IsolationRuntime`] capability trait, so no Docker daemon is needed.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::constants::STDIN_FILE;
use crate::languages::Language;
use crate::runtime::{IsolationRuntime, RunOutcome};

/// Isolation runtime that replays a fixed outcome script and records calls
pub struct ScriptedRuntime {
    outcomes: Mutex<VecDeque<RunOutcome>>,
    calls: Mutex<Vec<(PathBuf, Language)>>,
}

impl ScriptedRuntime {
    pub fn new(outcomes: Vec<RunOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of environments launched so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IsolationRuntime for ScriptedRuntime {
    async fn execute(&self, workspace: &Path, language: Language) -> RunOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((workspace.to_path_buf(), language));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RunOutcome::clean(""))
    }
}

/// Isolation runtime that echoes the workspace's stdin file back as clean
/// stdout — behaves like a `print(input())` submission
pub struct EchoRuntime;

#[async_trait]
impl IsolationRuntime for EchoRuntime {
    async fn execute(&self, workspace: &Path, _language: Language) -> RunOutcome {
        match tokio::fs::read_to_string(workspace.join(STDIN_FILE)).await {
            Ok(input) => RunOutcome::clean(input.trim().to_string()),
            Err(e) => RunOutcome::runtime_error(&format!("no stdin file: {e}")),
        }
    }
}
