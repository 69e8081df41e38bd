//! Test execution coordination
//!
//! Drives a submission's test cases through the isolation runtime,
//! strictly sequentially, reusing one workspace for the whole submission.
//! Concurrency across different submissions is the caller's concern; each
//! invocation exclusively owns its workspace.

use std::sync::Arc;

use crate::config::JudgeConfig;
use crate::error::{JudgeError, JudgeResult};
use crate::languages::Language;
use crate::runtime::IsolationRuntime;
use crate::submission::{Submission, TestCase, Visibility};
use crate::verdict::{ExecutionResult, Verdict};
use crate::workspace::Workspace;

/// Coordinates per-test-case execution for one submission at a time
pub struct Coordinator {
    runtime: Arc<dyn IsolationRuntime>,
    config: JudgeConfig,
}

impl Coordinator {
    /// Create a new coordinator
    pub fn new(runtime: Arc<dyn IsolationRuntime>, config: JudgeConfig) -> Self {
        Self { runtime, config }
    }

    /// Execute every test case in input order (interactive feedback).
    ///
    /// Per-test-case failures never abort the loop; the result count always
    /// equals the test-case count. Workspace I/O failures abort.
    pub async fn run_all(&self, submission: &Submission) -> JudgeResult<Vec<ExecutionResult>> {
        if submission.test_cases.is_empty() {
            return Err(JudgeError::NoTestCases);
        }

        let workspace = self.create_workspace(submission).await?;

        let mut results = Vec::with_capacity(submission.test_cases.len());
        for case in &submission.test_cases {
            results.push(
                self.run_case(&workspace, submission.language, case)
                    .await?,
            );
        }

        finish_workspace(workspace);
        Ok(results)
    }

    /// Execute hidden test cases in input order, stopping at the first
    /// failure — a verdict needs only one counterexample.
    pub async fn judge(&self, submission: &Submission) -> JudgeResult<Verdict> {
        let hidden: Vec<&TestCase> = submission
            .test_cases
            .iter()
            .filter(|case| case.visibility == Visibility::Hidden)
            .collect();

        // An empty graded set would be a vacuous pass
        if hidden.is_empty() {
            return Err(JudgeError::NoTestCases);
        }

        let workspace = self.create_workspace(submission).await?;

        let mut results = Vec::new();
        for case in hidden {
            let result = self.run_case(&workspace, submission.language, case).await?;
            let failed = !result.passed;
            results.push(result);
            if failed {
                break;
            }
        }

        finish_workspace(workspace);
        Ok(Verdict::from_results(results))
    }

    async fn create_workspace(&self, submission: &Submission) -> JudgeResult<Workspace> {
        Workspace::create(
            &self.config.workspace,
            submission.id,
            submission.language,
            &submission.source_code,
        )
        .await
    }

    /// Run one test case: overwrite stdin, then one fresh environment.
    ///
    /// The runtime is total — abnormal exits come back as `Error:`-output
    /// outcomes — so the only error path here is workspace I/O.
    async fn run_case(
        &self,
        workspace: &Workspace,
        language: Language,
        case: &TestCase,
    ) -> JudgeResult<ExecutionResult> {
        workspace.write_stdin(case).await?;
        let outcome = self.runtime.execute(workspace.path(), language).await;
        Ok(ExecutionResult::from_outcome(case, outcome))
    }
}

/// Tear down a workspace whose results are already complete. Filesystem
/// denial here is logged, not surfaced — the results still stand.
fn finish_workspace(workspace: Workspace) {
    let submission_id = workspace.submission_id();
    if let Err(e) = workspace.destroy() {
        tracing::warn!(
            submission_id = %submission_id,
            error = %e,
            "Failed to clean up workspace"
        );
    }
}
