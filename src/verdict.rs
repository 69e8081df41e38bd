//! Execution results and verdict aggregation

use serde::{Deserialize, Serialize};

use crate::comparator::outputs_match;
use crate::runtime::RunOutcome;
use crate::submission::TestCase;

/// Failure classification for a single execution result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Clean exit; `passed` reflects the output comparison alone
    None,
    /// The test case exceeded its time budget
    Timeout,
    /// Non-zero exit, compile failure, or missing runtime image
    RuntimeError,
    /// The judging pipeline itself failed, not the submitted code
    InfrastructureError,
}

/// Result of executing a single test case. Produced exactly once per
/// evaluated test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub passed: bool,
    pub error_kind: ErrorKind,
}

impl ExecutionResult {
    /// Build a result from one isolation-runtime outcome
    pub fn from_outcome(case: &TestCase, outcome: RunOutcome) -> Self {
        let error_kind = if outcome.timed_out {
            ErrorKind::Timeout
        } else if !outcome.exited_cleanly {
            ErrorKind::RuntimeError
        } else {
            ErrorKind::None
        };

        let passed = error_kind == ErrorKind::None
            && outputs_match(&outcome.stdout, &case.expected_output);

        Self {
            input: case.input.clone(),
            expected_output: case.expected_output.clone(),
            actual_output: outcome.stdout,
            passed,
            error_kind,
        }
    }

    /// Synthetic failed result standing in for a whole run when the
    /// pipeline itself failed (the fail-open path of `run`)
    pub fn infrastructure(diagnostic: &str) -> Self {
        Self {
            input: String::new(),
            expected_output: String::new(),
            actual_output: format!("Error: {diagnostic}"),
            passed: false,
            error_kind: ErrorKind::InfrastructureError,
        }
    }
}

/// Aggregate judging status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictStatus {
    Accepted,
    /// Persisted as `"Failed"` by the API layer
    #[serde(rename = "Failed")]
    Rejected,
}

/// Aggregate verdict over an execution-result sequence.
///
/// Fail-fast judging yields `results` as a strict prefix of the evaluated
/// test-case order; a missing tail implies Rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: VerdictStatus,
    /// Index of the first failing result within the evaluated order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_failure: Option<usize>,
    pub results: Vec<ExecutionResult>,
}

impl Verdict {
    /// Aggregate a result sequence: Accepted iff every result passed
    pub fn from_results(results: Vec<ExecutionResult>) -> Self {
        let first_failure = results.iter().position(|r| !r.passed);
        let status = if first_failure.is_none() {
            VerdictStatus::Accepted
        } else {
            VerdictStatus::Rejected
        };

        Self {
            status,
            first_failure,
            results,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == VerdictStatus::Accepted
    }
}
