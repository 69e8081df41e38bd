//! Custom error types and handling
//!
//! Only invocation-level failures live here. A test case that times out or
//! crashes inside its isolation environment is recorded as a failed
//! [`crate::verdict::ExecutionResult`] with the matching
//! [`crate::verdict::ErrorKind`] and never surfaces as a `JudgeError`.

/// Engine-wide error type
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// Workspace filesystem failure. Fatal and surfaced, never retried.
    #[error("Workspace error: {0}")]
    Workspace(#[from] std::io::Error),

    /// A submission arrived with nothing to evaluate. A verdict over an
    /// empty set would be a vacuous pass, so this is a hard failure.
    #[error("No test cases configured")]
    NoTestCases,

    /// Unexpected pipeline failure (persistence collaborator, etc.).
    /// Degraded to a synthetic result by `run`, surfaced by `submit`.
    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] anyhow::Error),
}

/// Result type alias using JudgeError
pub type JudgeResult<T> = Result<T, JudgeError>;
