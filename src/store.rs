//! Persistence collaborator interface
//!
//! The engine owns no persisted state; problems, test cases and accepted
//! submissions live behind this trait, implemented by the embedding API
//! layer on top of whatever store it uses.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::languages::Language;
use crate::submission::{TestCase, Visibility};
use crate::verdict::VerdictStatus;

/// Access to problem data and submission records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Load a problem's test cases in evaluation order, optionally
    /// filtered by visibility (`None` loads the full set).
    async fn load_test_cases(
        &self,
        problem_id: Uuid,
        visibility: Option<Visibility>,
    ) -> Result<Vec<TestCase>>;

    /// Record a graded submission. Only invoked on full acceptance.
    async fn record_submission(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        language: Language,
        source_code: &str,
        status: VerdictStatus,
    ) -> Result<()>;
}
