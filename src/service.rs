//! Judging facade
//!
//! The two operations the API layer calls: `run` for rich interactive
//! feedback over the full test set, `submit` for a graded verdict over the
//! hidden set. They fail differently on internal errors: `run` fails open
//! (degrades to one synthetic failed result, preserving availability),
//! `submit` fails closed (silent acceptance or rejection of a graded
//! action is unacceptable).

use std::sync::Arc;

use uuid::Uuid;

use crate::config::JudgeConfig;
use crate::coordinator::Coordinator;
use crate::error::JudgeResult;
use crate::languages::Language;
use crate::runtime::IsolationRuntime;
use crate::store::ProblemStore;
use crate::submission::{Submission, Visibility};
use crate::verdict::{ExecutionResult, Verdict};

/// Facade over the judging engine
pub struct JudgeService {
    store: Arc<dyn ProblemStore>,
    coordinator: Coordinator,
}

impl JudgeService {
    /// Create a new judging service
    pub fn new(
        store: Arc<dyn ProblemStore>,
        runtime: Arc<dyn IsolationRuntime>,
        config: JudgeConfig,
    ) -> Self {
        Self {
            store,
            coordinator: Coordinator::new(runtime, config),
        }
    }

    /// Execute the submitted code against the problem's full test set.
    ///
    /// Fails open: any internal failure — including ones unrelated to the
    /// user's code, such as the store being down — degrades to a single
    /// synthetic failed result with an infrastructure-error marker.
    pub async fn run(
        &self,
        problem_id: Uuid,
        language: Language,
        source_code: &str,
    ) -> Vec<ExecutionResult> {
        match self.try_run(problem_id, language, source_code).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(
                    problem_id = %problem_id,
                    error = %e,
                    "Run pipeline failed, degrading to synthetic result"
                );
                vec![ExecutionResult::infrastructure(&e.to_string())]
            }
        }
    }

    async fn try_run(
        &self,
        problem_id: Uuid,
        language: Language,
        source_code: &str,
    ) -> JudgeResult<Vec<ExecutionResult>> {
        let test_cases = self.store.load_test_cases(problem_id, None).await?;
        let submission = Submission::new(language, source_code, test_cases);
        self.coordinator.run_all(&submission).await
    }

    /// Grade the submitted code against the problem's hidden test set.
    ///
    /// Fails closed: internal failures surface as errors. Only a full
    /// acceptance is handed off to the persistence collaborator.
    pub async fn submit(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        language: Language,
        source_code: &str,
    ) -> JudgeResult<Verdict> {
        let test_cases = self
            .store
            .load_test_cases(problem_id, Some(Visibility::Hidden))
            .await?;
        let submission = Submission::new(language, source_code, test_cases);

        let verdict = self.coordinator.judge(&submission).await?;

        if verdict.is_accepted() {
            self.store
                .record_submission(user_id, problem_id, language, source_code, verdict.status)
                .await?;
            tracing::info!(
                user_id = %user_id,
                problem_id = %problem_id,
                language = %language,
                "Accepted submission recorded"
            );
        }

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JudgeError;
    use crate::runtime::RunOutcome;
    use crate::store::MockProblemStore;
    use crate::submission::TestCase;
    use crate::test_utils::ScriptedRuntime;
    use crate::verdict::ErrorKind;

    fn service(store: MockProblemStore, outcomes: Vec<RunOutcome>) -> (JudgeService, tempfile::TempDir) {
        let root = tempfile::tempdir().unwrap();
        let mut config = JudgeConfig::default();
        config.workspace.root = root.path().to_path_buf();
        let service = JudgeService::new(
            Arc::new(store),
            Arc::new(ScriptedRuntime::new(outcomes)),
            config,
        );
        (service, root)
    }

    #[tokio::test]
    async fn test_run_uses_full_test_set() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .withf(|_, visibility| visibility.is_none())
            .returning(|_, _| {
                Ok(vec![
                    TestCase::public("a\n", "1"),
                    TestCase::hidden("b\n", "2"),
                ])
            });

        let (service, _root) = service(store, vec![RunOutcome::clean("1"), RunOutcome::clean("2")]);
        let results = service
            .run(Uuid::new_v4(), Language::Python, "print(input())")
            .await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed));
    }

    #[tokio::test]
    async fn test_run_fails_open_on_store_failure() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .returning(|_, _| Err(anyhow::anyhow!("database unavailable")));

        let (service, _root) = service(store, vec![]);
        let results = service.run(Uuid::new_v4(), Language::Python, "print(1)").await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].error_kind, ErrorKind::InfrastructureError);
        assert!(results[0].actual_output.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_run_fails_open_on_zero_test_cases() {
        let mut store = MockProblemStore::new();
        store.expect_load_test_cases().returning(|_, _| Ok(vec![]));

        let (service, _root) = service(store, vec![]);
        let results = service.run(Uuid::new_v4(), Language::Java, "class Main {}").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].error_kind, ErrorKind::InfrastructureError);
    }

    #[tokio::test]
    async fn test_submit_fails_closed_on_store_failure() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .returning(|_, _| Err(anyhow::anyhow!("database unavailable")));
        store.expect_record_submission().never();

        let (service, _root) = service(store, vec![]);
        let result = service
            .submit(Uuid::new_v4(), Uuid::new_v4(), Language::Python, "print(1)")
            .await;

        assert!(matches!(result, Err(JudgeError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_submit_loads_hidden_set_and_records_on_acceptance() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .withf(|_, visibility| *visibility == Some(Visibility::Hidden))
            .returning(|_, _| Ok(vec![TestCase::hidden("a\n", "1")]));
        store
            .expect_record_submission()
            .times(1)
            .returning(|_, _, _, _, _| Ok(()));

        let (service, _root) = service(store, vec![RunOutcome::clean("1")]);
        let verdict = service
            .submit(Uuid::new_v4(), Uuid::new_v4(), Language::Python, "print(input())")
            .await
            .unwrap();

        assert!(verdict.is_accepted());
    }

    #[tokio::test]
    async fn test_submit_does_not_record_rejections() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .returning(|_, _| Ok(vec![TestCase::hidden("a\n", "1")]));
        store.expect_record_submission().never();

        let (service, _root) = service(store, vec![RunOutcome::clean("wrong")]);
        let verdict = service
            .submit(Uuid::new_v4(), Uuid::new_v4(), Language::Python, "print(0)")
            .await
            .unwrap();

        assert!(!verdict.is_accepted());
        assert_eq!(verdict.first_failure, Some(0));
    }

    #[tokio::test]
    async fn test_submit_surfaces_record_failure() {
        let mut store = MockProblemStore::new();
        store
            .expect_load_test_cases()
            .returning(|_, _| Ok(vec![TestCase::hidden("a\n", "1")]));
        store
            .expect_record_submission()
            .returning(|_, _, _, _, _| Err(anyhow::anyhow!("insert failed")));

        let (service, _root) = service(store, vec![RunOutcome::clean("1")]);
        let result = service
            .submit(Uuid::new_v4(), Uuid::new_v4(), Language::Python, "print(input())")
            .await;

        assert!(matches!(result, Err(JudgeError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_submit_with_no_hidden_cases_fails_closed() {
        let mut store = MockProblemStore::new();
        store.expect_load_test_cases().returning(|_, _| Ok(vec![]));
        store.expect_record_submission().never();

        let (service, _root) = service(store, vec![]);
        let result = service
            .submit(Uuid::new_v4(), Uuid::new_v4(), Language::Python, "print(1)")
            .await;

        assert!(matches!(result, Err(JudgeError::NoTestCases)));
    }
}
