//! Ephemeral per-submission workspaces
//!
//! A workspace is the filesystem scratch area backing one judging
//! invocation: the submitted source under its fixed filename plus the
//! stdin file overwritten before each test-case run. The directory is
//! acquired scoped — dropping the handle removes it recursively, so no
//! exit path can leak a scratch directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;
use uuid::Uuid;

use crate::config::WorkspaceConfig;
use crate::constants::STDIN_FILE;
use crate::error::JudgeResult;
use crate::languages::Language;
use crate::submission::TestCase;

/// Handle to one submission's scratch directory
pub struct Workspace {
    dir: TempDir,
    submission_id: Uuid,
}

impl Workspace {
    /// Allocate a workspace under the configured root and write the
    /// submitted source to the language's fixed filename.
    ///
    /// The directory name is keyed by the submission ID plus a random
    /// suffix, so concurrent invocations never collide.
    pub async fn create(
        config: &WorkspaceConfig,
        submission_id: Uuid,
        language: Language,
        source_code: &str,
    ) -> JudgeResult<Self> {
        fs::create_dir_all(&config.root).await?;

        let dir = tempfile::Builder::new()
            .prefix(&format!("{submission_id}-"))
            .tempdir_in(&config.root)?;

        fs::write(dir.path().join(language.source_file()), source_code).await?;

        tracing::debug!(
            submission_id = %submission_id,
            dir = %dir.path().display(),
            "Created workspace"
        );

        Ok(Self { dir, submission_id })
    }

    /// Get the workspace directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn submission_id(&self) -> Uuid {
        self.submission_id
    }

    /// Overwrite the fixed stdin file with this test case's input.
    ///
    /// Callers serialize writes per handle: one submission is judged by
    /// exactly one coordinator at a time.
    pub async fn write_stdin(&self, test_case: &TestCase) -> JudgeResult<()> {
        fs::write(self.stdin_path(), &test_case.input).await?;
        Ok(())
    }

    /// Path of the stdin file inside the workspace
    pub fn stdin_path(&self) -> PathBuf {
        self.dir.path().join(STDIN_FILE)
    }

    /// Recursively remove the workspace, surfacing filesystem denial.
    ///
    /// Every other exit path (early return, panic) is covered by the
    /// handle's drop guard.
    pub fn destroy(self) -> JudgeResult<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        tracing::debug!(dir = %path.display(), "Destroyed workspace");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(root: &Path) -> WorkspaceConfig {
        WorkspaceConfig {
            root: root.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_create_writes_source_file() {
        let root = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        let ws = Workspace::create(&test_config(root.path()), id, Language::Python, "print(1)")
            .await
            .unwrap();

        let source = fs::read_to_string(ws.path().join("Main.py")).await.unwrap();
        assert_eq!(source, "print(1)");
        assert!(ws.path().starts_with(root.path()));
        assert_eq!(ws.submission_id(), id);
    }

    #[tokio::test]
    async fn test_write_stdin_overwrites_previous_input() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(
            &test_config(root.path()),
            Uuid::new_v4(),
            Language::Java,
            "class Main {}",
        )
        .await
        .unwrap();

        ws.write_stdin(&TestCase::hidden("first\n", "")).await.unwrap();
        ws.write_stdin(&TestCase::hidden("second\n", "")).await.unwrap();

        let input = fs::read_to_string(ws.stdin_path()).await.unwrap();
        assert_eq!(input, "second\n");
    }

    #[tokio::test]
    async fn test_destroy_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace::create(
            &test_config(root.path()),
            Uuid::new_v4(),
            Language::Python,
            "",
        )
        .await
        .unwrap();

        let path = ws.path().to_path_buf();
        assert!(path.exists());
        ws.destroy().unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_directory() {
        let root = tempfile::tempdir().unwrap();
        let path = {
            let ws = Workspace::create(
                &test_config(root.path()),
                Uuid::new_v4(),
                Language::Python,
                "",
            )
            .await
            .unwrap();
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
