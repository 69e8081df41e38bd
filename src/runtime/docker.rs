//! One-shot Docker containers for isolated execution
//!
//! Each test case runs in a fresh `docker run --rm` container with the
//! workspace bind-mounted at `/workspace`, explicit memory/CPU/pid
//! ceilings and no network. Two independent timeout layers apply: an
//! inner `timeout(1)` guard inside the container wrapping the
//! interpreter / compiler+VM invocation, and an outer supervisory
//! wall-clock ceiling that force-removes the container.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use crate::config::{JudgeConfig, LanguageLimits};
use crate::constants::{CONTAINER_WORKSPACE, DIAGNOSTIC_LIMIT_CHARS, INNER_TIMEOUT_EXIT_CODE};
use crate::languages::Language;

use super::{IsolationRuntime, RunOutcome};

/// Docker-backed isolation runtime
pub struct DockerRuntime {
    config: JudgeConfig,
}

impl DockerRuntime {
    /// Create a new Docker runtime with the given configuration
    pub fn new(config: JudgeConfig) -> Self {
        Self { config }
    }

    /// Pre-pull the configured language images.
    ///
    /// Best-effort: a failed pull is logged and skipped because the image
    /// may already be cached locally.
    pub async fn ensure_images(&self) -> Result<()> {
        for language in [Language::Python, Language::Java] {
            let image = &self.config.limits(language).image;

            let inspect = Command::new("docker")
                .args(["image", "inspect", image])
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;

            if let Ok(status) = inspect {
                if status.success() {
                    tracing::debug!(image = %image, "Docker image already present");
                    continue;
                }
            }

            tracing::info!(image = %image, "Pulling Docker image…");
            let pull = Command::new("docker")
                .args(["pull", image])
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .await
                .context("Failed to run docker pull")?;

            if pull.status.success() {
                tracing::info!(image = %image, "Docker image pulled successfully");
            } else {
                let stderr = String::from_utf8_lossy(&pull.stderr);
                tracing::warn!(
                    image = %image,
                    stderr = %stderr,
                    "docker pull failed — will try to use cached image"
                );
            }
        }

        Ok(())
    }

    /// Force-remove a container that outlived its wall budget.
    ///
    /// Best-effort: `--rm` may already have won the race.
    async fn remove_container(name: &str) {
        let result = Command::new("docker")
            .args(["rm", "--force", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {
                tracing::debug!(container = %name, "Force-removed container")
            }
            Ok(_) => tracing::debug!(container = %name, "Container already gone"),
            Err(e) => tracing::warn!(
                container = %name,
                error = %e,
                "Failed to force-remove container"
            ),
        }
    }
}

#[async_trait]
impl IsolationRuntime for DockerRuntime {
    async fn execute(&self, workspace: &Path, language: Language) -> RunOutcome {
        let limits = self.config.limits(language);
        let container_name = format!("themis-{}", Uuid::new_v4());

        let workspace = match workspace.canonicalize() {
            Ok(path) => path,
            Err(e) => return RunOutcome::runtime_error(&format!("workspace unavailable: {e}")),
        };

        let args = build_run_args(&container_name, &workspace, language, limits);

        tracing::debug!(
            image = %limits.image,
            language = %language,
            container = %container_name,
            workspace = %workspace.display(),
            "Spawning execution container"
        );

        let mut cmd = Command::new("docker");
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return RunOutcome::runtime_error(&format!(
                    "failed to launch isolation environment: {e}"
                ));
            }
        };

        let wall_budget = Duration::from_millis(limits.wall_timeout_ms);
        match timeout(wall_budget, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    return RunOutcome::clean(
                        String::from_utf8_lossy(&output.stdout).trim().to_string(),
                    );
                }

                // The inner guard reports 124 when it kills the process
                if output.status.code() == Some(INNER_TIMEOUT_EXIT_CODE) {
                    return RunOutcome::timed_out(&format!(
                        "time limit exceeded ({}s)",
                        limits.run_timeout_secs
                    ));
                }

                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim();
                let diagnostic = if stderr.is_empty() {
                    format!(
                        "process exited with code {}",
                        output.status.code().unwrap_or(-1)
                    )
                } else {
                    truncate_diagnostic(stderr)
                };
                RunOutcome::runtime_error(&diagnostic)
            }
            Ok(Err(e)) => {
                RunOutcome::runtime_error(&format!("isolation environment failed: {e}"))
            }
            Err(_) => {
                // Outer supervisory kill: reap the environment even if the
                // inner guard hung
                Self::remove_container(&container_name).await;
                RunOutcome::timed_out(&format!(
                    "time limit exceeded ({}ms wall budget)",
                    limits.wall_timeout_ms
                ))
            }
        }
    }
}

/// Build the `docker run` argument list for one test-case execution
fn build_run_args(
    container_name: &str,
    workspace: &Path,
    language: Language,
    limits: &LanguageLimits,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    args.push("run".into());
    args.push("--rm".into());
    args.push(format!("--name={container_name}"));

    // ── Resource constraints ──────────────────────────────
    args.push(format!("--memory={}m", limits.memory_limit_mb));
    args.push(format!("--memory-swap={}m", limits.memory_limit_mb));
    args.push(format!("--cpus={}", limits.cpu_limit));
    args.push(format!("--pids-limit={}", limits.pids_limit));

    // ── Network isolation ─────────────────────────────────
    args.push("--network=none".into());

    // ── Volume: workspace → /workspace ────────────────────
    args.push("-v".into());
    args.push(format!("{}:{}", workspace.display(), CONTAINER_WORKSPACE));
    args.push("-w".into());
    args.push(CONTAINER_WORKSPACE.into());

    // ── Image and command ─────────────────────────────────
    args.push(limits.image.clone());
    args.push("sh".into());
    args.push("-c".into());
    args.push(language.run_command(limits.run_timeout_secs));

    args
}

/// Cap a stderr diagnostic before it is carried into a result
fn truncate_diagnostic(diagnostic: &str) -> String {
    diagnostic.chars().take(DIAGNOSTIC_LIMIT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_run_args_python() {
        let config = JudgeConfig::default();
        let workspace = PathBuf::from("/tmp/themis/abc");
        let args = build_run_args(
            "themis-test",
            &workspace,
            Language::Python,
            config.limits(Language::Python),
        );

        assert_eq!(args[0], "run");
        assert!(args.contains(&"--rm".to_string()));
        assert!(args.contains(&"--network=none".to_string()));
        assert!(args.contains(&"--memory=128m".to_string()));
        assert!(args.contains(&"--cpus=0.5".to_string()));
        assert!(args.contains(&"--pids-limit=64".to_string()));
        assert!(args.contains(&"/tmp/themis/abc:/workspace".to_string()));
        assert!(args.contains(&config.python.image));

        // The command goes through `sh -c` with the inner guard in place
        let shell_cmd = args.last().unwrap();
        assert!(shell_cmd.contains("timeout 10s python3"));
    }

    #[test]
    fn test_build_run_args_java_gets_compiled_limits() {
        let config = JudgeConfig::default();
        let workspace = PathBuf::from("/tmp/themis/abc");
        let args = build_run_args(
            "themis-test",
            &workspace,
            Language::Java,
            config.limits(Language::Java),
        );

        assert!(args.contains(&"--memory=512m".to_string()));
        let shell_cmd = args.last().unwrap();
        assert!(shell_cmd.contains("javac"));
        assert!(shell_cmd.contains("&& timeout 5s java"));
    }

    #[test]
    fn test_truncate_diagnostic() {
        let long = "x".repeat(2000);
        assert_eq!(truncate_diagnostic(&long).len(), DIAGNOSTIC_LIMIT_CHARS);
        assert_eq!(truncate_diagnostic("short"), "short");
    }
}
