//! Engine configuration
//!
//! All workspace and isolation behavior is driven by an explicit
//! configuration object handed to the components at construction; nothing
//! reads ambient global state at judging time. `from_env` exists as a
//! convenience for binaries that configure through the environment.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    container_images, CPU_LIMIT, DEFAULT_WORKSPACE_ROOT, JAVA_MEMORY_LIMIT_MB,
    JAVA_RUN_TIMEOUT_SECS, JAVA_WALL_TIMEOUT_MS, PIDS_LIMIT, PYTHON_MEMORY_LIMIT_MB,
    PYTHON_RUN_TIMEOUT_SECS, PYTHON_WALL_TIMEOUT_MS,
};
use crate::languages::Language;

/// Top-level engine configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub workspace: WorkspaceConfig,
    pub python: LanguageLimits,
    pub java: LanguageLimits,
}

/// Workspace configuration
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Root directory under which per-submission scratch dirs are created
    pub root: PathBuf,
}

/// Resource ceilings and runtime mapping for one language
#[derive(Debug, Clone)]
pub struct LanguageLimits {
    /// Container image providing the language toolchain
    pub image: String,

    /// Memory ceiling in megabytes
    pub memory_limit_mb: u64,

    /// CPU ceiling (number of cores)
    pub cpu_limit: f64,

    /// Process-count ceiling
    pub pids_limit: u32,

    /// Inner guard wrapping the interpreter / VM invocation, in seconds
    pub run_timeout_secs: u64,

    /// Outer supervisory wall-clock ceiling in milliseconds. For compiled
    /// languages this covers compile + run.
    pub wall_timeout_ms: u64,
}

impl JudgeConfig {
    /// Get the limits for a language
    pub fn limits(&self, language: Language) -> &LanguageLimits {
        match language {
            Language::Python => &self.python,
            Language::Java => &self.java,
        }
    }

    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            workspace: WorkspaceConfig {
                root: env::var("WORKSPACE_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.workspace.root),
            },
            python: LanguageLimits {
                image: env::var("PYTHON_IMAGE").unwrap_or(defaults.python.image),
                memory_limit_mb: env::var("PYTHON_MEMORY_LIMIT_MB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.python.memory_limit_mb),
                cpu_limit: env::var("CPU_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.python.cpu_limit),
                pids_limit: env::var("PIDS_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.python.pids_limit),
                run_timeout_secs: env::var("PYTHON_TIME_LIMIT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.python.run_timeout_secs),
                wall_timeout_ms: env::var("PYTHON_WALL_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.python.wall_timeout_ms),
            },
            java: LanguageLimits {
                image: env::var("JAVA_IMAGE").unwrap_or(defaults.java.image),
                memory_limit_mb: env::var("JAVA_MEMORY_LIMIT_MB")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.java.memory_limit_mb),
                cpu_limit: env::var("CPU_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.java.cpu_limit),
                pids_limit: env::var("PIDS_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.java.pids_limit),
                run_timeout_secs: env::var("JAVA_TIME_LIMIT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.java.run_timeout_secs),
                wall_timeout_ms: env::var("JAVA_WALL_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.java.wall_timeout_ms),
            },
        }
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            workspace: WorkspaceConfig {
                root: PathBuf::from(DEFAULT_WORKSPACE_ROOT),
            },
            python: LanguageLimits {
                image: container_images::PYTHON.to_string(),
                memory_limit_mb: PYTHON_MEMORY_LIMIT_MB,
                cpu_limit: CPU_LIMIT,
                pids_limit: PIDS_LIMIT,
                run_timeout_secs: PYTHON_RUN_TIMEOUT_SECS,
                wall_timeout_ms: PYTHON_WALL_TIMEOUT_MS,
            },
            java: LanguageLimits {
                image: container_images::JAVA.to_string(),
                memory_limit_mb: JAVA_MEMORY_LIMIT_MB,
                cpu_limit: CPU_LIMIT,
                pids_limit: PIDS_LIMIT,
                run_timeout_secs: JAVA_RUN_TIMEOUT_SECS,
                wall_timeout_ms: JAVA_WALL_TIMEOUT_MS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_per_language() {
        let config = JudgeConfig::default();

        // Interpreted: lower memory, longer inner guard
        assert_eq!(config.limits(Language::Python).memory_limit_mb, 128);
        assert_eq!(config.limits(Language::Python).run_timeout_secs, 10);

        // Compiled: higher memory, wall budget covering compile + run
        assert_eq!(config.limits(Language::Java).memory_limit_mb, 512);
        assert!(
            config.limits(Language::Java).wall_timeout_ms
                > config.limits(Language::Java).run_timeout_secs * 1000
        );
    }

    #[test]
    fn test_wall_budget_exceeds_inner_guard() {
        let config = JudgeConfig::default();
        for language in [Language::Python, Language::Java] {
            let limits = config.limits(language);
            assert!(limits.wall_timeout_ms > limits.run_timeout_secs * 1000);
        }
    }
}
