//! Language definitions and in-container command construction
//!
//! Each supported language carries its fixed source filename and knows how
//! to build the shell command executed inside its isolation environment.
//! Compiled-language execution is two phases within one invocation:
//! compile, then run only if compilation succeeded.

use serde::{Deserialize, Serialize};

use crate::constants::{CONTAINER_WORKSPACE, STDIN_FILE};

/// A supported submission language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
}

/// Execution model of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageKind {
    Interpreted,
    Compiled,
}

impl Language {
    /// Parse a language identifier as supplied by the API layer
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// Get the execution model for this language
    pub fn kind(&self) -> LanguageKind {
        match self {
            Language::Python => LanguageKind::Interpreted,
            Language::Java => LanguageKind::Compiled,
        }
    }

    /// Get the language identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    /// Get the fixed, language-conventional source filename
    pub fn source_file(&self) -> &'static str {
        match self {
            Language::Python => "Main.py",
            Language::Java => "Main.java",
        }
    }

    /// Build the shell command executed inside the isolation environment.
    ///
    /// `run_timeout_secs` is the inner guard wrapping the interpreter or
    /// compiler+VM invocation, so a hung process is reaped even if the
    /// outer supervisory kill is delayed.
    pub fn run_command(&self, run_timeout_secs: u64) -> String {
        match self {
            Language::Python => format!(
                "timeout {}s python3 {ws}/{src} < {ws}/{stdin}",
                run_timeout_secs,
                ws = CONTAINER_WORKSPACE,
                src = self.source_file(),
                stdin = STDIN_FILE,
            ),
            Language::Java => format!(
                "javac {ws}/{src} && timeout {}s java -cp {ws} Main < {ws}/{stdin}",
                run_timeout_secs,
                ws = CONTAINER_WORKSPACE,
                src = self.source_file(),
                stdin = STDIN_FILE,
            ),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Language::from_name("python"), Some(Language::Python));
        assert_eq!(Language::from_name("java"), Some(Language::Java));
        assert_eq!(Language::from_name("cobol"), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(Language::Python.kind(), LanguageKind::Interpreted);
        assert_eq!(Language::Java.kind(), LanguageKind::Compiled);
    }

    #[test]
    fn test_python_run_command() {
        let cmd = Language::Python.run_command(10);
        assert!(cmd.starts_with("timeout 10s python3"));
        assert!(cmd.contains("/workspace/Main.py"));
        assert!(cmd.contains("< /workspace/input.txt"));
    }

    #[test]
    fn test_java_run_command_compiles_then_runs() {
        let cmd = Language::Java.run_command(5);
        assert!(cmd.contains("javac /workspace/Main.java"));
        assert!(cmd.contains("&& timeout 5s java -cp /workspace Main"));
        // The compile phase must not sit behind the run guard
        assert!(cmd.find("javac").unwrap() < cmd.find("timeout").unwrap());
    }
}
