//! Submission and test case models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::languages::Language;

/// Test case visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Shown to users; exercised by `run` for interactive feedback
    Public,
    /// Withheld from users; the set a verdict is graded against
    Hidden,
}

/// A single input/expected-output pair. Read-only within the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    pub visibility: Visibility,
}

impl TestCase {
    pub fn new(
        input: impl Into<String>,
        expected_output: impl Into<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            visibility,
        }
    }

    /// Create a public test case
    pub fn public(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self::new(input, expected_output, Visibility::Public)
    }

    /// Create a hidden test case
    pub fn hidden(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self::new(input, expected_output, Visibility::Hidden)
    }
}

/// One judging invocation's input. Immutable, owned exclusively by the
/// invocation that judges it, and discarded after completion.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Submission ID, also the workspace directory key
    pub id: Uuid,
    pub language: Language,
    pub source_code: String,
    /// Ordered test case sequence; results preserve this order
    pub test_cases: Vec<TestCase>,
}

impl Submission {
    pub fn new(
        language: Language,
        source_code: impl Into<String>,
        test_cases: Vec<TestCase>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            language,
            source_code: source_code.into(),
            test_cases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_ids_are_unique() {
        let a = Submission::new(Language::Python, "print(1)", vec![]);
        let b = Submission::new(Language::Python, "print(1)", vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_visibility_wire_format() {
        let case = TestCase::hidden("1\n", "1");
        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["visibility"], "hidden");
        assert_eq!(json["expectedOutput"], "1");
    }
}
