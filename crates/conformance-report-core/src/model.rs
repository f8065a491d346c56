// crates/conformance-report-core/src/model.rs
// ============================================================================
// Module: Cucumber Result Model
// Description: Serde model for Cucumber JSON result files.
// Purpose: Decode the subset of the format the report needs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A result file is a JSON array of [`Feature`] values as written by Cucumber
//! style runners (godog `--format=cucumber`). Unknown fields are ignored so
//! newer runner output stays readable. Durations are nanoseconds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Status
// ============================================================================

/// Outcome of a single step or hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Step passed.
    Passed,
    /// Step failed.
    Failed,
    /// Step was skipped after an earlier failure.
    Skipped,
    /// Step is marked pending.
    Pending,
    /// No step definition matched.
    #[default]
    Undefined,
    /// More than one step definition matched.
    Ambiguous,
    /// Status label not known to this reader.
    #[serde(other)]
    Unknown,
}

impl Status {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Pending => "pending",
            Self::Undefined => "undefined",
            Self::Ambiguous => "ambiguous",
            Self::Unknown => "unknown",
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Tag attached to a feature or scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag text including the leading `@`.
    pub name: String,
}

/// Result attached to a step or hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Outcome.
    #[serde(default)]
    pub status: Status,
    /// Duration in nanoseconds.
    #[serde(default)]
    pub duration: Option<u64>,
    /// Failure message, when the step failed.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A step, or a before/after hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Gherkin keyword (`Given `, `When `, ...).
    #[serde(default)]
    pub keyword: String,
    /// Step text.
    #[serde(default)]
    pub name: String,
    /// Source line.
    #[serde(default)]
    pub line: Option<u64>,
    /// Execution result; absent results read as undefined.
    #[serde(default)]
    pub result: StepResult,
}

impl Step {
    /// Returns the step status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.result.status
    }

    /// Returns the step duration in nanoseconds (zero when absent).
    #[must_use]
    pub fn duration_nanos(&self) -> u64 {
        self.result.duration.unwrap_or(0)
    }
}

/// A scenario or background.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Runner-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Scenario name.
    #[serde(default)]
    pub name: String,
    /// Gherkin keyword (`Scenario`, `Background`, ...).
    #[serde(default)]
    pub keyword: String,
    /// Element kind (`scenario` or `background`).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Scenario tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Hooks run before the steps.
    #[serde(default)]
    pub before: Vec<Step>,
    /// Steps in execution order.
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Hooks run after the steps.
    #[serde(default)]
    pub after: Vec<Step>,
}

impl Element {
    /// Returns true for backgrounds, which contribute steps but not scenarios.
    #[must_use]
    pub fn is_background(&self) -> bool {
        self.kind.eq_ignore_ascii_case("background")
    }

    /// Iterates hooks and steps in execution order.
    pub fn all_steps(&self) -> impl Iterator<Item = &Step> {
        self.before.iter().chain(self.steps.iter()).chain(self.after.iter())
    }
}

/// A feature file's results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature file path as recorded by the runner.
    #[serde(default)]
    pub uri: String,
    /// Runner-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Feature name.
    #[serde(default)]
    pub name: String,
    /// Gherkin keyword.
    #[serde(default)]
    pub keyword: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Feature tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Scenarios and backgrounds.
    #[serde(default)]
    pub elements: Vec<Element>,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "Test-only panic-based assertions are permitted.")]

    use super::Feature;
    use super::Status;

    #[test]
    fn decodes_godog_output_and_ignores_unknown_fields() {
        let raw = r#"[{
            "uri": "features/default_backend.feature",
            "id": "default-backend",
            "keyword": "Feature",
            "name": "Default backend",
            "line": 1,
            "elements": [{
                "id": "default-backend;ingress-with-only-a-default-backend",
                "keyword": "Scenario",
                "name": "Ingress with only a default backend",
                "type": "scenario",
                "steps": [
                    {"keyword": "Given ", "name": "a new random namespace",
                     "match": {"location": "state.go:12"},
                     "result": {"status": "passed", "duration": 1500}},
                    {"keyword": "Then ", "name": "the response status-code must be 200",
                     "result": {"status": "failed", "error_message": "expected 200, got 404"}},
                    {"keyword": "And ", "name": "never ran"}
                ]
            }]
        }]"#;
        let features: Vec<Feature> = serde_json::from_str(raw).expect("decode");
        let steps = &features[0].elements[0].steps;
        assert_eq!(steps[0].status(), Status::Passed);
        assert_eq!(steps[0].duration_nanos(), 1500);
        assert_eq!(steps[1].status(), Status::Failed);
        assert_eq!(steps[1].result.error_message.as_deref(), Some("expected 200, got 404"));
        assert_eq!(steps[2].status(), Status::Undefined);
        assert!(!features[0].elements[0].is_background());
    }

    #[test]
    fn unrecognized_status_reads_as_unknown() {
        let raw = r#"{"status": "flaky"}"#;
        let result: super::StepResult = serde_json::from_str(raw).expect("decode");
        assert_eq!(result.status, Status::Unknown);
    }
}
