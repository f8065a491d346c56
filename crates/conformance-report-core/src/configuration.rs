// crates/conformance-report-core/src/configuration.rs
// ============================================================================
// Module: Run Configuration
// Description: The configuration record handed to a report generator.
// Purpose: Capture every input the generator needs for one invocation.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`RunConfiguration`] is built once per process, after discovery, and is
//! passed by reference to exactly one [`crate::ReportGenerator`] call.
//!
//! ## Invariants
//! - `output_dir` and `trend_file` are never empty.
//! - `input_files` keeps discovery order; it may be empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Enums
// ============================================================================

/// Feature ordering applied by the report generator.
///
/// # Invariants
/// - Variants are stable for profile parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMethod {
    /// Keep features in input-file order.
    #[default]
    Natural,
    /// Order features by name, then by URI.
    Alphabetical,
}

impl SortingMethod {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Alphabetical => "alphabetical",
        }
    }
}

impl fmt::Display for SortingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-only switches for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    /// Render every step expanded instead of collapsed.
    ExpandAllSteps,
    /// Mark the report as produced by parallel runners.
    ParallelTesting,
}

impl PresentationMode {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpandAllSteps => "expand_all_steps",
            Self::ParallelTesting => "parallel_testing",
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Labeled key/value pair shown in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Label (for example `Release`).
    pub name: String,
    /// Value (for example `1.19`).
    pub value: String,
}

impl Classification {
    /// Constructs a classification from a name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Configuration record for a single report generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Destination for the generated report tree.
    pub output_dir: PathBuf,
    /// Result files to include, in discovery order.
    pub input_files: Vec<PathBuf>,
    /// Project name shown in the report.
    pub project_name: String,
    /// Build identifier recorded in the report and trend file.
    pub build_number: String,
    /// Display-only classifications, in declaration order.
    pub classifications: Vec<Classification>,
    /// Feature ordering.
    pub sorting_method: SortingMethod,
    /// Presentation switches.
    pub presentation_modes: BTreeSet<PresentationMode>,
    /// Historical trend data file, read and rewritten by the generator.
    pub trend_file: PathBuf,
    /// Maximum number of trend records kept (0 keeps all).
    pub trends_limit: usize,
}

impl RunConfiguration {
    /// Returns true when the given presentation mode is enabled.
    #[must_use]
    pub fn has_presentation_mode(&self, mode: PresentationMode) -> bool {
        self.presentation_modes.contains(&mode)
    }
}
