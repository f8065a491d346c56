// crates/conformance-report-core/src/stats.rs
// ============================================================================
// Module: Result Statistics
// Description: Pass/fail tallies over decoded Cucumber features.
// Purpose: Provide the numbers shown in the report and stored as trends.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Statistics are computed per feature and summed into [`ReportTotals`].
//!
//! ## Invariants
//! - A scenario passes only when every hook and step has status `passed`.
//! - Backgrounds contribute steps and duration but are not scenarios.
//! - A feature passes only when all of its scenarios pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::model::Element;
use crate::model::Feature;
use crate::model::Status;

// ============================================================================
// SECTION: Step Counts
// ============================================================================

/// Step tallies by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepCounts {
    /// Passed steps.
    pub passed: u64,
    /// Failed steps.
    pub failed: u64,
    /// Skipped steps.
    pub skipped: u64,
    /// Pending steps.
    pub pending: u64,
    /// Undefined steps.
    pub undefined: u64,
    /// Ambiguous or unrecognized steps.
    pub other: u64,
}

impl StepCounts {
    /// Records one step outcome.
    pub const fn record(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
            Status::Pending => self.pending += 1,
            Status::Undefined => self.undefined += 1,
            Status::Ambiguous | Status::Unknown => self.other += 1,
        }
    }

    /// Total number of recorded steps.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.passed + self.failed + self.skipped + self.pending + self.undefined + self.other
    }

    /// Adds another tally into this one.
    pub const fn absorb(&mut self, other: &Self) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
        self.pending += other.pending;
        self.undefined += other.undefined;
        self.other += other.other;
    }
}

// ============================================================================
// SECTION: Feature Statistics
// ============================================================================

/// Statistics for one feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureStats {
    /// Passed scenarios.
    pub passed_scenarios: u64,
    /// Failed scenarios.
    pub failed_scenarios: u64,
    /// Step tallies, hooks included.
    pub steps: StepCounts,
    /// Summed duration in nanoseconds.
    pub duration_nanos: u64,
}

impl FeatureStats {
    /// Computes statistics for a feature.
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Self {
        let mut stats = Self::default();
        for element in &feature.elements {
            for step in element.all_steps() {
                stats.steps.record(step.status());
                stats.duration_nanos = stats.duration_nanos.saturating_add(step.duration_nanos());
            }
            if element.is_background() {
                continue;
            }
            if element_passed(element) {
                stats.passed_scenarios += 1;
            } else {
                stats.failed_scenarios += 1;
            }
        }
        stats
    }

    /// Total scenario count.
    #[must_use]
    pub const fn total_scenarios(&self) -> u64 {
        self.passed_scenarios + self.failed_scenarios
    }

    /// Returns true when no scenario failed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failed_scenarios == 0
    }
}

/// Returns true when every hook and step of the element passed.
#[must_use]
pub fn element_passed(element: &Element) -> bool {
    element.all_steps().all(|step| step.status() == Status::Passed)
}

// ============================================================================
// SECTION: Report Totals
// ============================================================================

/// Statistics summed over every feature in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    /// Passed features.
    pub passed_features: u64,
    /// Failed features.
    pub failed_features: u64,
    /// Passed scenarios.
    pub passed_scenarios: u64,
    /// Failed scenarios.
    pub failed_scenarios: u64,
    /// Step tallies.
    pub steps: StepCounts,
    /// Summed duration in nanoseconds.
    pub duration_nanos: u64,
}

impl ReportTotals {
    /// Sums per-feature statistics.
    #[must_use]
    pub fn from_features<'a>(stats: impl IntoIterator<Item = &'a FeatureStats>) -> Self {
        let mut totals = Self::default();
        for feature in stats {
            if feature.passed() {
                totals.passed_features += 1;
            } else {
                totals.failed_features += 1;
            }
            totals.passed_scenarios += feature.passed_scenarios;
            totals.failed_scenarios += feature.failed_scenarios;
            totals.steps.absorb(&feature.steps);
            totals.duration_nanos = totals.duration_nanos.saturating_add(feature.duration_nanos);
        }
        totals
    }

    /// Total feature count.
    #[must_use]
    pub const fn total_features(&self) -> u64 {
        self.passed_features + self.failed_features
    }

    /// Total scenario count.
    #[must_use]
    pub const fn total_scenarios(&self) -> u64 {
        self.passed_scenarios + self.failed_scenarios
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
