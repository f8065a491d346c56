// crates/conformance-report-core/src/trends.rs
// ============================================================================
// Module: Trend File
// Description: Historical per-build statistics stored as JSON.
// Purpose: Load, extend, bound, and persist the trend file across runs.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The trend file is a JSON object of parallel arrays, one entry per build.
//! A missing file starts an empty history; a corrupt file fails closed so an
//! existing history is never silently overwritten.
//!
//! ## Invariants
//! - Every array has the same length as `buildNumbers`.
//! - Records are ordered oldest first.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::stats::ReportTotals;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted trend file size in bytes.
pub const MAX_TREND_FILE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Trend file errors.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Reading or writing the file failed.
    #[error("trend file io error: {0}")]
    Io(#[from] std::io::Error),
    /// The file exceeds [`MAX_TREND_FILE_BYTES`].
    #[error("trend file is {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// The file is not valid trend JSON.
    #[error("trend file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Arrays in the file disagree on length.
    #[error("trend file arrays are inconsistent: {0}")]
    Inconsistent(String),
}

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parallel-array trend history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Trends {
    /// Build identifiers.
    #[serde(default)]
    pub build_numbers: Vec<String>,
    /// Passed features per build.
    #[serde(default)]
    pub passed_features: Vec<u64>,
    /// Failed features per build.
    #[serde(default)]
    pub failed_features: Vec<u64>,
    /// Total features per build.
    #[serde(default)]
    pub total_features: Vec<u64>,
    /// Passed scenarios per build.
    #[serde(default)]
    pub passed_scenarios: Vec<u64>,
    /// Failed scenarios per build.
    #[serde(default)]
    pub failed_scenarios: Vec<u64>,
    /// Total scenarios per build.
    #[serde(default)]
    pub total_scenarios: Vec<u64>,
    /// Passed steps per build.
    #[serde(default)]
    pub passed_steps: Vec<u64>,
    /// Failed steps per build.
    #[serde(default)]
    pub failed_steps: Vec<u64>,
    /// Skipped steps per build.
    #[serde(default)]
    pub skipped_steps: Vec<u64>,
    /// Pending steps per build.
    #[serde(default)]
    pub pending_steps: Vec<u64>,
    /// Undefined steps per build.
    #[serde(default)]
    pub undefined_steps: Vec<u64>,
    /// Total steps per build.
    #[serde(default)]
    pub total_steps: Vec<u64>,
    /// Summed duration per build in nanoseconds.
    #[serde(default)]
    pub durations: Vec<u64>,
}

/// One build's record, read back from [`Trends`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRecord<'a> {
    /// Build identifier.
    pub build_number: &'a str,
    /// Passed scenarios.
    pub passed_scenarios: u64,
    /// Failed scenarios.
    pub failed_scenarios: u64,
    /// Passed steps.
    pub passed_steps: u64,
    /// Failed steps.
    pub failed_steps: u64,
    /// Duration in nanoseconds.
    pub duration_nanos: u64,
}

impl Trends {
    /// Loads the trend file, starting empty when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError`] when the file cannot be read, is too large,
    /// or is not a consistent trend document.
    pub fn load(path: &Path) -> Result<Self, TrendsError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let bytes = read_with_limit(file, MAX_TREND_FILE_BYTES)?;
        let trends: Self = serde_json::from_slice(&bytes)?;
        trends.validate()?;
        Ok(trends)
    }

    /// Writes the trend file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`TrendsError`] when serialization or writing fails.
    pub fn store(&self, path: &Path) -> Result<(), TrendsError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Number of stored builds.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.build_numbers.len()
    }

    /// Returns true when no build is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.build_numbers.is_empty()
    }

    /// Appends one build's totals.
    pub fn append(&mut self, build_number: &str, totals: &ReportTotals) {
        self.build_numbers.push(build_number.to_string());
        self.passed_features.push(totals.passed_features);
        self.failed_features.push(totals.failed_features);
        self.total_features.push(totals.total_features());
        self.passed_scenarios.push(totals.passed_scenarios);
        self.failed_scenarios.push(totals.failed_scenarios);
        self.total_scenarios.push(totals.total_scenarios());
        self.passed_steps.push(totals.steps.passed);
        self.failed_steps.push(totals.steps.failed);
        self.skipped_steps.push(totals.steps.skipped);
        self.pending_steps.push(totals.steps.pending);
        self.undefined_steps.push(totals.steps.undefined);
        self.total_steps.push(totals.steps.total());
        self.durations.push(totals.duration_nanos);
    }

    /// Drops the oldest builds so at most `limit` remain (0 keeps all).
    pub fn truncate_oldest(&mut self, limit: usize) {
        if limit == 0 || self.len() <= limit {
            return;
        }
        let excess = self.len() - limit;
        self.build_numbers.drain(.. excess);
        for column in self.numeric_columns_mut() {
            column.drain(.. excess);
        }
    }

    /// Returns the stored builds, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<TrendRecord<'_>> {
        (0 .. self.len())
            .map(|index| TrendRecord {
                build_number: &self.build_numbers[index],
                passed_scenarios: self.passed_scenarios[index],
                failed_scenarios: self.failed_scenarios[index],
                passed_steps: self.passed_steps[index],
                failed_steps: self.failed_steps[index],
                duration_nanos: self.durations[index],
            })
            .collect()
    }

    /// Checks that every column matches the build count.
    fn validate(&self) -> Result<(), TrendsError> {
        let expected = self.len();
        let columns = [
            ("passedFeatures", &self.passed_features),
            ("failedFeatures", &self.failed_features),
            ("totalFeatures", &self.total_features),
            ("passedScenarios", &self.passed_scenarios),
            ("failedScenarios", &self.failed_scenarios),
            ("totalScenarios", &self.total_scenarios),
            ("passedSteps", &self.passed_steps),
            ("failedSteps", &self.failed_steps),
            ("skippedSteps", &self.skipped_steps),
            ("pendingSteps", &self.pending_steps),
            ("undefinedSteps", &self.undefined_steps),
            ("totalSteps", &self.total_steps),
            ("durations", &self.durations),
        ];
        for (name, column) in columns {
            if column.len() != expected {
                return Err(TrendsError::Inconsistent(format!(
                    "{name} has {} entries, buildNumbers has {expected}",
                    column.len()
                )));
            }
        }
        Ok(())
    }

    /// Mutable access to every numeric column.
    fn numeric_columns_mut(&mut self) -> [&mut Vec<u64>; 13] {
        [
            &mut self.passed_features,
            &mut self.failed_features,
            &mut self.total_features,
            &mut self.passed_scenarios,
            &mut self.failed_scenarios,
            &mut self.total_scenarios,
            &mut self.passed_steps,
            &mut self.failed_steps,
            &mut self.skipped_steps,
            &mut self.pending_steps,
            &mut self.undefined_steps,
            &mut self.total_steps,
            &mut self.durations,
        ]
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an open file while enforcing a hard size limit.
///
/// The read is capped at `max_bytes + 1` regardless of the reported size.
fn read_with_limit(file: File, max_bytes: usize) -> Result<Vec<u8>, TrendsError> {
    let too_large = |size| TrendsError::TooLarge {
        size,
        limit: max_bytes,
    };
    let size = file.metadata()?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| too_large(size))?;
    if size > limit {
        return Err(too_large(size));
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(too_large(u64::try_from(bytes.len()).unwrap_or(u64::MAX)));
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions are permitted."
    )]

    use std::fs;
    use std::fs::File;

    use super::Trends;
    use super::TrendsError;
    use super::read_with_limit;
    use crate::stats::ReportTotals;

    fn totals(passed_scenarios: u64) -> ReportTotals {
        ReportTotals {
            passed_features: 1,
            passed_scenarios,
            ..ReportTotals::default()
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let trends = Trends::load(&dir.path().join("trends.json")).unwrap();
        assert!(trends.is_empty());
    }

    #[test]
    fn append_then_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("trends.json");
        let mut trends = Trends::default();
        trends.append("1", &totals(3));
        trends.store(&path).unwrap();

        let mut loaded = Trends::load(&path).unwrap();
        loaded.append("2", &totals(4));
        assert_eq!(loaded.len(), 2);
        let records = loaded.records();
        assert_eq!(records[0].build_number, "1");
        assert_eq!(records[1].passed_scenarios, 4);
    }

    #[test]
    fn truncate_keeps_newest() {
        let mut trends = Trends::default();
        for build in 1 ..= 5 {
            trends.append(&build.to_string(), &totals(build));
        }
        trends.truncate_oldest(2);
        assert_eq!(trends.build_numbers, vec!["4", "5"]);
        assert_eq!(trends.passed_scenarios, vec![4, 5]);
        assert_eq!(trends.durations.len(), 2);

        trends.truncate_oldest(0);
        assert_eq!(trends.len(), 2);
    }

    #[test]
    fn inconsistent_arrays_fail_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.json");
        fs::write(&path, r#"{"buildNumbers": ["1", "2"], "passedFeatures": [1]}"#).unwrap();
        let err = Trends::load(&path).unwrap_err();
        assert!(matches!(err, TrendsError::Inconsistent(_)), "unexpected error: {err}");
    }

    #[test]
    fn corrupt_file_fails_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Trends::load(&path), Err(TrendsError::Parse(_))));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trends.json");
        fs::write(&path, b"{\"buildNumbers\": []}").unwrap();
        let err = read_with_limit(File::open(&path).unwrap(), 8).unwrap_err();
        assert!(matches!(err, TrendsError::TooLarge { size: 20, limit: 8 }), "unexpected: {err}");
        assert_eq!(read_with_limit(File::open(&path).unwrap(), 64).unwrap().len(), 20);
    }
}
