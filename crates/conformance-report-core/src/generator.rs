// crates/conformance-report-core/src/generator.rs
// ============================================================================
// Module: Report Generator
// Description: Generator seam plus the built-in static HTML generator.
// Purpose: Turn a run configuration into a report tree and trend update.
// Dependencies: serde_json, thiserror, time, tracing
// ============================================================================

//! ## Overview
//! [`ReportGenerator`] is the single entry point invoked once per process.
//! [`HtmlReportGenerator`] reads every input, orders features, tallies
//! statistics, appends a trend record, and writes
//! `<output>/conformance-html-reports/overview.html`.
//!
//! Every failure aborts generation; no partial report is promised.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use tracing::info;

use crate::configuration::PresentationMode;
use crate::configuration::RunConfiguration;
use crate::configuration::SortingMethod;
use crate::model::Feature;
use crate::render::ReportView;
use crate::render::render_overview;
use crate::stats::FeatureStats;
use crate::stats::ReportTotals;
use crate::trends::Trends;
use crate::trends::TrendsError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted size of a single result file.
pub const MAX_RESULT_FILE_BYTES: usize = 64 * 1024 * 1024;
/// Directory under the output directory holding the HTML pages.
pub const HTML_REPORT_DIR: &str = "conformance-html-reports";
/// File name of the overview page.
pub const OVERVIEW_FILE: &str = "overview.html";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Report generation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A result file could not be read.
    #[error("cannot read result file {path}: {source}")]
    Read {
        /// Result file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A result file exceeds [`MAX_RESULT_FILE_BYTES`].
    #[error("result file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// Result file path.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
    /// A result file is not Cucumber JSON.
    #[error("cannot parse result file {path}: {source}")]
    Parse {
        /// Result file path.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// The trend file could not be loaded or stored.
    #[error("trend file {path}: {source}")]
    Trends {
        /// Trend file path.
        path: PathBuf,
        /// Underlying trend error.
        #[source]
        source: TrendsError,
    },
    /// The generation timestamp could not be formatted.
    #[error("cannot format report timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// The report tree could not be written.
    #[error("cannot write report to {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// SECTION: Generator Trait
// ============================================================================

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Number of result files consumed.
    pub input_files: usize,
    /// Summed statistics.
    pub totals: ReportTotals,
    /// Overview page path.
    pub overview_path: PathBuf,
    /// Trend file path.
    pub trend_file: PathBuf,
    /// Builds stored in the trend file after this run.
    pub trend_builds: usize,
}

/// Report generator invoked once per process.
pub trait ReportGenerator {
    /// Generates the report described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when any input, trend, or output step fails.
    fn generate(&self, config: &RunConfiguration) -> Result<GenerationSummary, GenerationError>;
}

// ============================================================================
// SECTION: HTML Generator
// ============================================================================

/// Built-in generator writing a static HTML overview.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlReportGenerator;

impl HtmlReportGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReportGenerator {
    fn generate(&self, config: &RunConfiguration) -> Result<GenerationSummary, GenerationError> {
        let mut features = Vec::new();
        for path in &config.input_files {
            let mut decoded = read_features(path)?;
            debug!(path = %path.display(), features = decoded.len(), "loaded result file");
            features.append(&mut decoded);
        }
        sort_features(&mut features, config.sorting_method);

        let features: Vec<(Feature, FeatureStats)> = features
            .into_iter()
            .map(|feature| {
                let stats = FeatureStats::from_feature(&feature);
                (feature, stats)
            })
            .collect();
        let totals = ReportTotals::from_features(features.iter().map(|(_, stats)| stats));

        let mut trends = Trends::load(&config.trend_file).map_err(|source| {
            GenerationError::Trends {
                path: config.trend_file.clone(),
                source,
            }
        })?;
        trends.append(&config.build_number, &totals);
        trends.truncate_oldest(config.trends_limit);
        trends.store(&config.trend_file).map_err(|source| GenerationError::Trends {
            path: config.trend_file.clone(),
            source,
        })?;

        let generated_at = format_timestamp(OffsetDateTime::now_utc())?;
        let html = render_overview(&ReportView {
            project_name: &config.project_name,
            build_number: &config.build_number,
            generated_at: &generated_at,
            classifications: &config.classifications,
            features: &features,
            totals: &totals,
            trends: &trends,
            expand_steps: config.has_presentation_mode(PresentationMode::ExpandAllSteps),
            parallel_testing: config.has_presentation_mode(PresentationMode::ParallelTesting),
        });

        let report_dir = config.output_dir.join(HTML_REPORT_DIR);
        fs::create_dir_all(&report_dir).map_err(|source| GenerationError::Write {
            path: report_dir.clone(),
            source,
        })?;
        let overview_path = report_dir.join(OVERVIEW_FILE);
        fs::write(&overview_path, html).map_err(|source| GenerationError::Write {
            path: overview_path.clone(),
            source,
        })?;
        info!(
            path = %overview_path.display(),
            features = totals.total_features(),
            failed_scenarios = totals.failed_scenarios,
            "report written"
        );

        Ok(GenerationSummary {
            input_files: config.input_files.len(),
            totals,
            overview_path,
            trend_file: config.trend_file.clone(),
            trend_builds: trends.len(),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Formats the report timestamp as RFC 3339.
fn format_timestamp(now: OffsetDateTime) -> Result<String, GenerationError> {
    Ok(now.format(&Rfc3339)?)
}

/// Reads and decodes one result file.
fn read_features(path: &Path) -> Result<Vec<Feature>, GenerationError> {
    let bytes = read_bytes_with_limit(path, MAX_RESULT_FILE_BYTES)?;
    serde_json::from_slice(&bytes).map_err(|source| GenerationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, GenerationError> {
    let read_error = |source| GenerationError::Read {
        path: path.to_path_buf(),
        source,
    };
    let too_large = |size| GenerationError::TooLarge {
        path: path.to_path_buf(),
        size,
        limit: max_bytes,
    };
    let file = File::open(path).map_err(read_error)?;
    let size = file.metadata().map_err(read_error)?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| too_large(size))?;
    if size > limit {
        return Err(too_large(size));
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(read_error)?;
    if bytes.len() > max_bytes {
        return Err(too_large(u64::try_from(bytes.len()).unwrap_or(u64::MAX)));
    }
    Ok(bytes)
}

/// Orders features per the configured sorting method.
fn sort_features(features: &mut [Feature], method: SortingMethod) {
    match method {
        SortingMethod::Natural => {}
        SortingMethod::Alphabetical => {
            features.sort_by(|left, right| {
                left.name.cmp(&right.name).then_with(|| left.uri.cmp(&right.uri))
            });
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
