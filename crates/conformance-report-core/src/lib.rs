// crates/conformance-report-core/src/lib.rs
// ============================================================================
// Module: Conformance Report Core Library
// Description: Run configuration, input discovery, and report generation.
// Purpose: Single source of truth for how result files become a report.
// Dependencies: serde, serde_json, thiserror, time, tracing, walkdir
// ============================================================================

//! ## Overview
//! `conformance-report-core` owns the run configuration record, discovery of
//! Cucumber JSON result files, and the [`ReportGenerator`] seam that turns a
//! configuration into an HTML report plus updated trend data.
//!
//! The built-in [`HtmlReportGenerator`] is deliberately small: it counts
//! statuses, appends one trend record per build, and writes a static page.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod configuration;
pub mod discovery;
pub mod generator;
pub mod model;
pub mod render;
pub mod stats;
pub mod trends;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use configuration::Classification;
pub use configuration::PresentationMode;
pub use configuration::RunConfiguration;
pub use configuration::SortingMethod;
pub use discovery::DiscoveryError;
pub use discovery::REPORT_SUFFIX;
pub use discovery::discover_report_files;
pub use generator::GenerationError;
pub use generator::GenerationSummary;
pub use generator::HtmlReportGenerator;
pub use generator::ReportGenerator;
