// crates/conformance-report-config/src/lib.rs
// ============================================================================
// Module: Conformance Report Config Library
// Description: Settings resolution for report generation runs.
// Purpose: Single source of truth for environment and profile semantics.
// Dependencies: conformance-report-core, serde, toml
// ============================================================================

//! ## Overview
//! `conformance-report-config` resolves the environment variables, optional
//! CLI overrides, and an optional TOML profile into [`ReportSettings`], then
//! assembles the [`conformance_report_core::RunConfiguration`] handed to the
//! report generator.
//!
//! Resolution fails closed: a missing input root is fatal before any
//! filesystem traversal takes place.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod profile;
pub mod settings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use profile::*;
pub use settings::*;
