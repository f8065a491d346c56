// crates/conformance-report-cli/src/lib.rs
// ============================================================================
// Module: Conformance Report CLI Library
// Description: Shared helpers for the conformance-report binary.
// Purpose: Expose the message catalog and logging setup to the binary and tests.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Library half of the `conformance-report` CLI: the [`t!`] message catalog
//! and tracing subscriber initialization.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;
pub mod logging;
