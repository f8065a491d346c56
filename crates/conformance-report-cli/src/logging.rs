// crates/conformance-report-cli/src/logging.rs
// ============================================================================
// Module: CLI Logging
// Description: Tracing subscriber setup for the conformance-report binary.
// Purpose: Route pipeline events to stderr with an env-controlled filter.
// Dependencies: tracing-subscriber
// ============================================================================

//! ## Overview
//! Log events go to stderr so stdout stays reserved for command output. The
//! filter is read from [`LOG_ENV`] and defaults to [`DEFAULT_LOG_DIRECTIVE`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "CONFORMANCE_REPORT_LOG";
/// Filter applied when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

// ============================================================================
// SECTION: Setup
// ============================================================================

/// Builds the log filter from an optional directive.
///
/// Empty or unparsable directives fall back to [`DEFAULT_LOG_DIRECTIVE`].
#[must_use]
pub fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Installs the global stderr subscriber.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init_logging(directive: Option<&str>) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(directive))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
