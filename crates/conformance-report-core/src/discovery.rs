// crates/conformance-report-core/src/discovery.rs
// ============================================================================
// Module: Input Discovery
// Description: Recursive discovery of Cucumber JSON result files.
// Purpose: Turn an input root into the ordered list of report inputs.
// Dependencies: thiserror, tracing, walkdir
// ============================================================================

//! ## Overview
//! Discovery walks the input root (a directory or a single file) and collects
//! every regular file whose name ends with [`REPORT_SUFFIX`]. Paths are made
//! absolute without resolving symlinks, then sorted so repeated runs over the
//! same tree produce the same report.
//!
//! Any traversal error aborts discovery; partial lists are never returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name suffix marking a Cucumber JSON result file.
pub const REPORT_SUFFIX: &str = "-report.json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Input discovery errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The input root could not be made absolute.
    #[error("cannot resolve input path {path}: {source}")]
    Io {
        /// Input root as given.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Walking the input tree failed (missing path, permissions, loops).
    #[error("cannot traverse {path}: {source}")]
    Traverse {
        /// Path at which traversal failed.
        path: PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error,
    },
}

// ============================================================================
// SECTION: Discovery
// ============================================================================

/// Returns true when `path` names a result file by suffix.
#[must_use]
pub fn is_report_file_name(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name.to_string_lossy().ends_with(REPORT_SUFFIX))
}

/// Collects all result files under `root`.
///
/// A root that is itself a matching file yields exactly that file. A root
/// with no matches yields an empty list.
///
/// # Errors
///
/// Returns [`DiscoveryError`] when the root cannot be resolved or any part
/// of the tree cannot be read.
pub fn discover_report_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let absolute_root = std::path::absolute(root).map_err(|source| DiscoveryError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut reports = Vec::new();
    for entry in WalkDir::new(&absolute_root) {
        let entry = entry.map_err(|source| DiscoveryError::Traverse {
            path: source.path().map_or_else(|| absolute_root.clone(), Path::to_path_buf),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_report_file_name(entry.path()) {
            debug!(path = %entry.path().display(), "discovered result file");
            reports.push(entry.into_path());
        }
    }

    reports.sort();
    Ok(reports)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
