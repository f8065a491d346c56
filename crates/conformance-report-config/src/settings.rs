// crates/conformance-report-config/src/settings.rs
// ============================================================================
// Module: Report Settings
// Description: Resolution of input, output, and trend paths for a run.
// Purpose: Provide strict, fail-closed settings with documented defaults.
// Dependencies: conformance-report-core, thiserror
// ============================================================================

//! ## Overview
//! Settings are resolved with the precedence CLI override, then environment
//! variable, then profile, then built-in default. Empty values count as unset.
//! Environment access goes through a lookup closure so callers (and tests)
//! never have to mutate the process environment.
//!
//! ## Invariants
//! - The input root has no default; resolution fails when it is missing.
//! - The output directory and trend file are never empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use conformance_report_core::RunConfiguration;
use thiserror::Error;

use crate::profile::ReportProfile;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable naming the input root (file or directory).
pub const INPUT_ENV_VAR: &str = "INPUT_JSON_FILES";
/// Legacy input variable, consulted only when [`INPUT_ENV_VAR`] is unset.
pub const LEGACY_INPUT_ENV_VAR: &str = "INPUT_JSON";
/// Environment variable naming the report output directory.
pub const OUTPUT_ENV_VAR: &str = "OUTPUT_DIRECTORY";
/// Environment variable naming the trend file.
pub const TREND_ENV_VAR: &str = "TREND_JSON";
/// Environment variable naming an optional TOML profile.
pub const PROFILE_ENV_VAR: &str = "REPORT_PROFILE";
/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "/reports";
/// Trend file name placed under the output directory by default.
pub const DEFAULT_TREND_FILE_NAME: &str = "trends.json";
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The required input root is not configured.
    #[error("environment variable {0} is not optional")]
    MissingInput(&'static str),
    /// A resolved path violates length limits.
    #[error("invalid {field}: {reason}")]
    InvalidPath {
        /// Setting name.
        field: &'static str,
        /// Violation description.
        reason: String,
    },
    /// The profile file could not be read.
    #[error("profile io error for {path}: {reason}")]
    ProfileIo {
        /// Profile path.
        path: PathBuf,
        /// Underlying error description.
        reason: String,
    },
    /// The profile file is not valid TOML for the profile schema.
    #[error("profile parse error: {0}")]
    ProfileParse(String),
    /// The profile contains an invalid value.
    #[error("invalid profile: {0}")]
    ProfileInvalid(String),
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Input root override.
    pub input: Option<PathBuf>,
    /// Output directory override.
    pub output_dir: Option<PathBuf>,
    /// Trend file override.
    pub trend_file: Option<PathBuf>,
    /// Profile file override.
    pub profile: Option<PathBuf>,
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Fully resolved settings for one run, minus the discovered input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Root file or directory searched for result files.
    pub input_root: PathBuf,
    /// Destination for the generated report tree.
    pub output_dir: PathBuf,
    /// Trend file read and rewritten by the generator.
    pub trend_file: PathBuf,
    /// Report constants (project, build, classifications, presentation).
    pub profile: ReportProfile,
}

impl ReportSettings {
    /// Resolves settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the input root is missing, a path
    /// violates limits, or the profile cannot be loaded.
    pub fn from_env(overrides: &SettingsOverrides) -> Result<Self, ConfigurationError> {
        Self::resolve(overrides, |key| env::var_os(OsStr::new(key)))
    }

    /// Resolves settings using `lookup` for environment access.
    ///
    /// Values are raw OS strings so paths that are not valid UTF-8 survive.
    ///
    /// The input root is checked first so a missing input fails before the
    /// profile file is touched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the input root is missing, a path
    /// violates limits, or the profile cannot be loaded.
    pub fn resolve<F>(overrides: &SettingsOverrides, lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let input_root = resolve_input_root(overrides, &lookup)?;
        let output_dir = non_empty_path(overrides.output_dir.as_deref())
            .or_else(|| env_path(&lookup, OUTPUT_ENV_VAR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
        let trend_file = non_empty_path(overrides.trend_file.as_deref())
            .or_else(|| env_path(&lookup, TREND_ENV_VAR))
            .unwrap_or_else(|| output_dir.join(DEFAULT_TREND_FILE_NAME));

        validate_path("input root", &input_root)?;
        validate_path("output directory", &output_dir)?;
        validate_path("trend file", &trend_file)?;

        let profile = match non_empty_path(overrides.profile.as_deref())
            .or_else(|| env_path(&lookup, PROFILE_ENV_VAR))
        {
            Some(path) => {
                validate_path("profile", &path)?;
                ReportProfile::load(&path)?
            }
            None => ReportProfile::default(),
        };

        Ok(Self {
            input_root,
            output_dir,
            trend_file,
            profile,
        })
    }

    /// Assembles the generator configuration from these settings.
    #[must_use]
    pub fn into_run_configuration(self, input_files: Vec<PathBuf>) -> RunConfiguration {
        let ReportProfile {
            project_name,
            build_number,
            classifications,
            sorting_method,
            presentation_modes,
            trends_limit,
        } = self.profile;
        RunConfiguration {
            output_dir: self.output_dir,
            input_files,
            project_name,
            build_number,
            classifications,
            sorting_method,
            presentation_modes,
            trend_file: self.trend_file,
            trends_limit,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the input root from the override, primary, or legacy variable.
fn resolve_input_root<F>(
    overrides: &SettingsOverrides,
    lookup: &F,
) -> Result<PathBuf, ConfigurationError>
where
    F: Fn(&str) -> Option<OsString>,
{
    non_empty_path(overrides.input.as_deref())
        .or_else(|| env_path(lookup, INPUT_ENV_VAR))
        .or_else(|| env_path(lookup, LEGACY_INPUT_ENV_VAR))
        .ok_or(ConfigurationError::MissingInput(INPUT_ENV_VAR))
}

/// Reads an environment variable as a path, treating empty values as unset.
fn env_path<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(key).filter(|value| !is_blank(value)).map(PathBuf::from)
}

/// Returns true for empty or ASCII-whitespace-only values.
fn is_blank(value: &OsStr) -> bool {
    value.as_encoded_bytes().trim_ascii().is_empty()
}

/// Returns an owned path unless it is empty.
fn non_empty_path(path: Option<&Path>) -> Option<PathBuf> {
    path.filter(|path| !path.as_os_str().is_empty()).map(Path::to_path_buf)
}

/// Validates a resolved path against length limits.
pub(crate) fn validate_path(field: &'static str, path: &Path) -> Result<(), ConfigurationError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigurationError::InvalidPath {
            field,
            reason: "path exceeds max length".to_string(),
        });
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigurationError::InvalidPath {
                field,
                reason: "path component too long".to_string(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
