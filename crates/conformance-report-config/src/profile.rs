// crates/conformance-report-config/src/profile.rs
// ============================================================================
// Module: Report Profile
// Description: Report constants with an optional TOML override file.
// Purpose: Externalize project name, build number, and presentation switches.
// Dependencies: conformance-report-core, serde, toml
// ============================================================================

//! ## Overview
//! Without a profile, every report carries the built-in constants below. A
//! profile file may override any subset of them; unknown keys are rejected
//! so typos fail loudly instead of being ignored.
//!
//! ```toml
//! project_name = "Ingress Conformance Test"
//! build_number = "42"
//! sorting_method = "alphabetical"
//! presentation_modes = ["expand_all_steps"]
//! trends_limit = 30
//!
//! [classifications]
//! Release = "1.19"
//! Controller = "ingress-nginx"
//! ```
//!
//! Classifications are shown in file order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use conformance_report_core::Classification;
use conformance_report_core::PresentationMode;
use conformance_report_core::SortingMethod;
use serde::Deserialize;
use toml::Table;
use toml::Value;

use crate::settings::ConfigurationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Project name used when no profile overrides it.
pub const DEFAULT_PROJECT_NAME: &str = "Ingress Conformance Test";
/// Build number used when no profile overrides it.
pub const DEFAULT_BUILD_NUMBER: &str = "1";
/// Classification label used when no profile overrides it.
pub const DEFAULT_CLASSIFICATION_NAME: &str = "Release";
/// Classification value used when no profile overrides it.
pub const DEFAULT_CLASSIFICATION_VALUE: &str = "1.19";
/// Maximum profile file size in bytes.
pub(crate) const MAX_PROFILE_FILE_SIZE: usize = 1024 * 1024;
/// Maximum number of classifications.
pub(crate) const MAX_CLASSIFICATIONS: usize = 64;
/// Maximum length of any profile string value.
pub(crate) const MAX_PROFILE_VALUE_LENGTH: usize = 256;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Report constants applied to every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportProfile {
    /// Project name shown in the report.
    pub project_name: String,
    /// Build identifier recorded in the report and trend file.
    pub build_number: String,
    /// Display-only classifications.
    pub classifications: Vec<Classification>,
    /// Feature ordering.
    pub sorting_method: SortingMethod,
    /// Presentation switches.
    pub presentation_modes: BTreeSet<PresentationMode>,
    /// Maximum trend records kept (0 keeps all).
    pub trends_limit: usize,
}

impl Default for ReportProfile {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            build_number: DEFAULT_BUILD_NUMBER.to_string(),
            classifications: vec![Classification::new(
                DEFAULT_CLASSIFICATION_NAME,
                DEFAULT_CLASSIFICATION_VALUE,
            )],
            sorting_method: SortingMethod::Natural,
            presentation_modes: BTreeSet::from([PresentationMode::ExpandAllSteps]),
            trends_limit: 0,
        }
    }
}

/// On-disk profile; every field is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    /// Project name override.
    project_name: Option<String>,
    /// Build number override.
    build_number: Option<String>,
    /// Classifications override as `name = "value"` pairs in file order
    /// (replaces the defaults entirely).
    classifications: Option<Table>,
    /// Sorting method override.
    sorting_method: Option<SortingMethod>,
    /// Presentation modes override (replaces the defaults entirely).
    presentation_modes: Option<Vec<PresentationMode>>,
    /// Trend limit override.
    trends_limit: Option<usize>,
}

impl ReportProfile {
    /// Loads a profile file and applies it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the file cannot be read, exceeds
    /// the size limit, is not UTF-8 TOML, or contains invalid values.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let io_error = |reason: String| ConfigurationError::ProfileIo {
            path: path.to_path_buf(),
            reason,
        };
        let too_large =
            || ConfigurationError::ProfileInvalid("profile file exceeds size limit".to_string());
        let file = File::open(path).map_err(|err| io_error(err.to_string()))?;
        let size = file.metadata().map_err(|err| io_error(err.to_string()))?.len();
        let limit = u64::try_from(MAX_PROFILE_FILE_SIZE).map_err(|_| too_large())?;
        if size > limit {
            return Err(too_large());
        }
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| io_error(err.to_string()))?;
        if bytes.len() > MAX_PROFILE_FILE_SIZE {
            return Err(too_large());
        }
        let content = std::str::from_utf8(&bytes).map_err(|_| {
            ConfigurationError::ProfileInvalid("profile file must be utf-8".to_string())
        })?;
        Self::from_toml_str(content)
    }

    /// Parses profile TOML and applies it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        let file: ProfileFile = toml::from_str(content)
            .map_err(|err| ConfigurationError::ProfileParse(err.to_string()))?;
        let mut profile = Self::default();
        if let Some(project_name) = file.project_name {
            profile.project_name = project_name.trim().to_string();
        }
        if let Some(build_number) = file.build_number {
            profile.build_number = build_number.trim().to_string();
        }
        if let Some(classifications) = file.classifications {
            profile.classifications = classifications_from_table(classifications)?;
        }
        if let Some(sorting_method) = file.sorting_method {
            profile.sorting_method = sorting_method;
        }
        if let Some(modes) = file.presentation_modes {
            profile.presentation_modes = modes.into_iter().collect();
        }
        if let Some(trends_limit) = file.trends_limit {
            profile.trends_limit = trends_limit;
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Validates profile values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ProfileInvalid`] on the first violation.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_value("project_name", &self.project_name)?;
        validate_value("build_number", &self.build_number)?;
        if self.classifications.len() > MAX_CLASSIFICATIONS {
            return Err(ConfigurationError::ProfileInvalid(format!(
                "classifications exceeds max entries ({MAX_CLASSIFICATIONS})"
            )));
        }
        for classification in &self.classifications {
            validate_value("classifications.name", &classification.name)?;
            if classification.value.len() > MAX_PROFILE_VALUE_LENGTH {
                return Err(ConfigurationError::ProfileInvalid(
                    "classifications.value exceeds max length".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Converts the `[classifications]` table into ordered pairs.
fn classifications_from_table(table: Table) -> Result<Vec<Classification>, ConfigurationError> {
    table
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok(Classification::new(name, value)),
            _ => Err(ConfigurationError::ProfileInvalid(format!(
                "classifications.{name} must be a string"
            ))),
        })
        .collect()
}

/// Validates a required string value.
fn validate_value(field: &str, value: &str) -> Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::ProfileInvalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_PROFILE_VALUE_LENGTH {
        return Err(ConfigurationError::ProfileInvalid(format!("{field} exceeds max length")));
    }
    Ok(())
}
