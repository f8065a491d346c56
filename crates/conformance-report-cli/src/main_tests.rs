// crates/conformance-report-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for locale resolution, discovery output, and dispatch.
// Purpose: Ensure the generator is invoked once with the assembled configuration.
// Dependencies: conformance-report-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Drives `generate_report` with a recording generator so the assembled
//! [`RunConfiguration`] can be inspected without writing a report.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use conformance_report_cli::i18n::Locale;
use conformance_report_config::ReportSettings;
use conformance_report_config::SettingsOverrides;
use conformance_report_core::Classification;
use conformance_report_core::GenerationError;
use conformance_report_core::GenerationSummary;
use conformance_report_core::PresentationMode;
use conformance_report_core::ReportGenerator;
use conformance_report_core::RunConfiguration;
use conformance_report_core::SortingMethod;
use conformance_report_core::stats::ReportTotals;

use super::LangArg;
use super::OutputFormat;
use super::SettingsArgs;
use super::generate_report;
use super::render_discover_output;
use super::resolve_locale;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Generator that records every configuration it receives.
#[derive(Default)]
struct RecordingGenerator {
    /// Configurations passed to `generate`, in call order.
    calls: RefCell<Vec<RunConfiguration>>,
}

impl ReportGenerator for RecordingGenerator {
    fn generate(&self, config: &RunConfiguration) -> Result<GenerationSummary, GenerationError> {
        self.calls.borrow_mut().push(config.clone());
        Ok(GenerationSummary {
            input_files: config.input_files.len(),
            totals: ReportTotals::default(),
            overview_path: config.output_dir.join("overview.html"),
            trend_file: config.trend_file.clone(),
            trend_builds: 1,
        })
    }
}

/// Resolves settings against a fixed set of variables.
fn settings_for(vars: &[(&str, &Path)]) -> ReportSettings {
    let vars: Vec<(String, OsString)> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.as_os_str().to_os_string()))
        .collect();
    ReportSettings::resolve(&SettingsOverrides::default(), |key| {
        vars.iter().find(|(name, _)| name == key).map(|(_, value)| value.clone())
    })
    .expect("settings resolve")
}

// ============================================================================
// SECTION: Locale Resolution
// ============================================================================

#[test]
fn resolve_locale_prefers_flag_over_env() {
    let locale = resolve_locale(Some(LangArg::Ca), Some("en")).expect("locale");
    assert_eq!(locale, Locale::Ca);
}

#[test]
fn resolve_locale_reads_env_and_defaults_to_english() {
    assert_eq!(resolve_locale(None, Some("ca-ES")).expect("env locale"), Locale::Ca);
    assert_eq!(resolve_locale(None, None).expect("default"), Locale::En);
    assert_eq!(resolve_locale(None, Some("   ")).expect("blank"), Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_value() {
    let err = resolve_locale(None, Some("xx")).expect_err("invalid locale");
    assert!(err.to_string().contains("CONFORMANCE_REPORT_LANG"));
    assert!(err.to_string().contains("xx"));
}

// ============================================================================
// SECTION: Generate Pipeline
// ============================================================================

#[test]
fn generate_report_passes_discovered_files_and_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("results");
    fs::create_dir_all(&input).expect("mkdir");
    fs::write(input.join("a-report.json"), "[]").expect("write a");
    fs::write(input.join("b-report.json"), "[]").expect("write b");
    fs::write(input.join("notes.txt"), "ignored").expect("write notes");

    let settings = settings_for(&[("INPUT_JSON_FILES", &input)]);
    let generator = RecordingGenerator::default();
    let summary = generate_report(settings, &generator).expect("generate");
    assert_eq!(summary.input_files, 2);

    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 1);
    let config = &calls[0];
    let root = std::path::absolute(&input).expect("absolute");
    assert_eq!(config.input_files, vec![root.join("a-report.json"), root.join("b-report.json")]);
    assert_eq!(config.output_dir, PathBuf::from("/reports"));
    assert_eq!(config.trend_file, PathBuf::from("/reports/trends.json"));
    assert_eq!(config.project_name, "Ingress Conformance Test");
    assert_eq!(config.build_number, "1");
    assert_eq!(config.classifications, vec![Classification::new("Release", "1.19")]);
    assert_eq!(config.sorting_method, SortingMethod::Natural);
    assert_eq!(config.presentation_modes, BTreeSet::from([PresentationMode::ExpandAllSteps]));
    assert_eq!(config.trends_limit, 0);
}

#[test]
fn generate_report_invokes_generator_once_without_matches() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write notes");
    let output = dir.path().join("out");

    let settings =
        settings_for(&[("INPUT_JSON_FILES", dir.path()), ("OUTPUT_DIRECTORY", &output)]);
    let generator = RecordingGenerator::default();
    generate_report(settings, &generator).expect("generate");

    let calls = generator.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].input_files.is_empty());
    assert_eq!(calls[0].output_dir, output);
    assert_eq!(calls[0].trend_file, output.join("trends.json"));
}

#[test]
fn generate_report_fails_before_generation_when_root_is_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing");
    let settings = settings_for(&[("INPUT_JSON_FILES", &missing)]);
    let generator = RecordingGenerator::default();
    let err = generate_report(settings, &generator).expect_err("missing root");
    assert!(err.to_string().contains("missing"));
    assert!(generator.calls.borrow().is_empty());
}

#[test]
fn settings_args_convert_into_overrides() {
    let args = SettingsArgs {
        input: Some(PathBuf::from("in")),
        output_dir: Some(PathBuf::from("out")),
        trend_file: None,
        profile: Some(PathBuf::from("profile.toml")),
    };
    let overrides = SettingsOverrides::from(args);
    assert_eq!(overrides.input, Some(PathBuf::from("in")));
    assert_eq!(overrides.output_dir, Some(PathBuf::from("out")));
    assert_eq!(overrides.trend_file, None);
    assert_eq!(overrides.profile, Some(PathBuf::from("profile.toml")));
}

// ============================================================================
// SECTION: Discover Output
// ============================================================================

#[test]
fn discover_text_lists_one_path_per_line() {
    let files = vec![PathBuf::from("/r/a-report.json"), PathBuf::from("/r/b-report.json")];
    let output = render_discover_output(Path::new("/r"), &files, OutputFormat::Text)
        .expect("render");
    assert_eq!(output, "/r/a-report.json\n/r/b-report.json\n");
}

#[test]
fn discover_text_reports_empty_root() {
    let output =
        render_discover_output(Path::new("/r"), &[], OutputFormat::Text).expect("render");
    assert!(output.contains("/r"));
    assert!(output.ends_with('\n'));
}

#[test]
fn discover_json_includes_root_and_files() {
    let files = vec![PathBuf::from("/r/a-report.json")];
    let output = render_discover_output(Path::new("/r"), &files, OutputFormat::Json)
        .expect("render");
    let value: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(value["input_root"], "/r");
    assert_eq!(value["files"][0], "/r/a-report.json");
}
