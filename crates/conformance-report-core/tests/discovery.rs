// crates/conformance-report-core/tests/discovery.rs
// ============================================================================
// Module: Discovery Tests
// Description: Integration tests for result file discovery.
// Purpose: Ensure discovery returns exactly the suffix-matching regular files.
// Dependencies: conformance-report-core, proptest, tempfile
// ============================================================================

//! ## Overview
//! Exercises [`discover_report_files`] against real directory trees: nested
//! directories, single-file roots, empty trees, and missing roots.

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

use std::fs;
use std::path::Path;

use conformance_report_core::DiscoveryError;
use conformance_report_core::REPORT_SUFFIX;
use conformance_report_core::discover_report_files;
use proptest::prelude::*;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, "[]").expect("write file");
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies nested matches are found and non-matching files ignored.
#[test]
fn discovers_nested_matches_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    touch(&dir.path().join("a-report.json"));
    touch(&dir.path().join("nested/deeper/b-report.json"));
    touch(&dir.path().join("notes.txt"));
    touch(&dir.path().join("report.json"));
    fs::create_dir_all(dir.path().join("dir-report.json")).expect("create dir");

    let found = discover_report_files(dir.path()).expect("discover");
    let root = std::path::absolute(dir.path()).expect("absolute");
    assert_eq!(
        found,
        vec![root.join("a-report.json"), root.join("nested/deeper/b-report.json")]
    );
}

/// Verifies a single matching file root yields exactly that file.
#[test]
fn single_file_root_yields_itself() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("only-report.json");
    touch(&file);

    let found = discover_report_files(&file).expect("discover");
    assert_eq!(found, vec![std::path::absolute(&file).expect("absolute")]);
}

/// Verifies a single non-matching file root yields nothing.
#[test]
fn single_non_matching_file_root_yields_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("notes.txt");
    touch(&file);

    assert!(discover_report_files(&file).expect("discover").is_empty());
}

/// Verifies an empty tree yields an empty list rather than an error.
#[test]
fn empty_tree_yields_empty_list() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(discover_report_files(dir.path()).expect("discover").is_empty());
}

/// Verifies a missing root fails with a traversal error naming the path.
#[test]
fn missing_root_is_a_discovery_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");
    let err = discover_report_files(&missing).expect_err("missing root must fail");
    assert!(matches!(err, DiscoveryError::Traverse { .. }), "unexpected error: {err}");
    assert!(err.to_string().contains("does-not-exist"));
}

/// Verifies relative roots come back as absolute paths.
#[test]
fn relative_root_is_made_absolute() {
    let dir = tempfile::tempdir_in(".").expect("tempdir");
    touch(&dir.path().join("x-report.json"));
    let relative = Path::new(".").join(dir.path().file_name().expect("temp dir name"));
    assert!(relative.is_relative());

    let found = discover_report_files(&relative).expect("discover");
    assert_eq!(found.len(), 1);
    assert!(found[0].is_absolute());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// For N matching and M other files, discovery returns exactly N paths.
    #[test]
    fn returns_exactly_the_matching_files(matching in 0usize .. 8, other in 0usize .. 8) {
        let dir = tempfile::tempdir().expect("tempdir");
        for index in 0 .. matching {
            touch(&dir.path().join(format!("group-{}/r{index}{REPORT_SUFFIX}", index % 3)));
        }
        for index in 0 .. other {
            touch(&dir.path().join(format!("group-{}/other-{index}.json", index % 2)));
        }

        let found = discover_report_files(dir.path()).expect("discover");
        prop_assert_eq!(found.len(), matching);
        for path in &found {
            prop_assert!(path.to_string_lossy().ends_with(REPORT_SUFFIX));
        }
        let mut sorted = found.clone();
        sorted.sort();
        prop_assert_eq!(sorted, found);
    }
}
