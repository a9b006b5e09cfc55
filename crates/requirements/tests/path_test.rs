//! Filesystem predicates against a scratch directory.

use std::fs;

use nebula_requirements::prelude::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn scratch() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.toml"), "port = 8080\n").unwrap();
    fs::create_dir(dir.path().join("plugins")).unwrap();
    dir
}

#[rstest]
fn regular_file_passes(scratch: TempDir) {
    let file = scratch.path().join("app.toml");
    let validator = validate_that(&file, "config").exists().is_regular_file().is_absolute();

    assert!(!validator.has_failures());
}

#[rstest]
fn directory_is_not_a_file(scratch: TempDir) {
    let dir = scratch.path().join("plugins");
    let validator = validate_that(dir.as_path(), "plugins").is_directory().is_regular_file();

    assert_eq!(validator.failures().len(), 1);
    assert_eq!(validator.failures()[0].message(), "plugins must reference a file.");
    assert_eq!(
        validator.failures()[0].context_value("Actual"),
        Some(dir.display().to_string().as_str())
    );
}

#[rstest]
fn missing_entry(scratch: TempDir) {
    let missing = scratch.path().join("cache");
    let error = require_that(missing, "cache").does_not_exist().and_then(|p| p.is_directory()).unwrap_err();

    assert_eq!(error.failures()[0].message(), "cache referenced a non-existent directory.");
}

#[rstest]
fn existing_entry_may_not_exist(scratch: TempDir) {
    let file = scratch.path().join("app.toml");
    let validator = validate_that(file, "lock").does_not_exist();

    assert_eq!(validator.failures()[0].message(), "lock may not exist.");
}

#[test]
fn relative_path_is_not_absolute() {
    let error = require_that(std::path::PathBuf::from("logs"), "logs").is_absolute().unwrap_err();

    assert_eq!(error.to_string(), "logs must reference an absolute path.\nActual: logs");
}
