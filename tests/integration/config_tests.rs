//! Configuration validation tests against files on disk.

use site_preflight::engine::result::RunStatus;
use site_preflight::{run_config_validation, Severity, Settings};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HUGO_CONFIG: &str = r#"baseURL = "https://example.com/"
languageCode = "en-us"
title = "Example Site"
enableRobotsTXT = true
enableGitInfo = true

[markup.goldmark.renderer]
  unsafe = true

[[menu.main]]
  name = "Home"
  url = "/"
  weight = 1

[[menu.main]]
  name = "Posts"
  url = "/posts/"
  weight = 2

[outputFormats.SearchIndex]
  mediaType = "application/json"
  type = "search"
"#;

fn write_config(text: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, text).unwrap();
    (dir, path)
}

#[test]
fn test_complete_config_passes() {
    let (_dir, path) = write_config(HUGO_CONFIG);

    let run = run_config_validation(&path, &Settings::default());

    assert_eq!(run.status(), RunStatus::Passed);
    assert!(run.findings.iter().all(|f| f.passed));
    assert!(run
        .findings
        .iter()
        .any(|f| f.message == "Menu weights are unique (2 items)"));
    assert!(run
        .findings
        .iter()
        .any(|f| f.message.starts_with("Unsafe HTML rendering enabled")));
}

#[test]
fn test_missing_base_url_fails() {
    let text = HUGO_CONFIG.replace("baseURL = \"https://example.com/\"\n", "");
    let (_dir, path) = write_config(&text);

    let run = run_config_validation(&path, &Settings::default());

    assert_eq!(run.status().exit_code(), 1);
    let errors = run.unmet(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("baseURL"));
}

#[test]
fn test_duplicate_menu_weight_is_warning() {
    let text = HUGO_CONFIG.replace("weight = 2", "weight = 1");
    let (_dir, path) = write_config(&text);

    let run = run_config_validation(&path, &Settings::default());

    let warnings = run.unmet(Severity::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "Duplicate menu weights found - may cause ordering issues");
    assert_eq!(run.status(), RunStatus::PassedWithWarnings);
    assert_eq!(run.status().exit_code(), 0);
}

#[test]
fn test_minimal_config_warns_about_defaults() {
    let (_dir, path) = write_config("baseURL = \"/\"\ntitle = \"x\"\nlanguageCode = \"en\"\n");

    let run = run_config_validation(&path, &Settings::default());

    let warnings: Vec<_> = run.unmet(Severity::Warning).iter().map(|f| f.message.clone()).collect();
    assert_eq!(
        warnings,
        vec![
            "Recommended: Enable enableRobotsTXT - Robots.txt should be enabled for SEO control",
            "Recommended: Enable enableGitInfo - Git info provides useful metadata for debugging",
        ]
    );
}

#[test]
fn test_missing_file_is_single_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let run = run_config_validation(&path, &Settings::default());

    assert_eq!(run.findings.len(), 1);
    assert!(run.findings[0].is_blocking());
    assert!(run.findings[0].message.starts_with("Configuration file not found"));
    assert_eq!(run.status().exit_code(), 1);
}

#[test]
fn test_non_utf8_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, [0x62, 0x61, 0xff, 0xfe]).unwrap();

    let run = run_config_validation(&path, &Settings::default());

    assert_eq!(run.findings.len(), 1);
    assert!(run.findings[0].message.starts_with("Failed to read config"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let (_dir, path) = write_config(&HUGO_CONFIG.replace("weight = 2", "weight = 1"));

    let first = run_config_validation(&path, &Settings::default());
    let second = run_config_validation(&path, &Settings::default());

    assert_eq!(first.findings, second.findings);
}
