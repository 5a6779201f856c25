//! CLI integration tests.
//!
//! Runs the built binary and checks exit codes and output streams.

use site_preflight::cli::args::{Args, Command};
use clap::Parser;
use std::fs;
use std::process::{Command as Process, Output};

fn site_preflight(args: &[&str]) -> Output {
    Process::new(env!("CARGO_BIN_EXE_site-preflight"))
        .args(args)
        .env_remove("SITE_PREFLIGHT_SETTINGS")
        .env_remove("SITE_PREFLIGHT_REPO_ROOT")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_parse_from_library() {
    let args = Args::try_parse_from(["site-preflight", "--quiet", "env"]).unwrap();
    assert_eq!(args.command, Command::Env);
    assert!(args.quiet);
}

#[test]
fn test_version_command() {
    let output = site_preflight(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("site-preflight "));
}

#[test]
fn test_list_command() {
    let output = site_preflight(&["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for id in ["CFG-001", "CFG-005", "CNT-001", "CNT-005", "ENV-001", "ENV-007"] {
        assert!(text.contains(id), "missing {} in:\n{}", id, text);
    }
}

#[test]
fn test_unknown_command_is_usage_error() {
    let output = site_preflight(&["deploy"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_default_path_under_repo_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "baseURL = \"https://example.com\"\ntitle = \"x\"\nlanguageCode = \"en\"\nenableRobotsTXT = true\nenableGitInfo = true\n",
    )
    .unwrap();

    let root = dir.path().to_str().unwrap();
    let output = site_preflight(&["--no-color", "--repo-root", root, "config"]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("CONFIGURATION VALIDATION REPORT"));
    assert!(text.contains("Status: PASSED"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_config_missing_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let output = site_preflight(&["--no-color", "config", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Configuration file not found"));
    assert!(text.contains("Status: FAILED"));
}

#[test]
fn test_content_warnings_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("post.md"), "# Post\n[old](http://example.com)\n").unwrap();

    let output = site_preflight(&["--no-color", "content", dir.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("WARNINGS (2)"));
    assert!(text.contains("Status: PASSED WITH WARNINGS"));
}

#[test]
fn test_settings_file_applies() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("post.md"), "# Post\n[old](http://example.com)\n").unwrap();
    let settings = dir.path().join("preflight.toml");
    fs::write(&settings, "max_displayed_issues = 1\n").unwrap();

    let output = site_preflight(&[
        "--no-color",
        "--settings",
        settings.to_str().unwrap(),
        "content",
        dir.path().to_str().unwrap(),
    ]);

    assert!(stdout(&output).contains("... and 1 more"));
}

#[test]
fn test_invalid_settings_exit_two() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("preflight.toml");
    fs::write(&settings, "no_such_key = 1\n").unwrap();

    let output = site_preflight(&["--settings", settings.to_str().unwrap(), "config"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading settings"));
}
