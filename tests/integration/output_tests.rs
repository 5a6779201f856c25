//! Output formatting tests over complete validation runs.

use crate::mocks::MockRunner;
use site_preflight::cli::output::{OutputFormatter, TerminalFormatter};
use site_preflight::{run_config_validation, run_content_validation, run_environment_validation, Settings};
use std::fs;

fn plain() -> TerminalFormatter {
    TerminalFormatter::new(false, false, false)
}

#[test]
fn test_config_report_lists_errors_and_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "title = \"x\"\n").unwrap();

    let output = plain().format(&run_config_validation(&path, &Settings::default()));

    assert!(output.contains("ERRORS (2)"));
    assert!(output.contains("  Missing required field 'baseURL': Base URL must be defined for proper site generation\n"));
    assert!(output.contains("WARNINGS (2)"));
    assert!(!output.contains("PASSED ("));
    assert!(output.contains("SUMMARY: 1 passed, 2 errors, 2 warnings, 0 info"));
    assert!(output.contains("Status: FAILED - Fix errors before proceeding"));
}

#[test]
fn test_content_report_statistics_and_locations() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("post.md"), "---\n---\n![](cat.png)\n```\nx\n```\n").unwrap();

    let output = plain().format(&run_content_validation(dir.path(), &Settings::default()));

    assert!(output.contains("STATISTICS\n  Files checked: 1\n  Internal links: 0\n  External links: 0\n  Images: 1\n"));
    assert!(output.contains("  post.md:3 - Image without alt text: cat.png (bad for screen readers)\n"));
    assert!(output.contains("INFO (1)\n  1 informational suggestions found\n"));
}

#[test]
fn test_environment_report_sections() {
    let dir = tempfile::tempdir().unwrap();
    let runner = MockRunner::healthy_toolchain().without_tool("go").without_tool("make");

    let output = plain().format(&run_environment_validation(dir.path(), &Settings::default(), &runner));

    assert!(output.contains("ENVIRONMENT VALIDATION REPORT"));
    assert!(output.contains("REQUIRED TOOLS\n  [PASS] Hugo Extended: Hugo extended found: hugo v0.125.4"));
    assert!(output.contains("  [FAIL] Go: Not found in PATH\n"));
    assert!(output.contains("CONFIGURATION\n  [PASS] Git Configuration: Git user configured\n  [SKIP] Go Modules: Skipped (Go not found)\n"));
    assert!(output.contains("OPTIONAL TOOLS\n  [INFO] Make: Not found (optional)\n"));
    assert!(output.contains("Status: FAILED"));
    assert!(output.contains("Please install missing requirements:"));
}

#[test]
fn test_quiet_environment_report_only_shows_problems() {
    let dir = tempfile::tempdir().unwrap();
    let runner = MockRunner::healthy_toolchain().without_tool("git");

    let run = run_environment_validation(dir.path(), &Settings::default(), &runner);
    let output = TerminalFormatter::new(false, false, true).format(&run);

    assert!(!output.contains("[PASS]"));
    assert!(output.contains("[FAIL] Git: Not found in PATH"));
    assert!(output.contains("[FAIL] Git Configuration: Git not found"));
    assert!(!output.contains("Please install"));
}

#[test]
fn test_verbose_shows_rule_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "baseURL = \"/\"\ntitle = \"x\"\nlanguageCode = \"en\"\n").unwrap();

    let run = run_config_validation(&path, &Settings::default());
    let output = TerminalFormatter::new(false, true, false).format(&run);

    assert!(output.contains("[CFG-003] Recommended: Enable enableRobotsTXT"));
    assert!(output.contains("PASSED (4)"));
    assert!(output.contains("[CFG-001] Required field 'baseURL' is present"));
}
