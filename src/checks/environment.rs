//! Development environment checks (ENV-001 through ENV-007).
//!
//! Each check produces a [`CheckOutcome`], which is turned into a finding
//! whose severity follows how much the check matters:
//! - Required tools and configuration: error
//! - Go modules: warning
//! - Optional tools: info
//!
//! # Graceful Degradation
//!
//! - Tool not on PATH: the probe reports `found = false`
//! - Version command times out or cannot be launched: `found = false` with
//!   the probe error as the message
//! - Version command exits non-zero: version `Unknown` with a message
//! - Go missing: the Go modules check is skipped
//!
//! Probes never return errors to the caller.

use crate::data::requirements::{GO_MODULE_FILES, MIN_PYTHON};
use crate::engine::orchestrator::{Artifact, RegisteredRule, RuleSet};
use crate::platform::process::CommandRunner;
use crate::settings::Settings;
use crate::{Category, Finding, Location, Severity};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static PYTHON_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Python (\d+)\.(\d+)").expect("valid python version regex"));

const UNKNOWN_VERSION: &str = "Unknown";

const NOT_ON_PATH: &str = "Not found in PATH";

/// Everything an environment check may touch.
pub struct ProbeContext<'a> {
    pub runner: &'a dyn CommandRunner,
    /// Working directory for git and go module checks
    pub repo_root: &'a Path,
    /// Timeout for version probes
    pub probe_timeout: Duration,
    /// Timeout for `go mod verify`
    pub verify_timeout: Duration,
}

impl Artifact for ProbeContext<'_> {
    fn location(&self) -> Option<Location> {
        None
    }
}

/// Presence and version of one external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolProbe {
    pub tool: String,
    pub required: bool,
    pub found: bool,
    pub version: Option<String>,
    pub message: Option<String>,
}

impl ToolProbe {
    /// Requirement level of the check built on this probe
    pub fn requirement(&self) -> Requirement {
        if self.required {
            Requirement::Required
        } else {
            Requirement::Optional
        }
    }

    /// Found on PATH but the version command never produced a result
    pub fn probe_failed(&self) -> bool {
        !self.found && self.message.as_deref() != Some(NOT_ON_PATH)
    }
}

/// Look a tool up on PATH and ask it for its version.
pub fn probe_tool(ctx: &ProbeContext<'_>, tool: &str, version_arg: &str, required: bool) -> ToolProbe {
    let mut probe = ToolProbe {
        tool: tool.to_string(),
        required,
        found: ctx.runner.which(tool).is_some(),
        version: None,
        message: None,
    };

    if !probe.found {
        probe.message = Some(NOT_ON_PATH.to_string());
        return probe;
    }

    tracing::debug!(tool, version_arg, "probing tool version");
    match ctx.runner.run(tool, &[version_arg], None, ctx.probe_timeout) {
        Ok(output) if output.success => {
            probe.version = Some(output.first_line().unwrap_or_else(|| UNKNOWN_VERSION.to_string()));
        }
        Ok(output) => {
            probe.version = Some(UNKNOWN_VERSION.to_string());
            probe.message = Some(match output.code {
                Some(code) => format!("Found but version check exited with status {}", code),
                None => "Found but version check was terminated".to_string(),
            });
        }
        Err(e) => {
            tracing::warn!(tool, error = %e, "version probe failed");
            probe.found = false;
            probe.message = Some(format!("Version check failed: {}", e));
        }
    }

    probe
}

/// Result of a single environment check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckOutcome {
    pub fn pass(detail: impl Into<String>) -> Self {
        CheckOutcome {
            status: CheckStatus::Pass,
            detail: detail.into(),
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        CheckOutcome {
            status: CheckStatus::Fail,
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        CheckOutcome {
            status: CheckStatus::Skipped,
            detail: reason.into(),
        }
    }
}

/// How much a failed check matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Advisory,
    Optional,
}

impl Requirement {
    pub fn severity(&self) -> Severity {
        match self {
            Requirement::Required => Severity::Error,
            Requirement::Advisory => Severity::Warning,
            Requirement::Optional => Severity::Info,
        }
    }
}

/// Turn a check outcome into a finding named after the check.
pub fn outcome_finding(
    rule_id: &'static str,
    check_name: &str,
    category: Category,
    requirement: Requirement,
    outcome: CheckOutcome,
) -> Finding {
    let severity = requirement.severity();
    match outcome.status {
        CheckStatus::Pass => Finding::pass(rule_id, severity, category, format!("{}: {}", check_name, outcome.detail)),
        CheckStatus::Fail => Finding::issue(rule_id, severity, category, format!("{}: {}", check_name, outcome.detail)),
        CheckStatus::Skipped => Finding::skip(
            rule_id,
            category,
            format!("{}: Skipped ({})", check_name, outcome.detail),
        ),
    }
}

/// Get all environment checks in execution order
pub fn environment_rules<'a>() -> RuleSet<ProbeContext<'a>> {
    let mut rules = RuleSet::new();
    rules.register(RegisteredRule {
        id: "ENV-001",
        name: "Hugo Extended",
        category: Category::Tool,
        description: "Hugo is installed and is the extended edition",
        rule_fn: check_hugo,
    });
    rules.register(RegisteredRule {
        id: "ENV-002",
        name: "Go",
        category: Category::Tool,
        description: "Go toolchain for Hugo modules",
        rule_fn: check_go,
    });
    rules.register(RegisteredRule {
        id: "ENV-003",
        name: "Python",
        category: Category::Tool,
        description: "python3 at version 3.7 or newer",
        rule_fn: check_python,
    });
    rules.register(RegisteredRule {
        id: "ENV-004",
        name: "Git",
        category: Category::Tool,
        description: "Git is installed",
        rule_fn: check_git,
    });
    rules.register(RegisteredRule {
        id: "ENV-005",
        name: "Git Configuration",
        category: Category::Configuration,
        description: "Repository exists and user.name and user.email are set",
        rule_fn: check_git_config,
    });
    rules.register(RegisteredRule {
        id: "ENV-006",
        name: "Go Modules",
        category: Category::Configuration,
        description: "go.mod and go.sum exist and verify",
        rule_fn: check_go_modules,
    });
    rules.register(RegisteredRule {
        id: "ENV-007",
        name: "Make",
        category: Category::OptionalTool,
        description: "make is available",
        rule_fn: check_make,
    });
    rules
}

fn tool_outcome(probe: &ToolProbe) -> CheckOutcome {
    if probe.found {
        CheckOutcome::pass(probe.version.as_deref().unwrap_or(UNKNOWN_VERSION))
    } else {
        CheckOutcome::fail(probe.message.as_deref().unwrap_or(NOT_ON_PATH))
    }
}

/// Hugo version must mention the extended edition.
pub fn hugo_outcome(probe: &ToolProbe) -> CheckOutcome {
    if probe.probe_failed() {
        return CheckOutcome::fail(format!("Hugo check failed: {}", probe.message.as_deref().unwrap_or_default()));
    }
    if !probe.found {
        return CheckOutcome::fail("Hugo not installed");
    }
    let version = probe.version.as_deref().unwrap_or(UNKNOWN_VERSION);
    if version.to_lowercase().contains("extended") {
        CheckOutcome::pass(format!("Hugo extended found: {}", version))
    } else {
        CheckOutcome::fail(format!("Hugo extended required but found: {}", version))
    }
}

/// Run ENV-001: Hugo Extended
pub fn check_hugo(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    let probe = probe_tool(ctx, "hugo", "version", true);
    vec![outcome_finding(
        "ENV-001",
        "Hugo Extended",
        Category::Tool,
        probe.requirement(),
        hugo_outcome(&probe),
    )]
}

/// Run ENV-002: Go
pub fn check_go(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    let probe = probe_tool(ctx, "go", "version", true);
    vec![outcome_finding("ENV-002", "Go", Category::Tool, probe.requirement(), tool_outcome(&probe))]
}

/// Parse `Python M.m` out of a version banner.
pub fn parse_python_version(banner: &str) -> Option<(u32, u32)> {
    let caps = PYTHON_VERSION_RE.captures(banner)?;
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    Some((major, minor))
}

pub fn python_outcome(probe: &ToolProbe) -> CheckOutcome {
    if let Some(message) = &probe.message {
        return CheckOutcome::fail(format!("Python check failed: {}", message));
    }
    if !probe.found {
        return CheckOutcome::fail(format!("Python check failed: {}", NOT_ON_PATH));
    }

    let banner = probe.version.as_deref().unwrap_or(UNKNOWN_VERSION);
    let (want_major, want_minor) = MIN_PYTHON;
    match parse_python_version(banner) {
        Some((major, minor)) if (major, minor) >= MIN_PYTHON => CheckOutcome::pass(format!(
            "Python {}.{} (meets requirement: {}.{}+)",
            major, minor, want_major, want_minor
        )),
        Some((major, minor)) => CheckOutcome::fail(format!(
            "Python {}.{} found but {}.{}+ required",
            major, minor, want_major, want_minor
        )),
        None => CheckOutcome::pass(banner),
    }
}

/// Run ENV-003: Python
pub fn check_python(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    let probe = probe_tool(ctx, "python3", "--version", true);
    vec![outcome_finding(
        "ENV-003",
        "Python",
        Category::Tool,
        probe.requirement(),
        python_outcome(&probe),
    )]
}

/// Run ENV-004: Git
pub fn check_git(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    let probe = probe_tool(ctx, "git", "version", true);
    vec![outcome_finding("ENV-004", "Git", Category::Tool, probe.requirement(), tool_outcome(&probe))]
}

fn git_config_value(ctx: &ProbeContext<'_>, key: &str) -> Option<String> {
    let output = ctx
        .runner
        .run("git", &["config", key], Some(ctx.repo_root), ctx.probe_timeout)
        .ok()?;
    let value = output.stdout.trim();
    (output.success && !value.is_empty()).then(|| value.to_string())
}

pub fn git_config_outcome(ctx: &ProbeContext<'_>) -> CheckOutcome {
    if ctx.runner.which("git").is_none() {
        return CheckOutcome::fail("Git not found");
    }

    let in_repo = ctx
        .runner
        .run("git", &["rev-parse", "--git-dir"], Some(ctx.repo_root), ctx.probe_timeout)
        .map(|output| output.success);
    match in_repo {
        Ok(true) => {}
        Ok(false) => return CheckOutcome::fail("Not a git repository"),
        Err(e) => return CheckOutcome::fail(format!("Git check failed: {}", e)),
    }

    let missing: Vec<&str> = ["user.name", "user.email"]
        .into_iter()
        .filter(|key| git_config_value(ctx, key).is_none())
        .collect();

    if missing.is_empty() {
        CheckOutcome::pass("Git user configured")
    } else {
        CheckOutcome::fail(format!("Git {} not configured", missing.join(" and ")))
    }
}

/// Run ENV-005: Git Configuration
pub fn check_git_config(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    vec![outcome_finding(
        "ENV-005",
        "Git Configuration",
        Category::Configuration,
        Requirement::Required,
        git_config_outcome(ctx),
    )]
}

pub fn go_modules_outcome(ctx: &ProbeContext<'_>) -> CheckOutcome {
    if ctx.runner.which("go").is_none() {
        return CheckOutcome::skipped("Go not found");
    }

    for (file, missing) in GO_MODULE_FILES {
        if !ctx.repo_root.join(file).is_file() {
            return CheckOutcome::fail(*missing);
        }
    }

    match ctx
        .runner
        .run("go", &["mod", "verify"], Some(ctx.repo_root), ctx.verify_timeout)
    {
        Ok(output) if output.success => CheckOutcome::pass("Go modules verified"),
        Ok(output) => CheckOutcome::fail(format!(
            "Go module verification failed: {}",
            output.stderr.trim()
        )),
        Err(e) => CheckOutcome::fail(format!("Could not verify Go modules: {}", e)),
    }
}

/// Run ENV-006: Go Modules
pub fn check_go_modules(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    vec![outcome_finding(
        "ENV-006",
        "Go Modules",
        Category::Configuration,
        Requirement::Advisory,
        go_modules_outcome(ctx),
    )]
}

/// Run ENV-007: Make
pub fn check_make(ctx: &ProbeContext<'_>, _: &Settings) -> Vec<Finding> {
    let probe = probe_tool(ctx, "make", "--version", false);
    let outcome = if probe.found || probe.probe_failed() {
        tool_outcome(&probe)
    } else {
        CheckOutcome::fail("Not found (optional)")
    };
    vec![outcome_finding("ENV-007", "Make", Category::OptionalTool, probe.requirement(), outcome)]
}
