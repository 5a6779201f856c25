//! site-preflight library
//!
//! Validation for Hugo static-site projects. Three independent validators
//! share one rule engine:
//! - Configuration: required fields and defensive defaults in `config.toml`
//! - Content: link, structure, and accessibility heuristics over markdown
//! - Environment: presence and versions of the development toolchain
//!
//! Every rule emits [`Finding`]s tagged with a [`Severity`] and a
//! [`Category`]. A run fails when any error-severity finding is unmet.
//!
//! # Example
//!
//! ```no_run
//! use site_preflight::{run_config_validation, Settings};
//! use std::path::Path;
//!
//! let run = run_config_validation(Path::new("config.toml"), &Settings::default());
//! println!("Errors: {}", run.summary().errors);
//! std::process::exit(run.status().exit_code());
//! ```

pub mod checks;
pub mod cli;
pub mod data;
pub mod engine;
pub mod platform;
pub mod settings;
pub mod version;

use checks::content::{collect_stats, ContentStats, MarkdownDocument};
use checks::config::ConfigDocument;
use checks::environment::ProbeContext;
use engine::result::{ReportLayout, RunStatus, ValidationRun};
use platform::process::CommandRunner;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Re-exports for public API
pub use engine::result::{FindingSummary, ValidationRun as Report};
pub use settings::Settings;

/// How much an unmet finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Blocks success
    Error,
    /// Advisory
    Warning,
    /// Confirmation or suggestion
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Category tag used to group related findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Required configuration fields
    Required,
    /// Security-relevant configuration
    Security,
    /// Defensive configuration defaults
    Defaults,
    /// Menu structure
    Menu,
    /// Screen reader and language concerns
    Accessibility,
    /// Markdown links
    Link,
    /// Frontmatter, headings, unreadable files
    Structure,
    /// Code fence formatting
    Formatting,
    /// Required development tools
    Tool,
    /// Git identity and module configuration
    Configuration,
    /// Tools that are nice to have
    OptionalTool,
}

impl Category {
    /// Section heading used by the category report layout
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Required => "REQUIRED FIELDS",
            Category::Security => "SECURITY",
            Category::Defaults => "DEFENSIVE DEFAULTS",
            Category::Menu => "MENU",
            Category::Accessibility => "ACCESSIBILITY",
            Category::Link => "LINKS",
            Category::Structure => "STRUCTURE",
            Category::Formatting => "FORMATTING",
            Category::Tool => "REQUIRED TOOLS",
            Category::Configuration => "CONFIGURATION",
            Category::OptionalTool => "OPTIONAL TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Category::Required => "required",
            Category::Security => "security",
            Category::Defaults => "defaults",
            Category::Menu => "menu",
            Category::Accessibility => "accessibility",
            Category::Link => "link",
            Category::Structure => "structure",
            Category::Formatting => "formatting",
            Category::Tool => "tool",
            Category::Configuration => "configuration",
            Category::OptionalTool => "optional",
        };
        write!(f, "{}", tag)
    }
}

/// Where a finding applies: an artifact path and, optionally, a 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub line: Option<usize>,
}

impl Location {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Location {
            path: path.into(),
            line: None,
        }
    }

    pub fn line(path: impl Into<PathBuf>, line: usize) -> Self {
        Location {
            path: path.into(),
            line: Some(line),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

/// One issue or confirmation produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Rule that produced this finding (e.g., "CNT-002")
    pub rule_id: &'static str,
    pub location: Option<Location>,
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    /// True for confirmations ("this check succeeded")
    pub passed: bool,
    /// True when a check could not run because a prerequisite was missing
    pub skipped: bool,
}

impl Finding {
    /// An unmet finding: something the user should look at.
    pub fn issue(
        rule_id: &'static str,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            rule_id,
            location: None,
            severity,
            category,
            message: message.into(),
            passed: false,
            skipped: false,
        }
    }

    /// A confirmation that a check succeeded.
    pub fn pass(
        rule_id: &'static str,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            passed: true,
            ..Finding::issue(rule_id, severity, category, message)
        }
    }

    /// A check that did not run. Never blocking.
    pub fn skip(rule_id: &'static str, category: Category, message: impl Into<String>) -> Self {
        Finding {
            skipped: true,
            ..Finding::issue(rule_id, Severity::Info, category, message)
        }
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Unmet error: the only kind of finding that fails a run.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error && !self.passed
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} - {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Error types for site-preflight operations.
#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    /// Artifact does not exist
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },
    /// Expected a directory
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    /// Artifact exists but could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Artifact is not UTF-8 text
    #[error("{} is not valid UTF-8 text", .path.display())]
    Decode { path: PathBuf },
    /// Settings file is not valid TOML or has unknown keys
    #[error("invalid settings in {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Validate a site configuration file.
///
/// A load failure is recorded as a single error finding and the rules are
/// skipped.
pub fn run_config_validation(config_path: &Path, settings: &Settings) -> ValidationRun {
    let mut run = ValidationRun::new(
        "CONFIGURATION VALIDATION REPORT",
        config_path.display().to_string(),
        ReportLayout::BySeverity,
    );

    match platform::fs::load_text(config_path) {
        Ok(content) => {
            let document = ConfigDocument::new(config_path, content);
            let rules = checks::config::config_rules();
            run.extend(rules.run(&document, settings));
        }
        Err(e) => {
            tracing::warn!(path = %config_path.display(), error = %e, "configuration load failed");
            let message = match e {
                PreflightError::NotFound { .. } => {
                    format!("Configuration file not found: {}", config_path.display())
                }
                other => format!("Failed to read config: {}", other),
            };
            run.push(
                Finding::issue(checks::config::LOAD_RULE_ID, Severity::Error, Category::Structure, message)
                    .at(Location::file(config_path)),
            );
        }
    }

    run
}

/// Validate every markdown file under a content directory.
///
/// Files are visited in path order. A file or directory that cannot be read,
/// or a file whose rules panic, yields one error finding and the scan moves on.
pub fn run_content_validation(content_dir: &Path, settings: &Settings) -> ValidationRun {
    let mut run = ValidationRun::new(
        "CONTENT VALIDATION REPORT",
        content_dir.display().to_string(),
        ReportLayout::BySeverity,
    );
    let mut stats = ContentStats::default();

    let scan = match platform::fs::find_files(content_dir, &settings.content_extension) {
        Ok(scan) => scan,
        Err(e) => {
            tracing::warn!(path = %content_dir.display(), error = %e, "content discovery failed");
            run.push(
                Finding::issue(
                    checks::content::LOAD_RULE_ID,
                    Severity::Error,
                    Category::Structure,
                    format!("Content directory not found or unreadable: {}", e),
                )
                .at(Location::file(content_dir)),
            );
            stats.apply_to(&mut run);
            return run;
        }
    };

    for (path, error) in &scan.unreadable {
        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        run.push(
            Finding::issue(
                checks::content::LOAD_RULE_ID,
                Severity::Error,
                Category::Structure,
                format!("Failed to read directory entry: {}", error),
            )
            .at(Location::file(relative)),
        );
    }

    let files = scan.files;
    if files.is_empty() && scan.unreadable.is_empty() {
        run.note(format!("No {} files found in {}", settings.content_extension, content_dir.display()));
    }

    let rules = checks::content::content_rules();
    for path in &files {
        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        tracing::debug!(file = %relative.display(), "scanning content file");

        match platform::fs::load_text(path) {
            Ok(content) => {
                let document = MarkdownDocument::new(relative, content);
                stats.files_checked += 1;
                stats.merge(&collect_stats(&document));
                run.extend(rules.run(&document, settings));
            }
            Err(e) => {
                tracing::warn!(file = %relative.display(), error = %e, "content file unreadable");
                run.push(
                    Finding::issue(
                        checks::content::LOAD_RULE_ID,
                        Severity::Error,
                        Category::Structure,
                        format!("Failed to read file: {}", e),
                    )
                    .at(Location::file(relative)),
                );
            }
        }
    }

    stats.apply_to(&mut run);
    run
}

/// Probe the local development environment.
///
/// Tool discovery goes through `runner` so tests can substitute a fake
/// toolchain. Probes never fail the call; they become findings.
pub fn run_environment_validation(
    repo_root: &Path,
    settings: &Settings,
    runner: &dyn CommandRunner,
) -> ValidationRun {
    let mut run = ValidationRun::new(
        "ENVIRONMENT VALIDATION REPORT",
        repo_root.display().to_string(),
        ReportLayout::ByCategory,
    );

    let context = ProbeContext {
        runner,
        repo_root,
        probe_timeout: Duration::from_secs(settings.probe_timeout_secs),
        verify_timeout: Duration::from_secs(settings.module_verify_timeout_secs),
    };
    let rules = checks::environment::environment_rules();
    run.extend(rules.run(&context, settings));

    let hints = if run.status() == RunStatus::Failed {
        data::requirements::INSTALL_HINTS
    } else {
        data::requirements::DEVELOPMENT_HINTS
    };
    for hint in hints {
        run.note(*hint);
    }

    run
}
