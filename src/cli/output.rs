//! Output formatting for site-preflight.
//!
//! Renders a [`ValidationRun`] as a plain-text terminal report.
//!
//! # Graceful Degradation
//!
//! - Color disabled via `--no-color` or `NO_COLOR`: plain text, same layout
//! - Empty runs: header, summary, and status are still printed
//! - Long lists: capped per tier with an "... and N more" line
//!
//! No function in this module will panic.

use crate::checks::RuleInfo;
use crate::engine::result::{ReportLayout, RunStatus, ValidationRun};
use crate::settings::Settings;
use crate::{Category, Finding, Severity};
use colored::Colorize;

const RULE: &str = "--------------------------------------------------------------------------------";

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a validation run into a string
    fn format(&self, run: &ValidationRun) -> String;
}

/// Terminal (human-readable) formatter
pub struct TerminalFormatter {
    color: bool,
    verbose: bool,
    quiet: bool,
    max_displayed: usize,
    max_passed: usize,
}

impl TerminalFormatter {
    pub fn new(color: bool, verbose: bool, quiet: bool) -> Self {
        let defaults = Settings::default();
        TerminalFormatter {
            color,
            verbose,
            quiet,
            max_displayed: defaults.max_displayed_issues,
            max_passed: defaults.max_passed_displayed,
        }
    }

    /// Take list caps from settings
    pub fn with_limits(mut self, settings: &Settings) -> Self {
        self.max_displayed = settings.max_displayed_issues;
        self.max_passed = settings.max_passed_displayed;
        self
    }

    fn paint(&self, text: &str, style: fn(&str) -> colored::ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow())
    }

    fn red(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan())
    }

    fn gray(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_black())
    }

    fn bold(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn finding_line(&self, finding: &Finding) -> String {
        if self.verbose {
            format!("  [{}] {}\n", finding.rule_id, finding)
        } else {
            format!("  {}\n", finding)
        }
    }

    fn capped_list(&self, output: &mut String, findings: &[&Finding], cap: usize) {
        for finding in findings.iter().take(cap) {
            output.push_str(&self.finding_line(finding));
        }
        if findings.len() > cap {
            output.push_str(&format!("  ... and {} more\n", findings.len() - cap));
        }
    }

    fn format_by_severity(&self, run: &ValidationRun, output: &mut String) {
        let errors = run.unmet(Severity::Error);
        let warnings = run.unmet(Severity::Warning);
        let info = run.unmet(Severity::Info);
        let passed = run.passed();

        if !errors.is_empty() {
            output.push_str(&self.red(&format!("ERRORS ({})", errors.len())));
            output.push('\n');
            self.capped_list(output, &errors, self.max_displayed);
            output.push('\n');
        }

        if !warnings.is_empty() {
            output.push_str(&self.yellow(&format!("WARNINGS ({})", warnings.len())));
            output.push('\n');
            self.capped_list(output, &warnings, self.max_displayed);
            output.push('\n');
        }

        if self.quiet {
            return;
        }

        if !info.is_empty() {
            output.push_str(&self.cyan(&format!("INFO ({})", info.len())));
            output.push('\n');
            if self.verbose {
                self.capped_list(output, &info, info.len());
            } else {
                output.push_str(&format!("  {} informational suggestions found\n", info.len()));
            }
            output.push('\n');
        }

        let clean = errors.is_empty() && warnings.is_empty();
        if !passed.is_empty() && (clean || self.verbose) {
            output.push_str(&self.green(&format!("PASSED ({})", passed.len())));
            output.push('\n');
            let cap = if self.verbose { passed.len() } else { self.max_passed };
            self.capped_list(output, &passed, cap);
            output.push('\n');
        }
    }

    fn marker(&self, finding: &Finding) -> String {
        if finding.passed {
            self.green("[PASS]")
        } else if finding.skipped {
            self.gray("[SKIP]")
        } else {
            match finding.severity {
                Severity::Error => self.red("[FAIL]"),
                Severity::Warning => self.yellow("[WARN]"),
                Severity::Info => self.cyan("[INFO]"),
            }
        }
    }

    fn format_by_category(&self, run: &ValidationRun, output: &mut String) {
        let mut categories: Vec<Category> = Vec::new();
        for finding in &run.findings {
            if !categories.contains(&finding.category) {
                categories.push(finding.category);
            }
        }

        for category in categories {
            let shown: Vec<&Finding> = run
                .findings
                .iter()
                .filter(|f| f.category == category)
                .filter(|f| !self.quiet || !(f.passed || f.skipped))
                .collect();

            if shown.is_empty() {
                continue;
            }

            output.push_str(&format!("{}\n", category.heading()));
            for finding in shown {
                if self.verbose {
                    output.push_str(&format!("  {} {} {}\n", self.marker(finding), finding.rule_id, finding));
                } else {
                    output.push_str(&format!("  {} {}\n", self.marker(finding), finding));
                }
            }
            output.push('\n');
        }
    }

    fn status_line(&self, status: RunStatus) -> String {
        let label = status.label();
        let painted = match status {
            RunStatus::Failed => self.red(label),
            RunStatus::PassedWithWarnings => self.yellow(label),
            RunStatus::Passed => self.green(label),
        };
        let hint = match status {
            RunStatus::Failed => " - Fix errors before proceeding",
            RunStatus::PassedWithWarnings => " - Review recommendations",
            RunStatus::Passed => "",
        };
        format!("Status: {}{}\n", painted, hint)
    }
}

impl OutputFormatter for TerminalFormatter {
    fn format(&self, run: &ValidationRun) -> String {
        let mut output = String::new();

        // Header
        output.push_str(RULE);
        output.push('\n');
        output.push_str(&self.bold(&run.title));
        output.push('\n');
        output.push_str(&format!("Target: {}\n", run.target));
        output.push_str(RULE);
        output.push_str("\n\n");

        if !self.quiet && !run.stats.is_empty() {
            output.push_str("STATISTICS\n");
            for stat in &run.stats {
                output.push_str(&format!("  {}: {}\n", stat.label, stat.value));
            }
            output.push('\n');
        }

        match run.layout {
            ReportLayout::BySeverity => self.format_by_severity(run, &mut output),
            ReportLayout::ByCategory => self.format_by_category(run, &mut output),
        }

        // Summary
        let summary = run.summary();
        output.push_str(RULE);
        output.push('\n');
        let mut line = format!(
            "SUMMARY: {} passed, {} errors, {} warnings, {} info",
            summary.passed, summary.errors, summary.warnings, summary.info
        );
        if summary.skipped > 0 {
            line.push_str(&format!(", {} skipped", summary.skipped));
        }
        output.push_str(&line);
        output.push('\n');
        output.push_str(&self.status_line(run.status()));
        output.push_str(RULE);
        output.push('\n');

        if !self.quiet && !run.notes.is_empty() {
            output.push('\n');
            for note in &run.notes {
                output.push_str(note);
                output.push('\n');
            }
        }

        output
    }
}

/// Rule catalog as printed by `site-preflight list`
pub fn format_catalog(rules: &[RuleInfo]) -> String {
    let mut output = String::new();
    let mut current = "";

    for rule in rules {
        if rule.validator != current {
            if !current.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", rule.validator.to_uppercase()));
            current = rule.validator;
        }
        output.push_str(&format!(
            "  {:<8} {:<24} [{}] {}\n",
            rule.id, rule.name, rule.category, rule.description
        ));
    }

    output
}
