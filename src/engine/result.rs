//! Result aggregation.
//!
//! Collects findings in execution order, partitions them by severity, and
//! derives the overall status of a run.

use crate::{Finding, Severity};

/// How the terminal formatter lays a report out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Unmet findings grouped into error / warning / info tiers
    BySeverity,
    /// Every finding under its category heading with a status marker
    ByCategory,
}

/// Named counter shown in the statistics block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistic {
    pub label: &'static str,
    pub value: usize,
}

/// Result summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindingSummary {
    /// Confirmations
    pub passed: usize,
    /// Unmet errors
    pub errors: usize,
    /// Unmet warnings
    pub warnings: usize,
    /// Unmet info suggestions
    pub info: usize,
    /// Checks that did not run
    pub skipped: usize,
    pub total: usize,
}

/// Overall outcome of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Failed,
    PassedWithWarnings,
    Passed,
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Failed => 1,
            RunStatus::PassedWithWarnings | RunStatus::Passed => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Failed => "FAILED",
            RunStatus::PassedWithWarnings => "PASSED WITH WARNINGS",
            RunStatus::Passed => "PASSED",
        }
    }
}

/// Findings and statistics from one validator invocation
#[derive(Debug, Clone)]
pub struct ValidationRun {
    pub title: String,
    /// Validated path, as given
    pub target: String,
    pub layout: ReportLayout,
    pub stats: Vec<Statistic>,
    pub findings: Vec<Finding>,
    /// Free-form lines printed after the findings
    pub notes: Vec<String>,
}

impl ValidationRun {
    pub fn new(title: impl Into<String>, target: impl Into<String>, layout: ReportLayout) -> Self {
        ValidationRun {
            title: title.into(),
            target: target.into(),
            layout,
            stats: Vec::new(),
            findings: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn stat(&mut self, label: &'static str, value: usize) {
        self.stats.push(Statistic { label, value });
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// True unless an unmet error-severity finding exists
    pub fn success(&self) -> bool {
        !self.findings.iter().any(Finding::is_blocking)
    }

    pub fn status(&self) -> RunStatus {
        let summary = self.summary();
        if summary.errors > 0 {
            RunStatus::Failed
        } else if summary.warnings > 0 {
            RunStatus::PassedWithWarnings
        } else {
            RunStatus::Passed
        }
    }

    /// Calculate summary statistics
    pub fn summary(&self) -> FindingSummary {
        let mut summary = FindingSummary::default();

        for finding in &self.findings {
            summary.total += 1;

            if finding.passed {
                summary.passed += 1;
                continue;
            }
            if finding.skipped {
                summary.skipped += 1;
                continue;
            }

            match finding.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
        }

        summary
    }

    /// Unmet findings of one severity, in execution order
    pub fn unmet(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| !f.passed && !f.skipped && f.severity == severity)
            .collect()
    }

    /// Confirmations, in execution order
    pub fn passed(&self) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.passed).collect()
    }
}
