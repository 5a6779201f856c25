//! Rule registration and execution.
//!
//! A [`RuleSet`] holds the fixed, ordered rules of one validator and runs
//! them against a single artifact.
//!
//! # Graceful Degradation
//!
//! - Rule panics: caught via `std::panic::catch_unwind` and converted to one
//!   error finding for the artifact; the remaining rules for that artifact
//!   are skipped
//! - Empty rule set: returns no findings (not an error)
//!
//! Findings come back in rule declaration order. No function in this module
//! will panic.

use crate::settings::Settings;
use crate::{Category, Finding, Location, Severity};
use std::panic::{self, AssertUnwindSafe};

/// Rule id used for findings synthesized from a rule panic.
pub const PANIC_RULE_ID: &str = "ENGINE";

/// Anything a rule set can run against.
pub trait Artifact {
    /// Where findings about the artifact as a whole should point
    fn location(&self) -> Option<Location>;
}

/// Pure function from an artifact to zero or more findings.
pub type RuleFn<A> = fn(&A, &Settings) -> Vec<Finding>;

/// A registered rule with its execution function
pub struct RegisteredRule<A> {
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub rule_fn: RuleFn<A>,
}

/// Ordered rules for one validator
pub struct RuleSet<A> {
    rules: Vec<RegisteredRule<A>>,
}

impl<A: Artifact> RuleSet<A> {
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Register a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: RegisteredRule<A>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[RegisteredRule<A>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `artifact` in declaration order.
    pub fn run(&self, artifact: &A, settings: &Settings) -> Vec<Finding> {
        let mut findings = Vec::new();

        for rule in &self.rules {
            tracing::debug!(rule = rule.id, name = rule.name, "running rule");
            let result = panic::catch_unwind(AssertUnwindSafe(|| (rule.rule_fn)(artifact, settings)));

            match result {
                Ok(rule_findings) => findings.extend(rule_findings),
                Err(payload) => {
                    let detail = panic_message(payload.as_ref());
                    tracing::warn!(rule = rule.id, detail = %detail, "rule panicked");

                    let mut finding = Finding::issue(
                        PANIC_RULE_ID,
                        Severity::Error,
                        Category::Structure,
                        format!("Rule {} ({}) failed unexpectedly: {}", rule.id, rule.name, detail),
                    );
                    if let Some(location) = artifact.location() {
                        finding = finding.at(location);
                    }
                    findings.push(finding);
                    break;
                }
            }
        }

        findings
    }
}

impl<A: Artifact> Default for RuleSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
