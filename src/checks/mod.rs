//! Validation rule modules.
//!
//! Rules are organized by validator:
//! - Config: required fields and defensive defaults in the site configuration
//! - Content: markdown link, structure, and accessibility heuristics
//! - Environment: development toolchain probes
//!
//! # Graceful Degradation
//!
//! All rules follow these degradation rules:
//! - Pattern not present: emit a finding or nothing, never an error
//! - Tool probe failure: downgraded to a not-found or unknown-version status
//! - Optional dependency missing: the dependent check is reported as skipped
//!
//! Rules never panic on their own. Should one panic anyway, the engine turns
//! it into a single error finding for the artifact being checked.

pub mod config;
pub mod content;
pub mod environment;

use crate::Category;

/// One row of the rule catalog shown by `site-preflight list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub validator: &'static str,
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
}

/// Get every registered rule, grouped by validator in execution order
pub fn catalog() -> Vec<RuleInfo> {
    let mut rules = Vec::new();

    for rule in config::config_rules().rules() {
        rules.push(RuleInfo {
            validator: "config",
            id: rule.id,
            name: rule.name,
            category: rule.category,
            description: rule.description,
        });
    }
    for rule in content::content_rules().rules() {
        rules.push(RuleInfo {
            validator: "content",
            id: rule.id,
            name: rule.name,
            category: rule.category,
            description: rule.description,
        });
    }
    for rule in environment::environment_rules().rules() {
        rules.push(RuleInfo {
            validator: "env",
            id: rule.id,
            name: rule.name,
            category: rule.category,
            description: rule.description,
        });
    }

    rules
}

/// Cut `value` to at most `cap` characters, marking the cut with `...`.
pub fn truncate_for_display(value: &str, cap: usize) -> String {
    match value.char_indices().nth(cap) {
        Some((end, _)) => format!("{}...", &value[..end]),
        None => value.to_string(),
    }
}
