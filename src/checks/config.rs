//! Site configuration checks (CFG-001 through CFG-005).
//!
//! The configuration text is matched with regular expressions and never
//! parsed as TOML. A syntactically broken file still gets a full report.

use crate::data::requirements::{FieldRequirement, DEFENSIVE_DEFAULTS, REQUIRED_FIELDS};
use crate::engine::orchestrator::{Artifact, RegisteredRule, RuleSet};
use crate::settings::Settings;
use crate::{Category, Finding, Location, Severity};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Rule id for a configuration file that could not be loaded
pub const LOAD_RULE_ID: &str = "CFG-000";

const MENU_BLOCK_MARKER: &str = "[[menu.main]]";

static REQUIRED_PATTERNS: LazyLock<Vec<(FieldRequirement, Regex)>> = LazyLock::new(|| {
    REQUIRED_FIELDS
        .iter()
        .map(|req| {
            let pattern = format!(r"(?m)^\s*{}\s*=\s*.+$", regex::escape(req.field));
            (*req, Regex::new(&pattern).expect("valid required-field regex"))
        })
        .collect()
});

static DEFAULT_PATTERNS: LazyLock<Vec<(FieldRequirement, Regex)>> = LazyLock::new(|| {
    DEFENSIVE_DEFAULTS
        .iter()
        .map(|req| {
            let pattern = format!(r"(?m)^\s*{}\s*=\s*true", regex::escape(req.field));
            (*req, Regex::new(&pattern).expect("valid defensive-default regex"))
        })
        .collect()
});

static WEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"weight\s*=\s*(\d+)").expect("valid weight regex"));

static SEARCH_OUTPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"type\s*=\s*["']search["']"#).expect("valid search regex"));

/// A loaded site configuration file.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    pub path: PathBuf,
    pub content: String,
}

impl ConfigDocument {
    pub fn new(path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        ConfigDocument {
            path: path.as_ref().to_path_buf(),
            content: content.into(),
        }
    }
}

impl Artifact for ConfigDocument {
    fn location(&self) -> Option<Location> {
        Some(Location::file(&self.path))
    }
}

/// Get all configuration rules in execution order
pub fn config_rules() -> RuleSet<ConfigDocument> {
    let mut rules = RuleSet::new();
    rules.register(RegisteredRule {
        id: "CFG-001",
        name: "Required Fields",
        category: Category::Required,
        description: "baseURL, title and languageCode must be defined",
        rule_fn: check_required_fields,
    });
    rules.register(RegisteredRule {
        id: "CFG-002",
        name: "Security Settings",
        category: Category::Security,
        description: "Note unsafe HTML rendering and link rel attributes",
        rule_fn: check_security_settings,
    });
    rules.register(RegisteredRule {
        id: "CFG-003",
        name: "Defensive Defaults",
        category: Category::Defaults,
        description: "enableRobotsTXT and enableGitInfo should be true",
        rule_fn: check_defensive_defaults,
    });
    rules.register(RegisteredRule {
        id: "CFG-004",
        name: "Menu Weights",
        category: Category::Menu,
        description: "Main menu entries should have distinct weights",
        rule_fn: check_menu_weights,
    });
    rules.register(RegisteredRule {
        id: "CFG-005",
        name: "Accessibility Settings",
        category: Category::Accessibility,
        description: "Language and search configuration",
        rule_fn: check_accessibility,
    });
    rules
}

/// Run CFG-001: Required Fields
pub fn check_required_fields(doc: &ConfigDocument, _: &Settings) -> Vec<Finding> {
    REQUIRED_PATTERNS
        .iter()
        .map(|(req, re)| {
            if re.is_match(&doc.content) {
                Finding::pass(
                    "CFG-001",
                    Severity::Info,
                    Category::Required,
                    format!("Required field '{}' is present", req.field),
                )
            } else {
                Finding::issue(
                    "CFG-001",
                    Severity::Error,
                    Category::Required,
                    format!("Missing required field '{}': {}", req.field, req.reason),
                )
            }
        })
        .collect()
}

/// Run CFG-002: Security Settings
///
/// Both outcomes are confirmations; unsafe rendering is a passed warning.
pub fn check_security_settings(doc: &ConfigDocument, _: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();
    let text = &doc.content;

    if text.contains("unsafe = true") {
        findings.push(Finding::pass(
            "CFG-002",
            Severity::Warning,
            Category::Security,
            "Unsafe HTML rendering enabled - ensure content is trusted",
        ));
    }

    if text.contains("rel=") && (text.contains("noreferrer") || text.contains("noopener")) {
        findings.push(Finding::pass(
            "CFG-002",
            Severity::Info,
            Category::Security,
            "External links have security attributes (noreferrer/noopener)",
        ));
    }

    findings
}

/// Run CFG-003: Defensive Defaults
pub fn check_defensive_defaults(doc: &ConfigDocument, _: &Settings) -> Vec<Finding> {
    DEFAULT_PATTERNS
        .iter()
        .map(|(req, re)| {
            if re.is_match(&doc.content) {
                Finding::pass(
                    "CFG-003",
                    Severity::Info,
                    Category::Defaults,
                    format!("Defensive default enabled: {}", req.field),
                )
            } else {
                Finding::issue(
                    "CFG-003",
                    Severity::Warning,
                    Category::Defaults,
                    format!("Recommended: Enable {} - {}", req.field, req.reason),
                )
            }
        })
        .collect()
}

/// Weight of each `[[menu.main]]` block that declares one, in file order.
///
/// A block runs from its marker to the next marker or the end of the file.
/// Weights are kept as digit strings without leading zeros so values of any
/// width compare by numeric value.
pub fn menu_weights(content: &str) -> Vec<&str> {
    content
        .split(MENU_BLOCK_MARKER)
        .skip(1)
        .filter_map(|block| WEIGHT_RE.captures(block))
        .filter_map(|caps| caps.get(1))
        .map(|digits| match digits.as_str().trim_start_matches('0') {
            "" => "0",
            value => value,
        })
        .collect()
}

/// Run CFG-004: Menu Weights
pub fn check_menu_weights(doc: &ConfigDocument, _: &Settings) -> Vec<Finding> {
    let weights = menu_weights(&doc.content);
    if weights.is_empty() {
        return Vec::new();
    }

    let distinct: HashSet<_> = weights.iter().collect();
    if distinct.len() == weights.len() {
        vec![Finding::pass(
            "CFG-004",
            Severity::Info,
            Category::Menu,
            format!("Menu weights are unique ({} items)", weights.len()),
        )]
    } else {
        vec![Finding::issue(
            "CFG-004",
            Severity::Warning,
            Category::Menu,
            "Duplicate menu weights found - may cause ordering issues",
        )]
    }
}

/// Run CFG-005: Accessibility Settings
pub fn check_accessibility(doc: &ConfigDocument, _: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();
    let text = &doc.content;

    if text.contains("languageCode") || text.contains("defaultContentLanguage") {
        findings.push(Finding::pass(
            "CFG-005",
            Severity::Info,
            Category::Accessibility,
            "Language configuration present for accessibility",
        ));
    }

    if SEARCH_OUTPUT_RE.is_match(text) {
        findings.push(Finding::pass(
            "CFG-005",
            Severity::Info,
            Category::Accessibility,
            "Search functionality configured (enhances accessibility)",
        ));
    }

    findings
}
