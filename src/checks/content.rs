//! Markdown content checks (CNT-001 through CNT-005).
//!
//! Each rule scans the document line by line with regular expressions.
//! Markdown is never parsed, so the rules are heuristics:
//! - headings inside code fences still count as headings
//! - nested or unterminated fences are not tracked specially
//! - a relative link "looks like a file" when it contains a dot

use crate::checks::truncate_for_display;
use crate::engine::orchestrator::{Artifact, RegisteredRule, RuleSet};
use crate::engine::result::ValidationRun;
use crate::settings::Settings;
use crate::{Category, Finding, Location, Severity};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Rule id for a content file or directory that could not be loaded
pub const LOAD_RULE_ID: &str = "CNT-000";

// The optional bang lets image syntax match first so it can be excluded.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^\)]+)\)").expect("valid link regex"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^\)]+)\)").expect("valid image regex"));

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading regex"));

const FENCE: &str = "```";

/// A loaded markdown file.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    /// Path relative to the content directory
    pub path: PathBuf,
    pub file_name: String,
    pub content: String,
}

impl MarkdownDocument {
    pub fn new(path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        MarkdownDocument {
            path,
            file_name,
            content: content.into(),
        }
    }

    /// Lines paired with their 1-based line number
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content.lines().enumerate().map(|(i, line)| (i + 1, line))
    }

    fn at_line(&self, line: usize) -> Location {
        Location::line(&self.path, line)
    }
}

impl Artifact for MarkdownDocument {
    fn location(&self) -> Option<Location> {
        Some(Location::file(&self.path))
    }
}

/// How a link target is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Anchor,
    Mailto,
    External,
    Internal,
}

impl LinkKind {
    fn of(url: &str) -> Self {
        if url.starts_with('#') {
            LinkKind::Anchor
        } else if url.starts_with("mailto:") {
            LinkKind::Mailto
        } else if url.starts_with("http://") || url.starts_with("https://") {
            LinkKind::External
        } else {
            LinkKind::Internal
        }
    }
}

/// A `[text](url)` occurrence; images are never links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef<'a> {
    pub line: usize,
    pub text: &'a str,
    pub url: &'a str,
    pub kind: LinkKind,
}

/// An `![alt](url)` occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub line: usize,
    pub alt: &'a str,
    pub url: &'a str,
}

/// Every link in the document, in reading order.
pub fn links(doc: &MarkdownDocument) -> Vec<LinkRef<'_>> {
    let mut found = Vec::new();
    for (line_num, line) in doc.numbered_lines() {
        for caps in LINK_RE.captures_iter(line) {
            let is_image = caps.get(1).is_some_and(|bang| !bang.as_str().is_empty());
            if is_image {
                continue;
            }
            let (Some(text), Some(url)) = (caps.get(2), caps.get(3)) else {
                continue;
            };
            found.push(LinkRef {
                line: line_num,
                text: text.as_str(),
                url: url.as_str(),
                kind: LinkKind::of(url.as_str()),
            });
        }
    }
    found
}

/// Every image in the document, in reading order.
pub fn images(doc: &MarkdownDocument) -> Vec<ImageRef<'_>> {
    let mut found = Vec::new();
    for (line_num, line) in doc.numbered_lines() {
        for caps in IMAGE_RE.captures_iter(line) {
            let (Some(alt), Some(url)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            found.push(ImageRef {
                line: line_num,
                alt: alt.as_str(),
                url: url.as_str(),
            });
        }
    }
    found
}

/// Counters reported in the statistics block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub files_checked: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub images: usize,
}

impl ContentStats {
    pub fn merge(&mut self, other: &ContentStats) {
        self.files_checked += other.files_checked;
        self.internal_links += other.internal_links;
        self.external_links += other.external_links;
        self.images += other.images;
    }

    pub fn apply_to(&self, run: &mut ValidationRun) {
        run.stat("Files checked", self.files_checked);
        run.stat("Internal links", self.internal_links);
        run.stat("External links", self.external_links);
        run.stat("Images", self.images);
    }
}

/// Link and image counts for one document. `files_checked` is left at zero.
pub fn collect_stats(doc: &MarkdownDocument) -> ContentStats {
    let mut stats = ContentStats::default();
    for link in links(doc) {
        match link.kind {
            LinkKind::External => stats.external_links += 1,
            LinkKind::Internal => stats.internal_links += 1,
            LinkKind::Anchor | LinkKind::Mailto => {}
        }
    }
    stats.images = images(doc).len();
    stats
}

/// Get all content rules in execution order
pub fn content_rules() -> RuleSet<MarkdownDocument> {
    let mut rules = RuleSet::new();
    rules.register(RegisteredRule {
        id: "CNT-001",
        name: "Frontmatter",
        category: Category::Structure,
        description: "Content files start with a --- or +++ frontmatter block",
        rule_fn: check_frontmatter,
    });
    rules.register(RegisteredRule {
        id: "CNT-002",
        name: "Links",
        category: Category::Link,
        description: "HTTPS external links, prefixed relative links, non-empty link text",
        rule_fn: check_links,
    });
    rules.register(RegisteredRule {
        id: "CNT-003",
        name: "Heading Hierarchy",
        category: Category::Structure,
        description: "Heading levels increase one step at a time",
        rule_fn: check_headings,
    });
    rules.register(RegisteredRule {
        id: "CNT-004",
        name: "Code Block Languages",
        category: Category::Formatting,
        description: "Fenced code blocks declare a language",
        rule_fn: check_code_blocks,
    });
    rules.register(RegisteredRule {
        id: "CNT-005",
        name: "Image Alt Text",
        category: Category::Accessibility,
        description: "Images carry alt text for screen readers",
        rule_fn: check_image_alt_text,
    });
    rules
}

/// Run CNT-001: Frontmatter
pub fn check_frontmatter(doc: &MarkdownDocument, settings: &Settings) -> Vec<Finding> {
    let has_frontmatter = doc.content.starts_with("---") || doc.content.starts_with("+++");
    if has_frontmatter || doc.file_name == settings.index_file_name {
        return Vec::new();
    }

    vec![Finding::issue(
        "CNT-001",
        Severity::Warning,
        Category::Structure,
        "No frontmatter detected - consider adding title and metadata",
    )
    .at(doc.at_line(1))]
}

/// Run CNT-002: Links
pub fn check_links(doc: &MarkdownDocument, settings: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();

    for link in links(doc) {
        match link.kind {
            LinkKind::Anchor | LinkKind::Mailto => continue,
            LinkKind::External => {
                if link.url.starts_with("http://") {
                    findings.push(
                        Finding::issue(
                            "CNT-002",
                            Severity::Warning,
                            Category::Link,
                            format!(
                                "Non-HTTPS link found: {}",
                                truncate_for_display(link.url, settings.max_display_length)
                            ),
                        )
                        .at(doc.at_line(link.line)),
                    );
                }
            }
            LinkKind::Internal => {
                let prefixed = link.url.starts_with('/') || link.url.starts_with("../");
                if !prefixed && link.url.contains('.') {
                    findings.push(
                        Finding::issue(
                            "CNT-002",
                            Severity::Info,
                            Category::Link,
                            format!(
                                "Relative link without path prefix: {}",
                                truncate_for_display(link.url, settings.max_display_length)
                            ),
                        )
                        .at(doc.at_line(link.line)),
                    );
                }
            }
        }

        if link.text.trim().is_empty() {
            findings.push(
                Finding::issue(
                    "CNT-002",
                    Severity::Warning,
                    Category::Accessibility,
                    "Link has empty text - bad for screen readers",
                )
                .at(doc.at_line(link.line)),
            );
        }
    }

    findings
}

/// Run CNT-003: Heading Hierarchy
pub fn check_headings(doc: &MarkdownDocument, _: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut previous: Option<usize> = None;

    for (line_num, line) in doc.numbered_lines() {
        let Some(caps) = HEADING_RE.captures(line) else {
            continue;
        };
        let level = caps[1].len();

        if let Some(prev) = previous {
            if level > prev + 1 {
                findings.push(
                    Finding::issue(
                        "CNT-003",
                        Severity::Info,
                        Category::Structure,
                        format!(
                            "Heading level jump from h{} to h{} - may affect accessibility",
                            prev, level
                        ),
                    )
                    .at(doc.at_line(line_num)),
                );
            }
        }
        previous = Some(level);
    }

    findings
}

/// Run CNT-004: Code Block Languages
pub fn check_code_blocks(doc: &MarkdownDocument, _: &Settings) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut in_block = false;

    for (line_num, line) in doc.numbered_lines() {
        let trimmed = line.trim();
        let Some(info) = trimmed.strip_prefix(FENCE) else {
            continue;
        };

        if in_block {
            in_block = false;
            continue;
        }

        in_block = true;
        if info.trim().is_empty() {
            findings.push(
                Finding::issue(
                    "CNT-004",
                    Severity::Info,
                    Category::Formatting,
                    "Code block without language specification - consider adding for syntax highlighting",
                )
                .at(doc.at_line(line_num)),
            );
        }
    }

    findings
}

/// Run CNT-005: Image Alt Text
pub fn check_image_alt_text(doc: &MarkdownDocument, settings: &Settings) -> Vec<Finding> {
    images(doc)
        .into_iter()
        .filter(|image| image.alt.trim().is_empty())
        .map(|image| {
            Finding::issue(
                "CNT-005",
                Severity::Warning,
                Category::Accessibility,
                format!(
                    "Image without alt text: {} (bad for screen readers)",
                    truncate_for_display(image.url, settings.max_display_length)
                ),
            )
            .at(doc.at_line(image.line))
        })
        .collect()
}
