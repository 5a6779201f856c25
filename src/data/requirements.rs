//! Requirement tables for site configuration and the development toolchain.

/// A configuration key and why it matters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRequirement {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Keys every site configuration must define
pub const REQUIRED_FIELDS: &[FieldRequirement] = &[
    FieldRequirement {
        field: "baseURL",
        reason: "Base URL must be defined for proper site generation",
    },
    FieldRequirement {
        field: "title",
        reason: "Site title is required for SEO and accessibility",
    },
    FieldRequirement {
        field: "languageCode",
        reason: "Language code required for proper HTML lang attribute",
    },
];

/// Boolean switches that should be turned on
pub const DEFENSIVE_DEFAULTS: &[FieldRequirement] = &[
    FieldRequirement {
        field: "enableRobotsTXT",
        reason: "Robots.txt should be enabled for SEO control",
    },
    FieldRequirement {
        field: "enableGitInfo",
        reason: "Git info provides useful metadata for debugging",
    },
];

/// Oldest supported Python interpreter
pub const MIN_PYTHON: (u32, u32) = (3, 7);

/// Files Hugo modules need next to the site configuration
pub const GO_MODULE_FILES: &[(&str, &str)] = &[
    ("go.mod", "go.mod not found"),
    ("go.sum", "go.sum not found - run 'hugo mod get' or 'hugo mod tidy'"),
];

/// Printed when a required environment check fails
pub const INSTALL_HINTS: &[&str] = &[
    "Please install missing requirements:",
    "  Hugo Extended: https://gohugo.io/installation/",
    "  Go: https://go.dev/doc/install",
    "  Python 3.7+: https://www.python.org/downloads/",
    "Then run 'hugo mod get' to fetch Hugo modules",
];

/// Printed when the environment is ready
pub const DEVELOPMENT_HINTS: &[&str] = &[
    "You can start developing with:",
    "  hugo serve                # Start local development server",
    "  site-preflight config     # Validate configuration",
    "  site-preflight content    # Validate content",
];
