//! Tunable limits and names.
//!
//! Every field has a default, so an empty settings file (or none at all) is
//! valid. Unknown keys are rejected to catch typos.

use crate::PreflightError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Findings listed per severity tier before "... and N more"
    pub max_displayed_issues: usize,
    /// Passed confirmations listed in a clean report
    pub max_passed_displayed: usize,
    /// Characters of a URL shown in a message before truncation
    pub max_display_length: usize,
    /// Timeout for `<tool> --version` style probes
    pub probe_timeout_secs: u64,
    /// Timeout for `go mod verify`
    pub module_verify_timeout_secs: u64,
    /// Extension of content files, without the dot
    pub content_extension: String,
    /// Content file allowed to omit frontmatter
    pub index_file_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_displayed_issues: 10,
            max_passed_displayed: 5,
            max_display_length: 50,
            probe_timeout_secs: 5,
            module_verify_timeout_secs: 30,
            content_extension: "md".to_string(),
            index_file_name: "_index.md".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, PreflightError> {
        let text = crate::platform::fs::load_text(path)?;
        Self::from_toml(&text).map_err(|source| PreflightError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
