//! Filesystem access for validated artifacts.
//!
//! # Graceful Degradation
//!
//! - Missing file or directory: `PreflightError::NotFound`
//! - Non-UTF-8 content: `PreflightError::Decode`
//! - Unreadable entries during a directory walk: returned alongside the
//!   files found, so the caller can report them
//!
//! No function in this module will panic.

use crate::PreflightError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read a whole file as UTF-8 text.
pub fn load_text(path: &Path) -> Result<String, PreflightError> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PreflightError::NotFound {
            path: path.to_path_buf(),
        },
        _ => PreflightError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    String::from_utf8(bytes).map_err(|_| PreflightError::Decode {
        path: path.to_path_buf(),
    })
}

/// Outcome of walking a content tree
#[derive(Debug, Default)]
pub struct FileScan {
    /// Matching files, sorted by path
    pub files: Vec<PathBuf>,
    /// Entries the walk could not read, in walk order
    pub unreadable: Vec<(PathBuf, PreflightError)>,
}

/// Recursively collect files with the given extension.
///
/// Fails only when `dir` itself is missing, not a directory or unreadable.
pub fn find_files(dir: &Path, extension: &str) -> Result<FileScan, PreflightError> {
    if !dir.exists() {
        return Err(PreflightError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(PreflightError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut scan = FileScan::default();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                tracing::warn!(path = %path.display(), error = %e, "unreadable entry in content tree");
                let error = PreflightError::Io {
                    path: path.clone(),
                    source: e.into(),
                };
                if path == dir {
                    return Err(error);
                }
                scan.unreadable.push((path, error));
                continue;
            }
        };

        if entry.file_type().is_file()
            && entry.path().extension().and_then(|ext| ext.to_str()) == Some(extension)
        {
            scan.files.push(entry.into_path());
        }
    }

    scan.files.sort();
    Ok(scan)
}
