//! File and directory ignore pattern handling for Mason templates.
//! This module processes .masonignore files to exclude specific paths
//! from template materialization, similar to .gitignore functionality.

use crate::constants::IGNORE_FILE;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Patterns excluded from every materialization, ignore file or not.
const DEFAULT_PATTERNS: [&str; 2] = ["**/.DS_Store", IGNORE_FILE];

/// Reads the template root's .masonignore file into a set of glob patterns.
///
/// # Notes
/// - If the .masonignore file doesn't exist, only the default patterns apply
/// - Each non-empty line is a separate glob pattern; `#` lines are comments
/// - Invalid patterns result in an IgnoreError
///
/// # Example
/// ```ignore
/// # Contents of .masonignore:
/// *.pyc
/// __pycache__/
/// .git/
/// ```
pub fn parse_ignore_file<P: AsRef<Path>>(template_root: P) -> Result<GlobSet> {
    let ignore_path = template_root.as_ref().join(IGNORE_FILE);
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_PATTERNS {
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::IgnoreError(format!("invalid built-in pattern: {}", e))
        })?);
    }

    if let Ok(contents) = read_to_string(&ignore_path) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(line).map_err(|e| {
                Error::IgnoreError(format!(".masonignore loading failed: {}", e))
            })?);
        }
    } else {
        debug!(".masonignore does not exist");
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!(".masonignore loading failed: {}", e)))
}
