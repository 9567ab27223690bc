//! Input file discovery.

use crate::error::{CollateError, Result};
use globset::GlobBuilder;
use std::path::{Path, PathBuf};

/// List the files in `dir` whose names match `pattern`, ignoring case.
///
/// Only the directory itself is searched. Results are sorted by file name so
/// the processing order is stable across platforms.
///
/// # Errors
///
/// Returns error if the pattern is invalid or the directory cannot be read.
pub fn scan_dir(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let scan_err = |source: std::io::Error| CollateError::Scan {
        dir: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(scan_err)? {
        let path = entry.map_err(scan_err)?.path();
        // follows symlinks
        if !path.is_file() {
            continue;
        }
        if path.file_name().is_some_and(|name| matcher.is_match(name)) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
