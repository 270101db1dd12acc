//! Locates candidate init scripts by first-line marker.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ScanError;

/// First line the locator looks for by default.
pub const SHELL_MARKER: &str = "#!/bin/sh";

/// Return the files directly inside `dir` (non-recursive) whose first line,
/// trimmed, equals `marker`.
///
/// Non-matching and unreadable entries are silently excluded; only a failure
/// to list `dir` itself is an error. Matches are sorted by path so the scan
/// order does not depend on the platform's directory enumeration order.
pub fn find_scripts(dir: &Path, marker: &str) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut scripts = Vec::new();
    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if first_line_matches(&path, marker) {
            scripts.push(path);
        } else {
            debug!(path = %path.display(), "first line does not match marker, excluded");
        }
    }
    scripts.sort();
    Ok(scripts)
}

fn first_line_matches(path: &Path, marker: &str) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut first = String::new();
    if BufReader::new(file).read_line(&mut first).is_err() {
        return false;
    }
    first.trim() == marker
}
