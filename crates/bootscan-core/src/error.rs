use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while scanning a firmware tree.
///
/// Everything else the analyzer encounters (unknown statements, malformed
/// conditions, unresolved parameters, missing include targets) is by policy
/// not an error and never reaches this type.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A root invocation target could not be read or listed.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `if`/`else`/`fi` nesting is unbalanced within one script.
    #[error("{script}:{line}: {message}")]
    Structure {
        script: PathBuf,
        line: usize,
        message: String,
    },

    /// A script sourced itself, directly or through intermediaries.
    #[error("include cycle detected at {path}")]
    CyclicInclude { path: PathBuf },
}

impl ScanError {
    /// Process exit code for the CLI, one per failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScanError::Structure { .. } | ScanError::CyclicInclude { .. } => 3,
            ScanError::Io { .. } => 4,
        }
    }
}
