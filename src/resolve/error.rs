//! Path resolution error types
//!
//! - **`EmptyPath`**: nothing left to search for after dropping separators
//! - **`FileNotFound`**: no suffix of the path exists below the root
//! - **`AmbiguousMatch`**: a segment matched more than one entry in a directory
//! - **`InvalidPattern`**: a segment is not a valid glob pattern
//! - **`NotADirectory`**: a segment matched a file but more segments follow
//! - **`Io`**: listing a directory failed for a reason other than permissions

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving a partial path
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Input path was empty
    #[error("Empty path provided")]
    EmptyPath,

    /// No candidate file exists below the root
    #[error("Cannot find '{path}' in root {}", .root.display())]
    FileNotFound { path: String, root: PathBuf },

    /// A segment matched several entries in the same directory
    #[error("Multiple matches for '{segment}': {}", format_candidates(.candidates))]
    AmbiguousMatch {
        segment: String,
        candidates: Vec<PathBuf>,
    },

    /// A segment could not be compiled as a glob pattern
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The only match for a segment is a file, yet segments remain
    #[error("Read dir {}: not a directory (remaining: {remaining})", .path.display())]
    NotADirectory { path: PathBuf, remaining: String },

    /// Listing a directory failed
    #[error("Read dir {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_candidates(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
