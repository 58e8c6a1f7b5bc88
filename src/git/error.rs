//! Version-control query errors
//!
//! Every query is an external `git` process. A process that could not be
//! started is a **`Spawn`** error, one that exited nonzero is an
//! **`ExternalToolError`** carrying its combined output.

use std::path::PathBuf;
use thiserror::Error;

/// A subprocess exited with a nonzero status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{command}` failed ({}): {output}", status_text(.status))]
pub struct ExternalToolError {
    /// Command line as it was run
    pub command: String,
    /// Exit code, `None` when killed by a signal
    pub status: Option<i32>,
    /// Trimmed stdout followed by stderr
    pub output: String,
}

#[allow(clippy::ref_option)]
fn status_text(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Errors from repository queries
#[derive(Debug, Error)]
pub enum GitError {
    /// Query exited unsuccessfully
    #[error(transparent)]
    Tool(#[from] ExternalToolError),

    /// Query process could not be started
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Query succeeded but printed nothing
    #[error("`{command}` returned no output")]
    EmptyOutput { command: String },

    /// File is not below the reported repository root
    #[error("Relative path: {} is not inside {}", .file.display(), .root.display())]
    RelativePath { file: PathBuf, root: PathBuf },
}
