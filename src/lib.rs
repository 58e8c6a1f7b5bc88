//! opengithub - open a copied file reference on GitHub
//!
//! Takes text like `pkg/server/main.go:17` (usually from the clipboard),
//! finds the file it names below a search root, asks `git` for the
//! repository, remote and branch, and builds the matching
//! `https://github.com/{org}/{repo}/blob/{branch}/{path}#L{line}` URL.

use thiserror::Error;

pub mod app;
pub mod cli;
pub mod config;
pub mod git;
pub mod logging;
pub mod output;
pub mod platform;
pub mod reference;
pub mod resolve;
pub mod url;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum OpenGithubError {
    /// Neither an argument nor clipboard text was available
    #[error("--file and clipboard empty 👻")]
    EmptyInput,
    /// Clipboard text does not look like a file path
    #[error("Clipboard text not a file: '{0}'")]
    NotAFile(String),
    /// Malformed `path:line`
    #[error("Parse file line: {0}")]
    Parse(#[from] reference::ParseError),
    /// Path could not be resolved to a single file
    #[error("Cannot find file: {0}")]
    Resolve(#[from] resolve::ResolveError),
    /// Repository query failed
    #[error("Git: {0}")]
    Git(#[from] git::GitError),
    /// Remote cannot be turned into a URL
    #[error("Format url: {0}")]
    Format(#[from] url::FormatError),
    /// Clipboard or browser failure
    #[error("{0}")]
    Platform(#[from] platform::PlatformError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
