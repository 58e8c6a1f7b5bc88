use thiserror::Error;

/// Errors produced while building a browsable URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Remote is not an SSH GitHub remote (`git@github.com:org/repo.git`)
    #[error("Only github repos supported, unsupported remote '{remote}'")]
    UnsupportedRemote { remote: String },
}
