//! Blob URL formatting
//!
//! Turns `git@github.com:{org}/{repo}.git` plus a branch, a repository
//! relative path and an optional line into
//! `https://github.com/{org}/{repo}/blob/{branch}/{path}[#L{line}]`.

pub mod error;

pub use error::FormatError;

/// Prefix every supported remote contains
pub const GITHUB_SSH_PREFIX: &str = "git@github.com:";
const GITHUB_HTTPS_PREFIX: &str = "https://github.com/";
const GIT_SUFFIX: &str = ".git";

/// Everything needed to build a blob URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    pub remote: String,
    pub relative_path: String,
    pub branch: String,
    pub line: u32,
}

impl RemoteDescriptor {
    /// Render this descriptor with [`format_blob_url`]
    ///
    /// # Errors
    /// Returns `FormatError::UnsupportedRemote` for non-GitHub remotes.
    pub fn url(&self) -> Result<String, FormatError> {
        format_blob_url(&self.remote, &self.branch, &self.relative_path, self.line)
    }
}

/// Build the blob URL for `relative_path` on `branch`.
///
/// A `line` of `0` produces no `#L` anchor.
///
/// # Errors
/// Returns `FormatError::UnsupportedRemote` if `remote` does not contain
/// `git@github.com:` followed by a repository path.
pub fn format_blob_url(
    remote: &str,
    branch: &str,
    relative_path: &str,
    line: u32,
) -> Result<String, FormatError> {
    let unsupported = || FormatError::UnsupportedRemote {
        remote: remote.to_string(),
    };

    let remote = remote.trim();
    let start = remote.find(GITHUB_SSH_PREFIX).ok_or_else(unsupported)?;
    let repo = &remote[start + GITHUB_SSH_PREFIX.len()..];
    let repo = repo.strip_suffix(GIT_SUFFIX).unwrap_or(repo).trim_matches('/');
    if repo.is_empty() {
        return Err(unsupported());
    }

    let path = relative_path.replace('\\', "/");
    let path = path.trim_start_matches('/');
    let mut url = format!("{GITHUB_HTTPS_PREFIX}{repo}/blob/{branch}/{path}");
    if line != 0 {
        url.push_str(&format!("#L{line}"));
    }

    Ok(url)
}
