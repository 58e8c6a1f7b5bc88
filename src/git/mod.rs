//! Repository queries for a file on disk
//!
//! [`RepoLocator`] asks `git` (through a [`CommandRunner`]) for the
//! repository root, the `origin` remote and the checked-out branch of the
//! repository containing a file. All queries run in the file's directory.

pub mod error;
pub mod runner;

pub use error::{ExternalToolError, GitError};
pub use runner::{CommandRunner, Invocation, ScriptedRunner, SystemRunner};

use std::fs;
use std::path::{Component, Path, PathBuf};

const GIT: &str = "git";
const TOPLEVEL_ARGS: [&str; 2] = ["rev-parse", "--show-toplevel"];
const REMOTE_ARGS: [&str; 3] = ["config", "--get", "remote.origin.url"];
const BRANCH_ARGS: [&str; 3] = ["rev-parse", "--abbrev-ref", "HEAD"];

/// Where a file lives in its repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Repository root directory
    pub root: PathBuf,
    /// `origin` remote URL
    pub remote: String,
    /// File path relative to `root`, `/`-separated
    pub relative_path: String,
}

/// Queries version control about files
#[derive(Debug, Clone, Default)]
pub struct RepoLocator<R = SystemRunner> {
    runner: R,
}

impl RepoLocator<SystemRunner> {
    /// Locator that runs the real `git`
    #[must_use]
    pub const fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl<R: CommandRunner> RepoLocator<R> {
    #[must_use]
    pub const fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// The underlying runner
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    fn query(&self, file: &Path, args: &[&str]) -> Result<String, GitError> {
        let dir = file.parent().unwrap_or(file);
        let out = self.runner.run(GIT, args, dir)?;
        if out.is_empty() {
            return Err(GitError::EmptyOutput {
                command: runner::command_line(GIT, args),
            });
        }
        Ok(out)
    }

    /// Root directory of the repository containing `file`
    ///
    /// # Errors
    /// Returns `GitError` if `git rev-parse --show-toplevel` fails.
    pub fn repo_root(&self, file: &Path) -> Result<PathBuf, GitError> {
        self.query(file, &TOPLEVEL_ARGS).map(PathBuf::from)
    }

    /// URL of the `origin` remote
    ///
    /// # Errors
    /// Returns `GitError` if no `origin` remote is configured.
    pub fn remote_url(&self, file: &Path) -> Result<String, GitError> {
        self.query(file, &REMOTE_ARGS)
    }

    /// Name of the currently checked-out branch
    ///
    /// # Errors
    /// Returns `GitError` if `git rev-parse --abbrev-ref HEAD` fails.
    pub fn current_branch(&self, file: &Path) -> Result<String, GitError> {
        self.query(file, &BRANCH_ARGS)
    }

    /// Repository root, remote and relative path for `file`
    ///
    /// # Errors
    /// Returns `GitError` if any query fails or `file` is outside the root.
    pub fn locate(&self, file: &Path) -> Result<Location, GitError> {
        let root = self.repo_root(file)?;
        let relative_path = relative_path(&root, file)?;
        let remote = self.remote_url(file)?;
        Ok(Location {
            root,
            remote,
            relative_path,
        })
    }
}

/// Path of `file` relative to `root`, joined with `/`.
///
/// Falls back to comparing canonical paths when the plain prefix does not
/// match, e.g. when `git` reports a resolved symlink.
///
/// # Errors
/// Returns `GitError::RelativePath` if `file` is not below `root`.
pub fn relative_path(root: &Path, file: &Path) -> Result<String, GitError> {
    if let Ok(rel) = file.strip_prefix(root) {
        return Ok(join_slash(rel));
    }

    let canonical_root = fs::canonicalize(root).ok();
    let canonical_file = fs::canonicalize(file).ok();
    if let (Some(root), Some(file)) = (canonical_root, canonical_file) {
        if let Ok(rel) = file.strip_prefix(&root) {
            return Ok(join_slash(rel));
        }
    }

    Err(GitError::RelativePath {
        file: file.to_path_buf(),
        root: root.to_path_buf(),
    })
}

fn join_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted() -> ScriptedRunner {
        ScriptedRunner::new()
            .respond("git rev-parse --show-toplevel", "/home/dev/widgets\n")
            .respond("git config --get remote.origin.url", "git@github.com:acme/widgets.git\n")
            .respond("git rev-parse --abbrev-ref HEAD", "main\n")
    }

    #[test]
    fn test_locate() {
        let locator = RepoLocator::with_runner(scripted());
        let location = locator
            .locate(Path::new("/home/dev/widgets/src/app.go"))
            .unwrap();
        assert_eq!(location.root, PathBuf::from("/home/dev/widgets"));
        assert_eq!(location.remote, "git@github.com:acme/widgets.git");
        assert_eq!(location.relative_path, "src/app.go");
    }

    #[test]
    fn test_queries_run_in_file_directory() {
        let locator = RepoLocator::with_runner(scripted());
        locator.locate(Path::new("/home/dev/widgets/src/app.go")).unwrap();
        locator.current_branch(Path::new("/home/dev/widgets/src/app.go")).unwrap();

        let calls = locator.runner().calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.dir == PathBuf::from("/home/dev/widgets/src")));
        assert_eq!(calls[2].command, "git rev-parse --abbrev-ref HEAD");
    }

    #[test]
    fn test_current_branch() {
        let locator = RepoLocator::with_runner(scripted());
        let branch = locator.current_branch(Path::new("/home/dev/widgets/a.rs")).unwrap();
        assert_eq!(branch, "main");
    }

    #[test]
    fn test_not_a_repository() {
        let runner = ScriptedRunner::new().fail(
            "git rev-parse --show-toplevel",
            128,
            "fatal: not a git repository (or any of the parent directories): .git",
        );
        let locator = RepoLocator::with_runner(runner);
        match locator.locate(Path::new("/tmp/x.rs")) {
            Err(GitError::Tool(e)) => {
                assert_eq!(e.status, Some(128));
                assert!(e.output.contains("not a git repository"));
            }
            other => panic!("Expected Tool error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_origin() {
        let runner = ScriptedRunner::new()
            .respond("git rev-parse --show-toplevel", "/repo")
            .fail("git config --get remote.origin.url", 1, "");
        let locator = RepoLocator::with_runner(runner);
        assert!(matches!(
            locator.locate(Path::new("/repo/a.rs")),
            Err(GitError::Tool(_))
        ));
    }

    #[test]
    fn test_empty_output() {
        let runner = ScriptedRunner::new().respond("git rev-parse --show-toplevel", "  \n");
        let locator = RepoLocator::with_runner(runner);
        assert!(matches!(
            locator.repo_root(Path::new("/repo/a.rs")),
            Err(GitError::EmptyOutput { .. })
        ));
    }

    #[test]
    fn test_file_outside_root() {
        let runner = ScriptedRunner::new().respond("git rev-parse --show-toplevel", "/other");
        let locator = RepoLocator::with_runner(runner);
        assert!(matches!(
            locator.locate(Path::new("/repo/a.rs")),
            Err(GitError::RelativePath { .. })
        ));
    }

    #[test]
    fn test_relative_path_nested() {
        let rel = relative_path(Path::new("/repo"), Path::new("/repo/a/b/c.rs")).unwrap();
        assert_eq!(rel, "a/b/c.rs");
    }

    #[cfg(unix)]
    #[test]
    fn test_relative_path_through_symlink() {
        let temp = tempfile::TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir_all(real.join("src")).unwrap();
        fs::write(real.join("src/lib.rs"), "").unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("link")).unwrap();

        let rel = relative_path(&real, &temp.path().join("link/src/lib.rs")).unwrap();
        assert_eq!(rel, "src/lib.rs");
    }
}
