//! Resolution of partial paths to absolute files
//!
//! A path copied from a log or an editor is often relative to some directory
//! other than the one we search from, and may repeat directories the search
//! root is already inside. [`PathResolver::resolve`] tries successively
//! shorter suffixes of the path, skipping prefixes that the root already ends
//! with, and looks each suffix up with a depth-first segment search:
//!
//! 1. Look the first segment up by its exact name, else glob-match it against
//!    the children of the directory.
//! 2. A single match either is the answer (last segment) or is descended
//!    into with the remaining segments. A file cannot be descended into.
//! 3. Several matches are an error, the reference is ambiguous.
//! 4. No match: retry the full segment list in every subdirectory, in
//!    listing order, returning the first hit.
//!
//! Unreadable directories count as empty. Other listing failures abort.

pub mod error;
pub mod lister;
pub mod mock;

pub use error::ResolveError;
pub use lister::{DirLister, Entry, OsLister};
pub use mock::MockTree;

use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, trace, warn};

/// Maximum directory depth explored below the root
pub const DEFAULT_MAX_DEPTH: usize = 64;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Directories already searched, keyed with the number of segments left
pub type Visited = HashSet<(PathBuf, usize)>;

/// Finds the unique file a partial path refers to
#[derive(Debug, Clone)]
pub struct PathResolver<L = OsLister> {
    lister: L,
    max_depth: usize,
}

impl PathResolver<OsLister> {
    /// Resolver over the real filesystem
    #[must_use]
    pub const fn new() -> Self {
        Self::with_lister(OsLister)
    }
}

impl Default for PathResolver<OsLister> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: DirLister> PathResolver<L> {
    /// Resolver over a custom listing backend
    #[must_use]
    pub const fn with_lister(lister: L) -> Self {
        Self {
            lister,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the maximum search depth
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Resolve `partial` to an absolute path below `root`.
    ///
    /// Absolute input is returned unchanged; its existence is not checked.
    ///
    /// # Errors
    /// * `ResolveError::EmptyPath` if `partial` has no segments.
    /// * `ResolveError::FileNotFound` if no suffix of `partial` exists below `root`.
    /// * `ResolveError::AmbiguousMatch` if a segment matches several entries.
    /// * `ResolveError::InvalidPattern` if a segment is not a valid glob.
    /// * `ResolveError::NotADirectory` if a segment matched a file but more
    ///   segments follow.
    /// * `ResolveError::Io` if a directory listing fails for a reason other
    ///   than missing permissions.
    pub fn resolve(&self, partial: &str, root: &Path) -> Result<PathBuf, ResolveError> {
        if partial.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let path = Path::new(partial);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        let segments = split_segments(path);
        if segments.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        for i in 0..segments.len() {
            let prefix: PathBuf = segments[..=i].iter().collect();
            if root.ends_with(&prefix) {
                debug!(prefix = %prefix.display(), "root already inside prefix, skipping");
                continue;
            }

            let suffix = &segments[i..];
            debug!(root = %root.display(), suffix = ?suffix, "searching suffix");
            let mut visited = Visited::new();
            if let Some(found) = self.find_file(root, suffix, 0, &mut visited)? {
                debug!(found = %found.display(), "resolved");
                return Ok(found);
            }
        }

        Err(ResolveError::FileNotFound {
            path: partial.to_string(),
            root: root.to_path_buf(),
        })
    }

    /// Depth-first search for `segments` starting at `dir`.
    ///
    /// Returns `Ok(None)` when the segments are not found anywhere below
    /// `dir`.
    ///
    /// # Errors
    /// See [`PathResolver::resolve`].
    pub fn find_file(
        &self,
        dir: &Path,
        segments: &[String],
        depth: usize,
        visited: &mut Visited,
    ) -> Result<Option<PathBuf>, ResolveError> {
        let Some((head, rest)) = segments.split_first() else {
            return Ok(None);
        };

        if depth > self.max_depth {
            warn!(dir = %dir.display(), max = self.max_depth, "search depth limit reached");
            return Ok(None);
        }
        if !visited.insert((self.lister.identity(dir), segments.len())) {
            trace!(dir = %dir.display(), "already searched");
            return Ok(None);
        }

        let pattern = Pattern::new(head).map_err(|e| ResolveError::InvalidPattern {
            pattern: head.clone(),
            reason: e.to_string(),
        })?;

        if let Some(exact) = self.lookup(dir, head) {
            return self.follow(&exact, rest, depth, visited);
        }

        let entries = match self.lister.list(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!(dir = %dir.display(), "skipping unreadable directory");
                return Ok(None);
            }
            Err(source) => {
                return Err(ResolveError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        };

        let matches: Vec<&Entry> = entries
            .iter()
            .filter(|e| pattern.matches_with(&e.name, MATCH_OPTIONS))
            .collect();

        match matches.as_slice() {
            [] => {}
            [only] => return self.follow(only, rest, depth, visited),
            many => {
                return Err(ResolveError::AmbiguousMatch {
                    segment: head.clone(),
                    candidates: many.iter().map(|e| e.path.clone()).collect(),
                });
            }
        }

        for entry in entries.iter().filter(|e| e.is_dir) {
            if let Some(found) = self.find_file(&entry.path, segments, depth + 1, visited)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// Entry named exactly `name` in `dir`; it wins over any glob reading
    fn lookup(&self, dir: &Path, name: &str) -> Option<Entry> {
        if name == ".." {
            return None;
        }
        match self.lister.lookup(dir, name) {
            Ok(entry) => entry,
            Err(e) => {
                trace!(dir = %dir.display(), name, error = %e, "lookup failed");
                None
            }
        }
    }

    /// Continue the search through the single entry matching a segment
    fn follow(
        &self,
        entry: &Entry,
        rest: &[String],
        depth: usize,
        visited: &mut Visited,
    ) -> Result<Option<PathBuf>, ResolveError> {
        if rest.is_empty() {
            return Ok(Some(entry.path.clone()));
        }
        if !entry.is_traversable() {
            return Err(ResolveError::NotADirectory {
                path: entry.path.clone(),
                remaining: rest.join("/"),
            });
        }
        trace!(dir = %entry.path.display(), "descending into match");
        self.find_file(&entry.path, rest, depth + 1, visited)
    }
}

/// Split a relative path into its named segments, dropping `.` and empty parts
fn split_segments(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
        })
        .collect()
}
