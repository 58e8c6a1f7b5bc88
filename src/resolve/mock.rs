//! In-memory directory tree for testing the resolver
//!
//! Listings are returned in insertion order, so tests can pin the order the
//! search visits siblings. Directories can be marked unreadable (or
//! traversable but not listable) to simulate permission errors regardless of
//! the user running the tests.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::lister::{DirLister, Entry};

/// Mock directory tree with absolute paths
#[derive(Debug, Clone, Default)]
pub struct MockTree {
    listings: BTreeMap<PathBuf, Vec<Entry>>,
    denied: BTreeSet<PathBuf>,
    unlistable: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

impl MockTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating any missing parent directories
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), false);
        self
    }

    /// Add an empty directory, creating any missing parents
    #[must_use]
    pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
        self.insert(path.as_ref(), true);
        self
    }

    /// Make listing `path` fail with `PermissionDenied`
    #[must_use]
    pub fn deny(mut self, path: impl AsRef<Path>) -> Self {
        self.denied.insert(path.as_ref().to_path_buf());
        self
    }

    /// Make listing `path` fail with `PermissionDenied` while lookups of its
    /// children still succeed, like a directory with mode `--x`
    #[must_use]
    pub fn execute_only(mut self, path: impl AsRef<Path>) -> Self {
        self.unlistable.insert(path.as_ref().to_path_buf());
        self
    }

    /// Make listing `path` fail with a generic I/O error
    #[must_use]
    pub fn fail(mut self, path: impl AsRef<Path>) -> Self {
        self.failing.insert(path.as_ref().to_path_buf());
        self
    }

    fn insert(&mut self, path: &Path, is_dir: bool) {
        if is_dir {
            self.listings.entry(path.to_path_buf()).or_default();
        }
        let Some(parent) = path.parent() else {
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.listings.contains_key(parent) {
            self.insert(parent, true);
        }
        let children = self.listings.entry(parent.to_path_buf()).or_default();
        if !children.iter().any(|e| e.name == name) {
            children.push(Entry {
                name,
                path: path.to_path_buf(),
                is_dir,
                links_to_dir: false,
            });
        }
    }
}

fn permission_denied(dir: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", dir.display()),
    )
}

impl DirLister for MockTree {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        if self.denied.contains(dir) || self.unlistable.contains(dir) {
            return Err(permission_denied(dir));
        }
        if self.failing.contains(dir) {
            return Err(io::Error::other(format!("device error: {}", dir.display())));
        }
        self.listings.get(dir).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", dir.display()),
            )
        })
    }

    fn lookup(&self, dir: &Path, name: &str) -> io::Result<Option<Entry>> {
        if self.denied.contains(dir) {
            return Err(permission_denied(dir));
        }
        Ok(self
            .listings
            .get(dir)
            .and_then(|children| children.iter().find(|e| e.name == name))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let tree = MockTree::new().dir("/r/zeta").dir("/r/alpha").file("/r/mid.txt");
        let names: Vec<_> = tree
            .list(Path::new("/r"))
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid.txt"]);
    }

    #[test]
    fn test_parents_created() {
        let tree = MockTree::new().file("/r/a/b/c.rs");
        let listing = tree.list(Path::new("/r/a")).unwrap();
        assert_eq!(listing.len(), 1);
        assert!(listing[0].is_dir);
        assert_eq!(listing[0].path, PathBuf::from("/r/a/b"));
    }

    #[test]
    fn test_denied_and_failing() {
        let tree = MockTree::new().dir("/r/locked").deny("/r/locked").dir("/r/bad").fail("/r/bad");
        assert_eq!(
            tree.list(Path::new("/r/locked")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
        assert_eq!(tree.list(Path::new("/r/bad")).unwrap_err().kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_execute_only_allows_lookup() {
        let tree = MockTree::new().file("/r/bin/run.sh").execute_only("/r/bin");
        assert_eq!(
            tree.list(Path::new("/r/bin")).unwrap_err().kind(),
            io::ErrorKind::PermissionDenied
        );
        let entry = tree.lookup(Path::new("/r/bin"), "run.sh").unwrap().unwrap();
        assert_eq!(entry.path, PathBuf::from("/r/bin/run.sh"));
        assert!(tree.lookup(Path::new("/r/bin"), "other.sh").unwrap().is_none());

        let denied = MockTree::new().dir("/r/locked").deny("/r/locked");
        assert!(denied.lookup(Path::new("/r/locked"), "x").is_err());
    }
}
