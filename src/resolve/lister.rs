//! Directory listing backends for the resolver

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name of the entry (lossy UTF-8)
    pub name: String,
    /// Full path of the entry
    pub path: PathBuf,
    /// A real directory (symbolic links are not counted)
    pub is_dir: bool,
    /// A symbolic link whose target is a directory
    pub links_to_dir: bool,
}

impl Entry {
    /// Whether a direct match on this entry can be descended into
    #[must_use]
    pub const fn is_traversable(&self) -> bool {
        self.is_dir || self.links_to_dir
    }
}

/// Source of directory listings
///
/// The resolver only ever lists directories, so this is the whole seam
/// between the search algorithm and the filesystem.
pub trait DirLister {
    /// List the children of `dir` in a deterministic order.
    ///
    /// # Errors
    /// Returns the underlying `io::Error`. `PermissionDenied` is treated by
    /// the resolver as an empty subtree, anything else is fatal.
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>>;

    /// Look up the child of `dir` called exactly `name`, without listing.
    ///
    /// This succeeds in directories that can be traversed but not read.
    ///
    /// # Errors
    /// Returns the underlying `io::Error`. A missing entry is `Ok(None)`.
    fn lookup(&self, dir: &Path, name: &str) -> io::Result<Option<Entry>> {
        Ok(self.list(dir)?.into_iter().find(|e| e.name == name))
    }

    /// Identity used to detect revisiting the same directory through links
    fn identity(&self, dir: &Path) -> PathBuf {
        dir.to_path_buf()
    }
}

/// Lists the real filesystem, sorted by file name
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLister;

impl DirLister for OsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();
            let links_to_dir = file_type.is_symlink() && path.is_dir();
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir: file_type.is_dir(),
                links_to_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn lookup(&self, dir: &Path, name: &str) -> io::Result<Option<Entry>> {
        let path = dir.join(name);
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let links_to_dir = meta.file_type().is_symlink() && path.is_dir();
        Ok(Some(Entry {
            name: name.to_string(),
            is_dir: meta.is_dir(),
            links_to_dir,
            path,
        }))
    }

    fn identity(&self, dir: &Path) -> PathBuf {
        fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
    }
}
