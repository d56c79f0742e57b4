//! [`SourceTree`] implementations.
//!
//! - [`LocalTree`]: the real filesystem, via blocking `std::fs` calls
//! - [`MemoryTree`]: an in-memory tree for tests and embedding

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{EntryKind, Error, Result, SourceTree};

/// The local filesystem.
///
/// Entries are listed sorted by path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTree;

impl SourceTree for LocalTree {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        let meta = fs::metadata(path).map_err(|e| Error::io_with_path(e, path))?;
        Ok(if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io_with_path(e, dir))? {
            let entry = entry.map_err(|e| Error::io_with_path(e, dir))?;
            paths.push(entry.path());
        }
        paths.sort();
        log::trace!("listed {} entries in {}", paths.len(), dir.display());
        Ok(paths)
    }
}

/// An in-memory source tree.
///
/// Entries are listed in lexicographic path order. Every query is counted,
/// which lets tests assert that a call never touched the tree.
///
/// ```
/// use std::path::Path;
/// use fabricator_core::{MemoryTree, SourceTree};
///
/// let tree = MemoryTree::new()
///     .with_file("/units/status.toml")
///     .with_dir("/units/empty");
///
/// assert!(tree.is_dir(Path::new("/units")));
/// assert_eq!(tree.list(Path::new("/units")).unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTree {
    entries: BTreeMap<PathBuf, EntryKind>,
    accesses: AtomicUsize,
}

impl MemoryTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path.into(), EntryKind::File)
    }

    /// Add a directory, creating its parents.
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path.into(), EntryKind::Directory)
    }

    /// Add an entry that is neither a file nor a directory.
    pub fn with_other(self, path: impl Into<PathBuf>) -> Self {
        self.with_entry(path.into(), EntryKind::Other)
    }

    /// Number of queries made against this tree so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::Relaxed)
    }

    fn with_entry(mut self, path: PathBuf, kind: EntryKind) -> Self {
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.entries
                .entry(ancestor.to_path_buf())
                .or_insert(EntryKind::Directory);
        }
        self.entries.insert(path, kind);
        self
    }

    fn touch(&self) {
        self.accesses.fetch_add(1, Ordering::Relaxed);
    }

    fn missing(path: &Path) -> Error {
        Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such entry"),
            path,
        )
    }
}

impl SourceTree for MemoryTree {
    fn exists(&self, path: &Path) -> bool {
        self.touch();
        self.entries.contains_key(path)
    }

    fn kind(&self, path: &Path) -> Result<EntryKind> {
        self.touch();
        self.entries
            .get(path)
            .copied()
            .ok_or_else(|| Self::missing(path))
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.touch();
        match self.entries.get(dir) {
            Some(EntryKind::Directory) => Ok(self
                .entries
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned()
                .collect()),
            Some(_) => Err(Error::invalid_data(format!(
                "{} is not a directory",
                dir.display()
            ))),
            None => Err(Self::missing(dir)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_tree_kinds() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("status.toml");
        fs::write(&file, "").unwrap();

        let tree = LocalTree;
        assert!(tree.exists(&file));
        assert_eq!(tree.kind(&file).unwrap(), EntryKind::File);
        assert_eq!(tree.kind(temp.path()).unwrap(), EntryKind::Directory);
        assert!(tree.is_dir(temp.path()));
        assert!(tree.is_file(&file));
    }

    #[test]
    fn test_local_tree_list() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.toml"), "").unwrap();
        fs::write(temp.path().join("two.log"), "").unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();

        let listed = LocalTree.list(temp.path()).unwrap();
        assert_eq!(
            listed,
            vec![
                temp.path().join("nested"),
                temp.path().join("one.toml"),
                temp.path().join("two.log"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_local_tree_dangling_link_fails_kind() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.toml"), "").unwrap();
        let link = temp.path().join("link");
        std::os::unix::fs::symlink(temp.path().join("gone"), &link).unwrap();

        assert_eq!(LocalTree.list(temp.path()).unwrap().len(), 2);
        let err = LocalTree.kind(&link).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_local_tree_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(!LocalTree.exists(&missing));
        let err = LocalTree.kind(&missing).unwrap_err();
        assert!(err.is_not_found());
        assert!(LocalTree.list(&missing).is_err());
    }

    #[test]
    fn test_memory_tree_creates_parents() {
        let tree = MemoryTree::new().with_file("/a/b/c.toml");
        assert_eq!(tree.kind(Path::new("/a")).unwrap(), EntryKind::Directory);
        assert_eq!(tree.kind(Path::new("/a/b")).unwrap(), EntryKind::Directory);
        assert_eq!(tree.kind(Path::new("/a/b/c.toml")).unwrap(), EntryKind::File);
    }

    #[test]
    fn test_memory_tree_lists_direct_children_sorted() {
        let tree = MemoryTree::new()
            .with_file("/units/b.toml")
            .with_file("/units/a.toml")
            .with_file("/units/nested/index.toml");

        let listed = tree.list(Path::new("/units")).unwrap();
        assert_eq!(
            listed,
            vec![
                PathBuf::from("/units/a.toml"),
                PathBuf::from("/units/b.toml"),
                PathBuf::from("/units/nested"),
            ]
        );
    }

    #[test]
    fn test_memory_tree_list_file_is_error() {
        let tree = MemoryTree::new().with_file("/units/a.toml");
        assert!(tree.list(Path::new("/units/a.toml")).is_err());
        assert!(tree.list(Path::new("/nowhere")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_memory_tree_counts_accesses() {
        let tree = MemoryTree::new().with_other("/units/socket");
        assert_eq!(tree.access_count(), 0);
        assert_eq!(tree.kind(Path::new("/units/socket")).unwrap(), EntryKind::Other);
        assert!(tree.exists(Path::new("/units")));
        assert_eq!(tree.access_count(), 2);
    }
}
