//! In-memory loader.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use fabricator_core::{Constructible, Error, Export, Loader, Result};

#[derive(Debug, Clone)]
enum Entry<T> {
    Export(Export<T>),
    Broken(String),
}

/// A [`Loader`] backed by a fixed table of paths.
///
/// Every load of a path returns a clone of the same registered value, which
/// behaves like a module cache: a name written during one fabrication is
/// seen by the next. Pair it with a
/// [`MemoryTree`](fabricator_core::MemoryTree) to exercise resolution
/// without touching disk.
///
/// ```
/// use fabricator::{Blueprint, Registry};
/// use fabricator_core::Loader;
/// use std::path::Path;
///
/// let registry = Registry::new("toml")
///     .with_constructible("/units/status.toml", Blueprint::named("Status", ""));
/// assert!(registry.is_source(Path::new("/units/status.toml")));
/// ```
#[derive(Debug)]
pub struct Registry<T> {
    extension: String,
    index_stem: String,
    entries: HashMap<PathBuf, Entry<T>>,
    loads: AtomicUsize,
}

impl<T: Constructible> Registry<T> {
    /// An empty registry recognising `extension`.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            index_stem: "index".to_string(),
            entries: HashMap::new(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Use `stem` as the directory index unit.
    pub fn with_index_stem(mut self, stem: impl Into<String>) -> Self {
        self.index_stem = stem.into();
        self
    }

    /// Register a constructible export for `path`.
    pub fn with_constructible(mut self, path: impl Into<PathBuf>, value: T) -> Self {
        self.entries
            .insert(path.into(), Entry::Export(Export::Constructible(value)));
        self
    }

    /// Register a non-constructible export of the given kind for `path`.
    pub fn with_opaque(mut self, path: impl Into<PathBuf>, kind: impl Into<String>) -> Self {
        self.entries.insert(
            path.into(),
            Entry::Export(Export::Opaque { kind: kind.into() }),
        );
        self
    }

    /// Make loading `path` fail with `message`.
    pub fn with_broken(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.entries
            .insert(path.into(), Entry::Broken(message.into()));
        self
    }

    /// Number of loads performed so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl<T: Constructible> Loader for Registry<T> {
    type Unit = T;

    fn extension(&self) -> &str {
        &self.extension
    }

    fn index_stem(&self) -> &str {
        &self.index_stem
    }

    fn load(&self, path: &Path) -> Result<Export<T>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        match self.entries.get(path) {
            Some(Entry::Export(export)) => Ok(export.clone()),
            Some(Entry::Broken(message)) => Err(Error::load(path, message.clone())),
            None => Err(Error::load(path, "no module registered at this path")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Blueprint;

    #[test]
    fn test_registry_returns_shared_value() {
        let registry =
            Registry::new("toml").with_constructible("/u/a.toml", Blueprint::named("A", ""));

        let first = registry
            .load(Path::new("/u/a.toml"))
            .unwrap()
            .into_constructible()
            .unwrap();
        let second = registry
            .load(Path::new("/u/a.toml"))
            .unwrap()
            .into_constructible()
            .unwrap();
        assert!(first.same_as(&second));
        assert_eq!(registry.load_count(), 2);
    }

    #[test]
    fn test_registry_missing_and_broken() {
        let registry: Registry<Blueprint> =
            Registry::new("toml").with_broken("/u/bad.toml", "unexpected token");

        let err = registry.load(Path::new("/u/bad.toml")).unwrap_err();
        assert!(err.to_string().contains("unexpected token"));
        assert!(registry.load(Path::new("/u/none.toml")).unwrap_err().is_load());
    }

    #[test]
    fn test_registry_opaque() {
        let registry: Registry<Blueprint> = Registry::new("toml").with_opaque("/u/v.toml", "number");
        assert!(
            registry
                .load(Path::new("/u/v.toml"))
                .unwrap()
                .into_constructible()
                .is_none()
        );
    }
}
