//! Options for a single fabrication call.
//!
//! Options are immutable. Whenever the resolver needs a different forced
//! name for a sub-resolution it derives a new value with
//! [`FabricateOptions::forcing`] and passes that down, so nothing leaks
//! between sibling entries or between top-level calls.

use std::path::{Path, PathBuf};

use crate::util::paths::expand_tilde;

/// Options controlling how a stack is fabricated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricateOptions {
    /// Root that relative paths are resolved against.
    pub source: Option<PathBuf>,
    /// Traverse directories. When `false` a directory path is loaded as a
    /// single unit (its index file).
    pub recursive: bool,
    /// Name forced onto every unit produced by this call.
    pub name: Option<String>,
}

impl Default for FabricateOptions {
    fn default() -> Self {
        Self {
            source: None,
            recursive: true,
            name: None,
        }
    }
}

impl FabricateOptions {
    /// Create default options (no source, recursive, no forced name).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `source`.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Enable or disable directory traversal.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Force `name` onto every produced unit.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The forced name, ignoring an empty one.
    pub fn forced_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Derive options for a sub-resolution that forces `name` instead.
    pub fn forcing(&self, name: Option<&str>) -> Self {
        Self {
            source: self.source.clone(),
            recursive: self.recursive,
            name: name.map(str::to_string),
        }
    }

    /// Resolve `path` against the configured source root.
    ///
    /// An absolute `path` is returned as is; a leading `~` is expanded in
    /// both the root and the path.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = expand_tilde(path);
        match &self.source {
            Some(source) => expand_tilde(source).join(path),
            None => path,
        }
    }
}
