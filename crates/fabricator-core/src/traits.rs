//! Core traits for Fabricator.
//!
//! These traits are the seams the resolver is built around:
//!
//! - [`Constructible`]: the capability a value needs to become a unit
//! - [`Loader`]: turns a source file path into an exported value
//! - [`SourceTree`]: answers existence, kind, and listing questions about paths
//! - [`ConfigProvider`]: supplies fabrication defaults from configuration

use std::path::{Path, PathBuf};

use crate::{FabricateOptions, NameSlot, Result};

/// A value that can be fabricated into a named unit.
///
/// Implementors expose their own identifier, optionally a writable
/// [`NameSlot`], and a way to build instances. Clones must share the name
/// slot (keep it behind an `Arc`), otherwise the canonical name written
/// during fabrication is lost on the clone that is returned.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use fabricator_core::{Constructible, NameSlot, Result};
///
/// #[derive(Clone)]
/// struct Handler {
///     ident: &'static str,
///     name: Arc<NameSlot>,
/// }
///
/// impl Constructible for Handler {
///     type Instance = String;
///
///     fn ident(&self) -> &str {
///         self.ident
///     }
///
///     fn name_slot(&self) -> Option<&NameSlot> {
///         Some(&self.name)
///     }
///
///     fn construct(&self) -> Result<String> {
///         Ok(format!("{} instance", self.name.get()))
///     }
/// }
///
/// let handler = Handler { ident: "Status", name: Arc::new(NameSlot::default()) };
/// assert!(handler.declared_name().is_none());
/// ```
pub trait Constructible: Clone + Send + Sync + 'static {
    /// What [`construct`](Constructible::construct) produces.
    type Instance;

    /// The constructor's own identifier, used when no other name applies.
    fn ident(&self) -> &str;

    /// The writable `name` field, if the instance contract declares one.
    ///
    /// Constructibles returning `None` are still fabricated, but their
    /// canonical name is not recorded anywhere.
    fn name_slot(&self) -> Option<&NameSlot>;

    /// Build a new instance.
    fn construct(&self) -> Result<Self::Instance>;

    /// The non-empty name currently declared in the name slot.
    fn declared_name(&self) -> Option<String> {
        self.name_slot().and_then(NameSlot::declared)
    }
}

/// What a [`Loader`] found in a source file.
#[derive(Debug, Clone)]
pub enum Export<T> {
    /// The file exports a constructible value.
    Constructible(T),
    /// The file exports something without a constructible shape.
    Opaque {
        /// Short description of what was exported instead.
        kind: String,
    },
}

impl<T> Export<T> {
    /// The constructible, if there is one.
    pub fn into_constructible(self) -> Option<T> {
        match self {
            Self::Constructible(value) => Some(value),
            Self::Opaque { .. } => None,
        }
    }
}

/// Loads the value exported by a source file.
///
/// A loader recognises exactly one source extension and one index stem;
/// the resolver uses them to decide which directory entries are units and
/// which file stands in for a whole directory.
///
/// Loaders may cache: returning the same shared value for repeated loads of
/// one path makes name write-back observable across fabrication calls.
pub trait Loader: Send + Sync {
    /// The constructible type this loader produces.
    type Unit: Constructible;

    /// Source file extension, without the dot (e.g. `"toml"`).
    fn extension(&self) -> &str;

    /// File stem of the unit representing a directory.
    fn index_stem(&self) -> &str {
        "index"
    }

    /// Load the value exported by `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Load`](crate::Error::Load) when the file cannot be
    /// read or parsed. These errors are never swallowed by the resolver.
    fn load(&self, path: &Path) -> Result<Export<Self::Unit>>;

    /// True if `path` carries this loader's source extension.
    fn is_source(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.extension())
    }

    /// Path of the index unit inside `dir`.
    fn index_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.index_stem(), self.extension()))
    }
}

/// Kind of a path as seen by a [`SourceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory.
    Directory,
    /// A regular file.
    File,
    /// Anything else that exists (sockets, devices). Paths that cannot be
    /// inspected, such as dangling links, make [`SourceTree::kind`] fail.
    Other,
}

/// Read-only view of the tree the resolver walks.
pub trait SourceTree: Send + Sync {
    /// True if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// The kind of an existing path.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be inspected.
    fn kind(&self, path: &Path) -> Result<EntryKind>;

    /// Full paths of the entries of directory `dir`, in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be listed.
    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// True if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.kind(path), Ok(EntryKind::Directory))
    }

    /// True if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool {
        matches!(self.kind(path), Ok(EntryKind::File))
    }
}

/// Trait for application configuration consumed by Fabricator front ends.
///
/// Supplies the defaults a fabrication call starts from: where relative
/// paths are rooted, whether directories are traversed, and which source
/// extension and index stem a loader should recognise.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, reported alongside resolution results.
    fn project_name(&self) -> &str;

    /// Root directory relative stack paths are resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured root cannot be determined.
    fn source_root(&self) -> Result<Option<PathBuf>>;

    /// Whether directories are traversed by default.
    fn recursive(&self) -> bool {
        true
    }

    /// Source extension loaders should recognise.
    fn source_extension(&self) -> &str;

    /// Index stem loaders should recognise.
    fn index_stem(&self) -> &str {
        "index"
    }

    /// Default options for a fabrication call.
    fn fabricate_options(&self) -> Result<FabricateOptions> {
        Ok(FabricateOptions {
            source: self.source_root()?,
            recursive: self.recursive(),
            name: None,
        })
    }
}
