//! Fabrication results.

use std::path::PathBuf;

/// One element of a fabrication result.
#[derive(Debug, Clone)]
pub enum Fabricated<T> {
    /// An initialized, named constructible.
    Unit(T),
    /// The units produced by an array-valued input entry, kept together.
    Group(Vec<Fabricated<T>>),
}

impl<T> Fabricated<T> {
    /// The unit, if this element is one.
    pub fn as_unit(&self) -> Option<&T> {
        match self {
            Self::Unit(unit) => Some(unit),
            Self::Group(_) => None,
        }
    }

    /// The group members, if this element is a group.
    pub fn as_group(&self) -> Option<&[Fabricated<T>]> {
        match self {
            Self::Unit(_) => None,
            Self::Group(items) => Some(items),
        }
    }

    /// True if this element is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Every unit in this element, depth first.
    pub fn units(&self) -> Vec<&T> {
        match self {
            Self::Unit(unit) => vec![unit],
            Self::Group(items) => items.iter().flat_map(Fabricated::units).collect(),
        }
    }
}

/// Why an entry produced no unit.
///
/// Skips are soft: they never fail a fabrication, they only leave the entry
/// out of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// A path that should have been traversed does not exist.
    MissingDirectory {
        /// The missing path.
        path: PathBuf,
    },
    /// A directory entry that is neither a source file nor a directory with
    /// an index unit.
    NotSource {
        /// The ignored entry.
        path: PathBuf,
    },
    /// A source file whose export has no constructible shape.
    NotConstructible {
        /// The loaded file.
        path: PathBuf,
        /// What it exported instead.
        kind: String,
    },
}

impl Skip {
    /// The path the skip refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::MissingDirectory { path }
            | Self::NotSource { path }
            | Self::NotConstructible { path, .. } => path,
        }
    }
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDirectory { path } => {
                write!(f, "{}: directory does not exist", path.display())
            }
            Self::NotSource { path } => write!(f, "{}: not a source unit", path.display()),
            Self::NotConstructible { path, kind } => {
                write!(f, "{}: exports a {kind}, not a constructible", path.display())
            }
        }
    }
}

/// Units fabricated by one call together with everything that was skipped.
#[derive(Debug, Clone)]
pub struct Report<T> {
    /// The filtered result sequence.
    pub units: Vec<Fabricated<T>>,
    /// Skipped entries, in the order they were met.
    pub skipped: Vec<Skip>,
}
