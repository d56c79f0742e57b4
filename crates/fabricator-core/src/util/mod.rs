//! Utility modules for path handling and source-tree access.
//!
//! # Modules
//!
//! - [`paths`]: Path helpers (tilde expansion, unit stems)
//! - [`tree`]: [`SourceTree`](crate::SourceTree) implementations

pub mod paths;
pub mod tree;
