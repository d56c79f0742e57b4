//! Shared types, traits, errors, and utilities for Fabricator.
//!
//! This crate provides the foundational types used across all Fabricator
//! crates. It has no internal Fabricator dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`name`]: Shared, writable name slots and name normalisation
//! - [`options`]: Options threaded through one fabrication call
//! - [`traits`]: Capability traits (constructibles, loaders, source trees, config)
//! - [`util`]: Path helpers and source-tree implementations

pub mod error;
pub mod name;
pub mod options;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use name::{NameSlot, lower_first};
pub use options::FabricateOptions;
pub use traits::{ConfigProvider, Constructible, EntryKind, Export, Loader, SourceTree};

// Convenience re-exports from util
pub use util::paths::{expand_tilde, unit_stem};
pub use util::tree::{LocalTree, MemoryTree};
