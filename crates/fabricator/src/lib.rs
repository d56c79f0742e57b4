//! Resolve heterogeneous stacks into named constructibles.
//!
//! A stack is a path to a source file, a directory of them, a list or a
//! mapping of further stacks, or a constructible value itself. The
//! [`Fabricator`] turns any of these into a flat sequence of named units,
//! keeping array-valued entries together as nested groups.
//!
//! # Modules
//!
//! - [`stack`]: Input shapes and classification
//! - [`resolver`]: The resolver ([`Fabricator`]) and naming rules
//! - [`outcome`]: Result elements, skips, and reports
//! - [`loader`]: In-memory and TOML blueprint loaders
//! - [`manifest`]: Reading stacks from JSON/TOML files
//!
//! # Example
//!
//! ```
//! use fabricator::{Blueprint, Fabricator, Registry, Stack};
//! use fabricator_core::{FabricateOptions, MemoryTree};
//!
//! let fabricator = Fabricator::with_tree(Registry::new("toml"), MemoryTree::new());
//! let handler = Blueprint::named("Handler", "");
//!
//! let units = fabricator
//!     .fabricate(
//!         Stack::map([("status", Stack::unit(handler.clone()))]),
//!         &FabricateOptions::new(),
//!     )
//!     .unwrap();
//!
//! assert_eq!(units.len(), 1);
//! assert_eq!(handler.name().as_deref(), Some("status"));
//! ```

pub mod loader;
pub mod manifest;
pub mod outcome;
pub mod resolver;
pub mod stack;

pub use loader::{Blueprint, BlueprintLoader, Instance, Registry};
pub use manifest::read_manifest;
pub use outcome::{Fabricated, Report, Skip};
pub use resolver::{Fabricator, canonical_name};
pub use stack::{Shape, Stack};
