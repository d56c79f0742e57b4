//! [`Loader`](fabricator_core::Loader) implementations.

mod blueprint;
mod registry;

pub use blueprint::{Blueprint, BlueprintLoader, Instance};
pub use registry::Registry;
