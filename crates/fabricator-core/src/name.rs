//! Name slots and canonical-name normalisation.
//!
//! A [`NameSlot`] is the writable `name` field a constructible may declare on
//! its instance contract. Fabrication writes the canonical name into it, and
//! because every clone of a constructible shares the same slot, the write is
//! visible to anyone else holding that constructible.

use std::sync::{PoisonError, RwLock};

/// Shared, interior-mutable name field of a constructible.
///
/// The slot is deliberately not `Clone`: constructibles that want clones to
/// observe the same name keep the slot behind an `Arc`.
#[derive(Debug, Default)]
pub struct NameSlot {
    value: RwLock<String>,
}

impl NameSlot {
    /// Create a slot holding `initial` (may be empty).
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(initial.into()),
        }
    }

    /// Current value of the slot.
    pub fn get(&self) -> String {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the value of the slot.
    pub fn set(&self, name: impl Into<String>) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = name.into();
    }

    /// The current value, if non-empty.
    pub fn declared(&self) -> Option<String> {
        let value = self.get();
        (!value.is_empty()).then_some(value)
    }
}

/// Lower-case the first character of `name`, leaving the rest untouched.
///
/// ```
/// use fabricator_core::lower_first;
///
/// assert_eq!(lower_first("Status"), "status");
/// assert_eq!(lower_first("HTTPServer"), "hTTPServer");
/// assert_eq!(lower_first(""), "");
/// ```
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
