//! Fabrication input and its shape classification.
//!
//! A [`Stack`] is the heterogeneous description of "things to construct".
//! Its [`Shape`] selects the resolution strategy; the `Other` shape is the
//! only one the resolver refuses outright.

use std::fmt;
use std::path::Path;

/// Structural kind of a [`Stack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A path to a source file or directory.
    String,
    /// An ordered list of entries.
    Array,
    /// Named entries in insertion order.
    Mapping,
    /// A constructible value.
    Function,
    /// Anything else; carries the kind name.
    Other(String),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Array => f.write_str("array"),
            Self::Mapping => f.write_str("mapping"),
            Self::Function => f.write_str("function"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// What to fabricate.
#[derive(Debug, Clone)]
pub enum Stack<T> {
    /// File or directory path, possibly relative to the source root.
    Path(String),
    /// Entries resolved in order.
    List(Vec<Stack<T>>),
    /// Keyed entries resolved in order; keys become names.
    Map(Vec<(String, Stack<T>)>),
    /// An in-memory constructible.
    Unit(T),
    /// A value of an unsupported kind.
    Other {
        /// Kind name, e.g. `"number"`.
        kind: String,
        /// Rendered value, for diagnostics.
        repr: String,
    },
}

impl<T> Stack<T> {
    /// A path entry.
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_string_lossy().into_owned())
    }

    /// A list entry.
    pub fn list(items: impl IntoIterator<Item = Stack<T>>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// A mapping entry, preserving the order of `entries`.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Stack<T>)>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// A constructible entry.
    pub fn unit(value: T) -> Self {
        Self::Unit(value)
    }

    /// An unsupported value of the given kind.
    pub fn other(kind: impl Into<String>, repr: impl Into<String>) -> Self {
        Self::Other {
            kind: kind.into(),
            repr: repr.into(),
        }
    }

    /// Classify this stack.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Path(_) => Shape::String,
            Self::List(_) => Shape::Array,
            Self::Map(_) => Shape::Mapping,
            Self::Unit(_) => Shape::Function,
            Self::Other { kind, .. } => Shape::Other(kind.clone()),
        }
    }
}

impl<T> From<serde_json::Value> for Stack<T> {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(s) => Self::Path(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
            Value::Null => Self::other("null", "null"),
            Value::Bool(b) => Self::other("boolean", b.to_string()),
            Value::Number(n) => Self::other("number", n.to_string()),
        }
    }
}

impl<T> From<toml::Value> for Stack<T> {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Self::Path(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => Self::from(table),
            Value::Integer(i) => Self::other("number", i.to_string()),
            Value::Float(f) => Self::other("number", f.to_string()),
            Value::Boolean(b) => Self::other("boolean", b.to_string()),
            Value::Datetime(dt) => Self::other("datetime", dt.to_string()),
        }
    }
}

impl<T> From<toml::Table> for Stack<T> {
    fn from(table: toml::Table) -> Self {
        Self::Map(table.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
    }
}
