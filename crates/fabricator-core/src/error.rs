//! Error types for Fabricator operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Fabricator crates. Uses `thiserror` for derive macros.
//!
//! Two classes of failure exist during fabrication. Hard failures surface as
//! an [`Error`]; soft skips (a missing directory, a non-source entry, a value
//! without a constructible shape) never reach this type and are filtered out
//! of the result instead.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Fabricator operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A loader failed to produce a value for a source file.
    #[error("Failed to load {path}: {message}")]
    Load {
        /// Source file that failed to load.
        path: PathBuf,
        /// Loader-provided reason.
        message: String,
    },

    /// The top-level input has a shape the resolver cannot fabricate.
    #[error("Unsupported type, cannot fabricate an: {kind}")]
    UnsupportedType {
        /// Kind name of the rejected input (e.g. `"number"`).
        kind: String,
    },
}

impl Error {
    /// Wrap an I/O error.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a load error for `path`.
    pub fn load(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Load {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Create an unsupported input type error.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedType { kind: kind.into() }
    }

    /// True if this error reports something missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Io(e) | Self::IoWithPath { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// True if this error is an unsupported input type.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }

    /// True if this error came from a loader.
    pub fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. })
    }
}

/// Result type alias using Fabricator's Error type.
pub type Result<T> = std::result::Result<T, Error>;
