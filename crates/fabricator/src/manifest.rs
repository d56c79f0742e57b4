//! Stack manifests: a [`Stack`] written down as JSON or TOML.
//!
//! Strings are paths, arrays stay arrays, objects/tables are mappings in
//! the order they were written. Any other scalar becomes an unsupported
//! entry and fails fabrication.

use std::path::Path;

use fabricator_core::{Error, Result};

use crate::Stack;

/// Read the manifest at `path`, choosing the format by extension
/// (`.json` or `.toml`).
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid for its
/// format, or has another extension.
pub fn read_manifest<T>(path: &Path) -> Result<Stack<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&content),
        Some("toml") => parse_toml(&content),
        _ => Err(Error::invalid_data(format!(
            "{}: manifest must be a .json or .toml file",
            path.display()
        ))),
    }
}

/// Parse a JSON manifest.
///
/// # Errors
///
/// Returns [`Error::Serialization`] for invalid JSON.
pub fn parse_json<T>(content: &str) -> Result<Stack<T>> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| Error::serialization(e.to_string()))?;
    Ok(Stack::from(value))
}

/// Parse a TOML manifest. The document itself is the top-level mapping.
///
/// # Errors
///
/// Returns [`Error::Serialization`] for invalid TOML.
pub fn parse_toml<T>(content: &str) -> Result<Stack<T>> {
    let table: toml::Table =
        toml::from_str(content).map_err(|e| Error::serialization(e.to_string()))?;
    Ok(Stack::from(table))
}
