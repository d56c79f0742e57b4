//! Configuration for the `fabricator` CLI.
//!
//! Provides the [`FabricatorConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FABRICATOR_CONFIG` environment variable
//! 3. XDG default: `~/.config/fabricator/config.toml`
//! 4. Built-in defaults
//!
//! `FABRICATOR_RESOLVER_*` and `FABRICATOR_OUTPUT_*` variables overlay the
//! loaded file.

use confyg::{Confygery, env};
use fabricator_core::{ConfigProvider, Error, Result, expand_tilde};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "FABRICATOR";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FabricatorConfig {
    /// Project name, used in output headers.
    pub project_name: String,

    /// Resolver defaults.
    pub resolver: ResolverConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Defaults applied to every `resolve` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Directory relative stack paths are resolved against.
    pub source: Option<String>,

    /// Whether directories are walked.
    pub recursive: bool,

    /// Extension of blueprint source files, without the dot.
    pub extension: String,

    /// Stem of the file that stands for its directory.
    pub index: String,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,
}

/// How `resolve` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree.
    #[default]
    Text,
    /// JSON document.
    Json,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for FabricatorConfig {
    fn default() -> Self {
        Self {
            project_name: "fabricator".to_string(),
            resolver: ResolverConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source: None,
            recursive: true,
            extension: fabricator::BlueprintLoader::DEFAULT_EXTENSION.to_string(),
            index: fabricator::BlueprintLoader::DEFAULT_INDEX.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FabricatorConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is not an error; defaults apply.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path)
            && path.exists()
        {
            builder
                .add_file(&path.to_string_lossy())
                .map_err(|e| Error::config(format!("config file: {e}")))?;
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("resolver");
        env_opts.add_section("output");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("FABRICATOR_CONFIG") {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fabricator").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into `FABRICATOR_`-prefixed environment variables.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for FabricatorConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn source_root(&self) -> Result<Option<PathBuf>> {
        Ok(self.resolver.source.as_deref().map(expand_tilde))
    }

    fn recursive(&self) -> bool {
        self.resolver.recursive
    }

    fn source_extension(&self) -> &str {
        &self.resolver.extension
    }

    fn index_stem(&self) -> &str {
        &self.resolver.index
    }
}

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{prefix}_{}", key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
