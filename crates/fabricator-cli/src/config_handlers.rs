//! Handlers for `fabricator config {path,get,set,init,export}`.
//!
//! Each handler returns the text to print so the dispatcher owns stdout.

use crate::cli::ConfigAction;
use crate::config::FabricatorConfig;
use fabricator_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Handle a config subcommand.
///
/// Takes the raw `--config` path rather than a loaded config: `path` and
/// `init` must work before any file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Path => config_path_command(config_path),
        ConfigAction::Get { key } => {
            let config = FabricatorConfig::load(config_path)?;
            config_get(&config, &key)
        }
        ConfigAction::Set { key, value } => {
            let path = target_path(config_path)?;
            config_set(&path, &key, &value)
        }
        ConfigAction::Init { file, force } => {
            let path = match file {
                Some(p) => PathBuf::from(p),
                None => FabricatorConfig::default_config_path()
                    .ok_or_else(|| Error::config("Could not determine config directory"))?,
            };
            config_init(&path, force)
        }
        ConfigAction::Export { docker_env } => {
            let config = FabricatorConfig::load(config_path)?;
            config_export(&config, docker_env)
        }
    }
}

fn target_path(config_path: Option<&str>) -> Result<PathBuf> {
    FabricatorConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))
}

fn config_path_command(config_path: Option<&str>) -> Result<String> {
    let path = target_path(config_path)?;
    let mut out = path.display().to_string();
    if !path.exists() {
        out.push_str("\n(file does not exist; run `fabricator config init` to create it)");
    }
    Ok(out)
}

fn config_get(config: &FabricatorConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&value, key)
        .map(display_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

fn config_set(path: &Path, key: &str, raw: &str) -> Result<String> {
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `fabricator config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    assign(&mut doc, key, infer_value(raw))?;

    // Reject edits the loader would not accept.
    let text = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<FabricatorConfig>(&text)
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))?;
    Ok(format!("Set {key} = {raw} in {}", path.display()))
}

fn config_init(path: &Path, force: bool) -> Result<String> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    let text = FabricatorConfig::default().to_toml_string()?;
    std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))?;
    Ok(format!("Config file created at {}", path.display()))
}

fn config_export(config: &FabricatorConfig, docker_env: bool) -> Result<String> {
    let prefix = if docker_env { "--env " } else { "" };
    let lines: Vec<String> = config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{prefix}{key}={value}"))
        .collect();
    Ok(lines.join("\n"))
}

// ============================================================================
// Dotted keys
// ============================================================================

fn lookup<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

fn assign(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };

    let mut current = root;
    for part in parents {
        current = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot descend into '{part}'")))?
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
    }
    current
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{last}' on a non-table value")))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Booleans, then integers, then floats; anything else is a string.
fn infer_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = raw.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(raw.to_string())
    }
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}
