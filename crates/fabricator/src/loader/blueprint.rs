//! TOML blueprints: the constructible the CLI fabricates from disk.
//!
//! A blueprint file looks like:
//!
//! ```toml
//! [constructor]
//! ident = "StatusPage"   # the constructor's own identifier
//! name = ""              # declares a writable name slot (may be empty)
//!
//! [constructor.defaults] # copied into every instance
//! refresh = 30
//! ```
//!
//! A file without a `[constructor]` table is a plain table, not a
//! constructible, and is skipped by the resolver.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use fabricator_core::{Constructible, Error, Export, Loader, NameSlot, Result};
use serde::{Deserialize, Serialize};

/// A constructible described by a TOML file or built in memory.
///
/// Cloning is cheap and clones share the name slot.
#[derive(Debug, Clone)]
pub struct Blueprint {
    inner: Arc<BlueprintInner>,
}

#[derive(Debug)]
struct BlueprintInner {
    ident: String,
    origin: Option<PathBuf>,
    name: Option<NameSlot>,
    defaults: toml::Table,
}

impl Blueprint {
    /// A blueprint with identifier `ident` and no name slot.
    pub fn new(ident: impl Into<String>) -> Self {
        Self::build(ident.into(), None, None, toml::Table::new())
    }

    /// A blueprint with identifier `ident` declaring a name slot holding
    /// `declared` (empty means declared but unset).
    pub fn named(ident: impl Into<String>, declared: impl Into<String>) -> Self {
        Self::build(
            ident.into(),
            None,
            Some(NameSlot::new(declared)),
            toml::Table::new(),
        )
    }

    fn build(
        ident: String,
        origin: Option<PathBuf>,
        name: Option<NameSlot>,
        defaults: toml::Table,
    ) -> Self {
        Self {
            inner: Arc::new(BlueprintInner {
                ident,
                origin,
                name,
                defaults,
            }),
        }
    }

    /// File this blueprint was loaded from.
    pub fn origin(&self) -> Option<&Path> {
        self.inner.origin.as_deref()
    }

    /// Properties copied into every instance.
    pub fn defaults(&self) -> &toml::Table {
        &self.inner.defaults
    }

    /// The current canonical name, if the blueprint has a name slot.
    pub fn name(&self) -> Option<String> {
        self.inner.name.as_ref().map(NameSlot::get)
    }

    /// True if `other` is the same blueprint (not merely an equal one).
    pub fn same_as(&self, other: &Blueprint) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// An object built from a [`Blueprint`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instance {
    /// Canonical name of the blueprint, or its identifier when it has none.
    pub name: String,
    /// Identifier of the blueprint.
    pub ident: String,
    /// Properties, starting from the blueprint defaults.
    pub properties: toml::Table,
}

impl Constructible for Blueprint {
    type Instance = Instance;

    fn ident(&self) -> &str {
        &self.inner.ident
    }

    fn name_slot(&self) -> Option<&NameSlot> {
        self.inner.name.as_ref()
    }

    fn construct(&self) -> Result<Instance> {
        let name = self
            .declared_name()
            .unwrap_or_else(|| self.inner.ident.clone());
        Ok(Instance {
            name,
            ident: self.inner.ident.clone(),
            properties: self.inner.defaults.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct BlueprintFile {
    constructor: Option<ConstructorSection>,
}

#[derive(Debug, Deserialize)]
struct ConstructorSection {
    #[serde(default)]
    ident: String,
    name: Option<String>,
    #[serde(default)]
    defaults: toml::Table,
}

/// Loads [`Blueprint`]s from TOML files.
///
/// Loaded exports are cached per path, so every fabrication of the same
/// file sees (and may rename) the same blueprint.
#[derive(Debug)]
pub struct BlueprintLoader {
    extension: String,
    index_stem: String,
    cache: RwLock<HashMap<PathBuf, Export<Blueprint>>>,
}

impl Default for BlueprintLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BlueprintLoader {
    /// Default source extension.
    pub const DEFAULT_EXTENSION: &'static str = "toml";

    /// Default index stem.
    pub const DEFAULT_INDEX: &'static str = "index";

    /// A loader for `*.toml` files with `index.toml` directory units.
    pub fn new() -> Self {
        Self {
            extension: Self::DEFAULT_EXTENSION.to_string(),
            index_stem: Self::DEFAULT_INDEX.to_string(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Recognise `extension` (without the dot) instead.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use `stem` as the directory index unit instead.
    pub fn with_index_stem(mut self, stem: impl Into<String>) -> Self {
        self.index_stem = stem.into();
        self
    }

    /// Number of cached exports.
    pub fn cached(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn cache_key(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }

    fn parse(path: &Path, content: &str) -> Result<Export<Blueprint>> {
        let file: BlueprintFile =
            toml::from_str(content).map_err(|e| Error::load(path, e.to_string()))?;

        let Some(section) = file.constructor else {
            return Ok(Export::Opaque {
                kind: "table".to_string(),
            });
        };

        Ok(Export::Constructible(Blueprint::build(
            section.ident,
            Some(path.to_path_buf()),
            section.name.map(NameSlot::new),
            section.defaults,
        )))
    }
}

impl Loader for BlueprintLoader {
    type Unit = Blueprint;

    fn extension(&self) -> &str {
        &self.extension
    }

    fn index_stem(&self) -> &str {
        &self.index_stem
    }

    fn load(&self, path: &Path) -> Result<Export<Blueprint>> {
        let key = Self::cache_key(path);
        if let Some(hit) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(hit.clone());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::load(path, e.to_string()))?;
        let export = Self::parse(path, &content)?;
        tracing::debug!(path = %path.display(), "loaded blueprint");

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(key).or_insert(export).clone())
    }
}
