//! Loadable initializer: load, validate, name.

use std::path::Path;

use fabricator_core::{
    Constructible, Export, FabricateOptions, Loader, Result, SourceTree, lower_first,
};
use tracing::debug;

use super::Fabricator;
use crate::Skip;

/// Canonical name of `unit` under `options`.
///
/// Precedence: forced name, then the unit's declared name, then `inferred`,
/// then the unit's own identifier. The first character of the winner is
/// lower-cased.
///
/// ```
/// use fabricator::{Blueprint, canonical_name};
/// use fabricator_core::FabricateOptions;
///
/// let unit = Blueprint::named("Status", "");
/// let opts = FabricateOptions::new();
/// assert_eq!(canonical_name(&unit, "Health", &opts), "health");
/// assert_eq!(canonical_name(&unit, "", &opts), "status");
/// assert_eq!(canonical_name(&unit, "Health", &opts.with_name("Probe")), "probe");
/// ```
pub fn canonical_name<T: Constructible>(
    unit: &T,
    inferred: &str,
    options: &FabricateOptions,
) -> String {
    let winner = match options.forced_name() {
        Some(forced) => forced.to_string(),
        None => unit
            .declared_name()
            .or_else(|| (!inferred.is_empty()).then(|| inferred.to_string()))
            .unwrap_or_else(|| unit.ident().to_string()),
    };
    lower_first(&winner)
}

impl<L: Loader, S: SourceTree> Fabricator<L, S> {
    /// Name an in-memory constructible and hand it back.
    pub(crate) fn initialize_unit(
        &self,
        unit: L::Unit,
        inferred: &str,
        options: &FabricateOptions,
    ) -> L::Unit {
        let name = canonical_name(&unit, inferred, options);
        match unit.name_slot() {
            Some(slot) => {
                debug!(ident = unit.ident(), name = %name, "assigned canonical name");
                slot.set(name);
            }
            None => debug!(ident = unit.ident(), "no name slot, leaving unnamed"),
        }
        unit
    }

    /// Load the unit at `path` and name it.
    ///
    /// A directory path stands for its index unit. Loader errors propagate;
    /// a non-constructible export is recorded as a skip.
    pub(crate) fn initialize_path(
        &self,
        path: &Path,
        inferred: &str,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Option<L::Unit>> {
        let target = if self.tree.is_dir(path) {
            self.loader.index_file(path)
        } else {
            path.to_path_buf()
        };

        match self.loader.load(&target)? {
            Export::Constructible(unit) => Ok(Some(self.initialize_unit(unit, inferred, options))),
            Export::Opaque { kind } => {
                debug!(path = %target.display(), kind = %kind, "export is not constructible");
                skipped.push(Skip::NotConstructible { path: target, kind });
                Ok(None)
            }
        }
    }
}
