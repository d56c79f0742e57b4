//! Path resolver and directory walker.

use std::path::Path;

use fabricator_core::{EntryKind, FabricateOptions, Loader, Result, SourceTree, unit_stem};
use tracing::debug;

use super::Fabricator;
use crate::{Fabricated, Skip};

impl<L: Loader, S: SourceTree> Fabricator<L, S> {
    /// Resolve a path entry.
    ///
    /// A source file, or any path when recursion is off, becomes a single
    /// unit named after its stem. Anything else is walked as a directory; a
    /// directory that does not exist yields nothing.
    pub(crate) fn resolve_path(
        &self,
        raw: &str,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        let path = options.resolve(raw);

        if self.loader.is_source(&path) || !options.recursive {
            let inferred = unit_stem(&path, self.loader.extension());
            return Ok(self
                .initialize_path(&path, &inferred, options, skipped)?
                .map(Fabricated::Unit)
                .into_iter()
                .collect());
        }

        if !self.tree.exists(&path) {
            debug!(path = %path.display(), "directory does not exist");
            skipped.push(Skip::MissingDirectory { path });
            return Ok(Vec::new());
        }

        self.walk_directory(&path, options, skipped)
    }

    /// Surface one unit per eligible entry of `dir`.
    ///
    /// Subdirectories count only through their index unit, which is named
    /// after the subdirectory rather than the index file.
    pub(crate) fn walk_directory(
        &self,
        dir: &Path,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        let ext = self.loader.extension();
        let mut units = Vec::new();

        for entry in self.tree.list(dir)? {
            let target = match self.tree.kind(&entry)? {
                EntryKind::Directory => {
                    let index = self.loader.index_file(&entry);
                    self.tree.is_file(&index).then_some(index)
                }
                EntryKind::File if self.loader.is_source(&entry) => Some(entry.clone()),
                _ => None,
            };

            let Some(target) = target else {
                debug!(path = %entry.display(), "skipping non-source entry");
                skipped.push(Skip::NotSource { path: entry });
                continue;
            };

            let inferred = unit_stem(&entry, ext);
            if let Some(unit) = self.initialize_path(&target, &inferred, options, skipped)? {
                units.push(Fabricated::Unit(unit));
            }
        }

        Ok(units)
    }
}
