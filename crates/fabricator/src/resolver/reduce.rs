//! Shape-preserving reducer for list and mapping stacks.

use std::path::Path;

use fabricator_core::{FabricateOptions, Loader, Result, SourceTree, unit_stem};

use super::Fabricator;
use crate::{Fabricated, Skip, Stack};

impl<L: Loader, S: SourceTree> Fabricator<L, S> {
    /// Resolve list entries in order. Entries inherit the forced name.
    pub(crate) fn reduce_list(
        &self,
        items: Vec<Stack<L::Unit>>,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let inferred = match &item {
                Stack::Path(raw) => unit_stem(Path::new(raw), self.loader.extension()),
                _ => String::new(),
            };
            self.reduce_entry(item, &inferred, options.forced_name(), options, skipped, &mut out)?;
        }
        Ok(out)
    }

    /// Resolve mapping entries in order. Each key is forced onto everything
    /// resolved beneath it.
    pub(crate) fn reduce_map(
        &self,
        entries: Vec<(String, Stack<L::Unit>)>,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        let mut out = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            self.reduce_entry(value, &key, Some(&key), options, skipped, &mut out)?;
        }
        Ok(out)
    }

    fn reduce_entry(
        &self,
        base: Stack<L::Unit>,
        inferred: &str,
        forced: Option<&str>,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
        out: &mut Vec<Fabricated<L::Unit>>,
    ) -> Result<()> {
        let scoped = options.forcing(forced);

        match base {
            Stack::Unit(unit) => {
                out.push(Fabricated::Unit(self.initialize_unit(unit, inferred, &scoped)));
            }
            Stack::Path(raw) if self.loader.is_source(Path::new(&raw)) => {
                let path = scoped.resolve(&raw);
                if let Some(unit) = self.initialize_path(&path, inferred, &scoped, skipped)? {
                    out.push(Fabricated::Unit(unit));
                }
            }
            // Arrays keep their shape: one nested group, never merged.
            list @ Stack::List(_) => {
                out.push(Fabricated::Group(self.dispatch(list, &scoped, skipped)?));
            }
            other => out.extend(self.dispatch(other, &scoped, skipped)?),
        }

        Ok(())
    }
}
