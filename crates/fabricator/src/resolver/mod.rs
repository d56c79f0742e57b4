//! The fabrication resolver.
//!
//! [`Fabricator`] classifies a [`Stack`] once and dispatches it:
//!
//! - paths go to the path resolver, which may walk a directory
//! - lists and mappings go to the shape-preserving reducer
//! - constructibles go straight to the initializer
//!
//! Every branch converges on a sequence of named units, with skipped entries
//! filtered out at each level.

mod init;
mod path;
mod reduce;

pub use init::canonical_name;

use fabricator_core::{Error, FabricateOptions, LocalTree, Loader, Result, SourceTree};
use tracing::trace;

use crate::{Fabricated, Report, Skip, Stack};

/// Resolves stacks into named constructibles.
///
/// Holds a [`Loader`] for source files and a [`SourceTree`] for directory
/// queries. Calls take `&self` and immutable options, so one fabricator can
/// serve concurrent callers.
///
/// # Example
///
/// ```
/// use fabricator::{Blueprint, Fabricated, Fabricator, Registry, Stack};
/// use fabricator_core::{FabricateOptions, MemoryTree};
///
/// let loader = Registry::new("toml")
///     .with_constructible("/units/Status.toml", Blueprint::named("Status", ""));
/// let tree = MemoryTree::new().with_file("/units/Status.toml");
/// let fabricator = Fabricator::with_tree(loader, tree);
///
/// let units = fabricator
///     .fabricate(Stack::path("/units"), &FabricateOptions::new())
///     .unwrap();
/// let Fabricated::Unit(status) = &units[0] else { unreachable!() };
/// assert_eq!(status.name().as_deref(), Some("status"));
/// ```
#[derive(Debug)]
pub struct Fabricator<L, S = LocalTree> {
    loader: L,
    tree: S,
}

impl<L: Loader> Fabricator<L, LocalTree> {
    /// A fabricator reading the local filesystem.
    pub fn new(loader: L) -> Self {
        Self::with_tree(loader, LocalTree)
    }
}

impl<L: Loader, S: SourceTree> Fabricator<L, S> {
    /// A fabricator reading `tree`.
    pub fn with_tree(loader: L, tree: S) -> Self {
        Self { loader, tree }
    }

    /// The loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The source tree.
    pub fn tree(&self) -> &S {
        &self.tree
    }

    /// Fabricate `stack` into a sequence of units and nested groups.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedType`] when the stack (or any entry
    /// reached while resolving it) has the `Other` shape, and propagates
    /// loader and I/O errors. Missing directories, non-source entries and
    /// non-constructible exports are left out silently.
    pub fn fabricate(
        &self,
        stack: Stack<L::Unit>,
        options: &FabricateOptions,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        Ok(self.fabricate_report(stack, options)?.units)
    }

    /// Like [`fabricate`](Self::fabricate), also reporting what was skipped.
    ///
    /// # Errors
    ///
    /// Same as [`fabricate`](Self::fabricate).
    pub fn fabricate_report(
        &self,
        stack: Stack<L::Unit>,
        options: &FabricateOptions,
    ) -> Result<Report<L::Unit>> {
        let mut skipped = Vec::new();
        let units = self.dispatch(stack, options, &mut skipped)?;
        Ok(Report { units, skipped })
    }

    pub(crate) fn dispatch(
        &self,
        stack: Stack<L::Unit>,
        options: &FabricateOptions,
        skipped: &mut Vec<Skip>,
    ) -> Result<Vec<Fabricated<L::Unit>>> {
        trace!(shape = %stack.shape(), forced = ?options.forced_name(), "dispatching stack");

        match stack {
            Stack::Path(raw) => self.resolve_path(&raw, options, skipped),
            Stack::List(items) => self.reduce_list(items, options, skipped),
            Stack::Map(entries) => self.reduce_map(entries, options, skipped),
            Stack::Unit(unit) => Ok(vec![Fabricated::Unit(
                self.initialize_unit(unit, "", options),
            )]),
            Stack::Other { kind, repr } => {
                trace!(kind = %kind, value = %repr, "rejecting unsupported stack");
                Err(Error::unsupported(kind))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::{Blueprint, Registry};
    use fabricator_core::{Constructible, MemoryTree, NameSlot};
    use std::path::PathBuf;
    use std::sync::Arc;

    type Fab = Fabricator<Registry<Blueprint>, MemoryTree>;

    fn unit(item: &Fabricated<Blueprint>) -> &Blueprint {
        match item {
            Fabricated::Unit(unit) => unit,
            Fabricated::Group(_) => panic!("expected a unit, got a group"),
        }
    }

    fn group(item: &Fabricated<Blueprint>) -> &[Fabricated<Blueprint>] {
        match item {
            Fabricated::Group(items) => items,
            Fabricated::Unit(_) => panic!("expected a group, got a unit"),
        }
    }

    fn name(item: &Fabricated<Blueprint>) -> String {
        unit(item).name().unwrap_or_default()
    }

    /// `/fx/constructor.toml` declares "with name"; `/fx/sub` holds two
    /// units and a log file; `/fx/nested` holds two indexed subdirectories.
    fn fixtures() -> Fab {
        let loader = Registry::new("toml")
            .with_constructible("/fx/constructor.toml", Blueprint::named("Ctor", "with name"))
            .with_constructible("/fx/sub/index.toml", Blueprint::named("Index", ""))
            .with_constructible("/fx/sub/Worker.toml", Blueprint::named("Worker", ""))
            .with_constructible("/fx/nested/alpha/index.toml", Blueprint::named("A", ""))
            .with_constructible("/fx/nested/Beta/index.toml", Blueprint::named("B", ""))
            .with_opaque("/fx/plain.toml", "table")
            .with_broken("/fx/broken.toml", "expected `=`");
        let tree = MemoryTree::new()
            .with_file("/fx/constructor.toml")
            .with_file("/fx/plain.toml")
            .with_file("/fx/broken.toml")
            .with_file("/fx/sub/index.toml")
            .with_file("/fx/sub/Worker.toml")
            .with_file("/fx/sub/app.log")
            .with_file("/fx/nested/alpha/index.toml")
            .with_file("/fx/nested/Beta/index.toml")
            .with_file("/fx/nested/notes/readme.md");
        Fabricator::with_tree(loader, tree)
    }

    fn opts() -> FabricateOptions {
        FabricateOptions::new()
    }

    #[test]
    fn test_bare_unit_becomes_single_element() {
        let fab = fixtures();
        let ctor = Blueprint::named("Status", "");
        let result = fab.fabricate(Stack::unit(ctor.clone()), &opts()).unwrap();
        assert_eq!(result.len(), 1);
        assert!(unit(&result[0]).same_as(&ctor));
        assert_eq!(ctor.name().as_deref(), Some("status"));
    }

    #[test]
    fn test_bare_unit_honours_forced_name() {
        let fab = fixtures();
        let result = fab
            .fabricate(Stack::unit(Blueprint::named("Status", "")), &opts().with_name("Probe"))
            .unwrap();
        assert_eq!(name(&result[0]), "probe");
    }

    #[test]
    fn test_single_file_keeps_declared_name() {
        let fab = fixtures();
        let result = fab
            .fabricate(Stack::path("/fx/constructor.toml"), &opts())
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(name(&result[0]), "with name");
    }

    #[test]
    fn test_single_file_forced_name() {
        let fab = fixtures();
        let result = fab
            .fabricate(Stack::path("/fx/constructor.toml"), &opts().with_name("foo"))
            .unwrap();
        assert_eq!(name(&result[0]), "foo");
    }

    #[test]
    fn test_single_file_falls_back_to_stem() {
        let loader = Registry::new("toml")
            .with_constructible("/fx/Constructor.toml", Blueprint::named("Ctor", ""));
        let fab = Fabricator::with_tree(loader, MemoryTree::new().with_file("/fx/Constructor.toml"));
        let result = fab.fabricate(Stack::path("/fx/Constructor.toml"), &opts()).unwrap();
        assert_eq!(name(&result[0]), "constructor");
    }

    #[test]
    fn test_directory_skips_non_source_files() {
        let fab = fixtures();
        let report = fab.fabricate_report(Stack::path("/fx/sub"), &opts()).unwrap();
        assert_eq!(report.units.len(), 2);
        assert_eq!(name(&report.units[0]), "worker");
        assert_eq!(name(&report.units[1]), "index");
        assert_eq!(
            report.skipped,
            vec![Skip::NotSource {
                path: PathBuf::from("/fx/sub/app.log")
            }]
        );
    }

    #[test]
    fn test_subdirectories_named_after_directory() {
        let fab = fixtures();
        let report = fab.fabricate_report(Stack::path("/fx/nested"), &opts()).unwrap();
        let names: Vec<_> = report.units.iter().map(name).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
        assert_eq!(
            report.skipped,
            vec![Skip::NotSource {
                path: PathBuf::from("/fx/nested/notes")
            }]
        );
    }

    #[test]
    fn test_non_recursive_directory_is_one_unit() {
        let fab = fixtures();
        let result = fab
            .fabricate(Stack::path("/fx/sub"), &opts().with_recursive(false))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(name(&result[0]), "sub");
    }

    #[test]
    fn test_relative_path_resolved_against_source() {
        let fab = fixtures();
        let result = fab
            .fabricate(Stack::path("sub"), &opts().with_source("/fx"))
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_missing_directory_yields_empty() {
        let fab = fixtures();
        let report = fab.fabricate_report(Stack::path("/fx/nowhere"), &opts()).unwrap();
        assert!(report.units.is_empty());
        assert_eq!(
            report.skipped,
            vec![Skip::MissingDirectory {
                path: PathBuf::from("/fx/nowhere")
            }]
        );
    }

    #[test]
    fn test_non_constructible_export_is_skipped() {
        let fab = fixtures();
        let report = fab.fabricate_report(Stack::path("/fx/plain.toml"), &opts()).unwrap();
        assert!(report.units.is_empty());
        assert!(matches!(
            &report.skipped[0],
            Skip::NotConstructible { kind, .. } if kind == "table"
        ));
    }

    #[test]
    fn test_loader_error_propagates() {
        let fab = fixtures();
        let err = fab
            .fabricate(Stack::path("/fx/broken.toml"), &opts())
            .unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn test_missing_single_file_is_load_error() {
        let fab = fixtures();
        let err = fab
            .fabricate(Stack::path("/fx/absent.toml"), &opts())
            .unwrap_err();
        assert!(err.is_load());
    }

    #[test]
    fn test_unsupported_input_touches_nothing() {
        let fab = fixtures();
        let err = fab
            .fabricate(Stack::other("datetime", "1979-05-27T07:32:00Z"), &opts())
            .unwrap_err();
        assert!(err.is_unsupported());
        assert!(err.to_string().contains("datetime"));
        assert_eq!(fab.tree().access_count(), 0);
        assert_eq!(fab.loader().load_count(), 0);
    }

    #[test]
    fn test_unsupported_nested_entry_fails() {
        let fab = fixtures();
        let stack = Stack::list([Stack::unit(Blueprint::new("A")), Stack::other("number", "3")]);
        assert!(fab.fabricate(stack, &opts()).unwrap_err().is_unsupported());
    }

    #[test]
    fn test_array_flattens_directories() {
        let fab = fixtures();
        let stack = Stack::list([Stack::unit(Blueprint::named("Y", "")), Stack::path("/fx/sub")]);
        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|item| !item.is_group()));
        assert_eq!(name(&result[0]), "y");
    }

    #[test]
    fn test_mapping_names_and_nests() {
        let fab = fixtures();
        let fn1 = Blueprint::named("One", "");
        let fn2 = Blueprint::named("Two", "");
        let fn3 = Blueprint::named("Three", "");
        let stack = Stack::map([
            ("a", Stack::unit(fn1.clone())),
            ("b", Stack::list([Stack::unit(fn2.clone()), Stack::unit(fn3.clone())])),
        ]);

        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(result.len(), 2);
        assert!(unit(&result[0]).same_as(&fn1));
        assert_eq!(fn1.name().as_deref(), Some("a"));

        let nested = group(&result[1]);
        assert_eq!(nested.len(), 2);
        assert!(unit(&nested[0]).same_as(&fn2));
        assert!(unit(&nested[1]).same_as(&fn3));
        assert_eq!(fn2.name().as_deref(), Some("b"));
        assert_eq!(fn3.name().as_deref(), Some("b"));
    }

    #[test]
    fn test_mapping_key_lowercased_over_empty_declared() {
        let fab = fixtures();
        let stack = Stack::map([("Status", Stack::unit(Blueprint::named("X", "")))]);
        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(name(&result[0]), "status");
    }

    #[test]
    fn test_mapping_key_forced_onto_directory_units() {
        let fab = fixtures();
        let stack = Stack::map([("services", Stack::path("/fx/sub"))]);
        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|item| name(item) == "services"));
    }

    #[test]
    fn test_mapping_of_mixed_groups() {
        let fab = fixtures();
        let stack = Stack::map([
            (
                "placeholder",
                Stack::list([
                    Stack::unit(Blueprint::named("P1", "")),
                    Stack::unit(Blueprint::named("P2", "")),
                    Stack::path("/fx/sub"),
                ]),
            ),
            (
                "another",
                Stack::list([
                    Stack::path("/fx/constructor.toml"),
                    Stack::unit(Blueprint::named("A1", "")),
                ]),
            ),
            ("last", Stack::list([Stack::unit(Blueprint::named("L1", ""))])),
            ("latest", Stack::path("/fx/constructor.toml")),
        ]);

        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(result.len(), 4);
        assert!(!result[3].is_group());

        let placeholder = group(&result[0]);
        assert_eq!(placeholder.len(), 4);
        assert!(placeholder.iter().all(|item| name(item) == "placeholder"));

        let another = group(&result[1]);
        assert_eq!(another.len(), 2);
        assert_eq!(name(&another[1]), "another");

        assert_eq!(group(&result[2]).len(), 1);
        // The same cached blueprint was renamed again by the last entry.
        assert_eq!(name(&result[3]), "latest");
        assert_eq!(name(&another[0]), "latest");
    }

    #[test]
    fn test_nested_array_inherits_mapping_key() {
        let fab = fixtures();
        let inner = Blueprint::named("Inner", "declared");
        let stack = Stack::map([("k", Stack::list([Stack::list([Stack::unit(inner.clone())])]))]);

        let result = fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(result.len(), 1);
        let outer = group(&result[0]);
        assert_eq!(outer.len(), 1);
        let nested = group(&outer[0]);
        assert_eq!(nested.len(), 1);
        assert_eq!(name(&nested[0]), "k");
        assert_eq!(inner.name().as_deref(), Some("k"));
    }

    #[test]
    fn test_forced_name_does_not_leak_to_siblings() {
        let fab = fixtures();
        let loose = Blueprint::named("Loose", "");
        let stack = Stack::list([
            Stack::map([("inner", Stack::unit(Blueprint::named("I", "")))]),
            Stack::unit(loose.clone()),
        ]);
        fab.fabricate(stack, &opts()).unwrap();
        assert_eq!(loose.name().as_deref(), Some("loose"));
    }

    #[test]
    fn test_array_inherits_outer_forced_name() {
        let fab = fixtures();
        let stack = Stack::list([Stack::list([Stack::unit(Blueprint::named("Deep", ""))])]);
        let result = fab.fabricate(stack, &opts().with_name("outer")).unwrap();
        let inner = group(&result[0]);
        assert_eq!(name(&inner[0]), "outer");
    }

    #[test]
    fn test_array_path_entry_infers_stem() {
        let loader = Registry::new("toml")
            .with_constructible("/fx/Health.toml", Blueprint::named("H", ""));
        let fab = Fabricator::with_tree(loader, MemoryTree::new().with_file("/fx/Health.toml"));
        let result = fab
            .fabricate(Stack::list([Stack::path("Health.toml")]), &opts().with_source("/fx"))
            .unwrap();
        assert_eq!(name(&result[0]), "health");
    }

    #[test]
    fn test_unit_without_name_slot_is_kept() {
        let fab = fixtures();
        let bare = Blueprint::new("Bare");
        let result = fab
            .fabricate(Stack::map([("key", Stack::unit(bare.clone()))]), &opts())
            .unwrap();
        assert_eq!(result.len(), 1);
        assert!(unit(&result[0]).name_slot().is_none());
    }

    #[test]
    fn test_repeated_fabrication_is_stable() {
        let fab = fixtures();
        let first = fab.fabricate(Stack::path("/fx/constructor.toml"), &opts()).unwrap();
        let second = fab.fabricate(Stack::path("/fx/constructor.toml"), &opts()).unwrap();
        assert_eq!(name(&first[0]), name(&second[0]));
        assert!(unit(&first[0]).same_as(unit(&second[0])));
    }

    #[derive(Clone)]
    struct Handler {
        slot: Arc<NameSlot>,
    }

    impl Constructible for Handler {
        type Instance = String;

        fn ident(&self) -> &str {
            "Handler"
        }

        fn name_slot(&self) -> Option<&NameSlot> {
            Some(&self.slot)
        }

        fn construct(&self) -> Result<String> {
            Ok(format!("handler:{}", self.slot.get()))
        }
    }

    #[test]
    fn test_custom_constructible() {
        let loader: Registry<Handler> = Registry::new("rs");
        let fab = Fabricator::with_tree(loader, MemoryTree::new());
        let handler = Handler {
            slot: Arc::new(NameSlot::default()),
        };
        let result = fab.fabricate(Stack::unit(handler.clone()), &opts()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(handler.construct().unwrap(), "handler:handler");
    }
}
