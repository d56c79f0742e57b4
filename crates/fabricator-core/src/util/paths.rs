//! Path helpers shared by the resolver and its front ends.

use std::path::{Path, PathBuf};

/// Replace a leading `~` component with the home directory.
///
/// Paths without one, or a platform without a home directory, come back
/// unchanged. `~user` forms are not expanded.
///
/// ```
/// use fabricator_core::expand_tilde;
///
/// assert!(!expand_tilde("~/units").starts_with("~"));
/// assert_eq!(expand_tilde("/srv/units"), std::path::PathBuf::from("/srv/units"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Basename of `path` with the source extension `ext` stripped.
///
/// Only `ext` is removed: a directory or a file with another extension keeps
/// its full basename.
///
/// ```
/// use std::path::Path;
/// use fabricator_core::unit_stem;
///
/// assert_eq!(unit_stem(Path::new("/units/Status.toml"), "toml"), "Status");
/// assert_eq!(unit_stem(Path::new("/units/cache"), "toml"), "cache");
/// assert_eq!(unit_stem(Path::new("/units/app.log"), "toml"), "app.log");
/// ```
pub fn unit_stem(path: &Path, ext: &str) -> String {
    let has_ext = path.extension().and_then(|e| e.to_str()) == Some(ext);
    let part = if has_ext {
        path.file_stem()
    } else {
        path.file_name()
    };
    part.map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default()
}
