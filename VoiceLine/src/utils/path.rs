//! Path utilities

use std::path::{Path, PathBuf};

/// Final path component as an owned string (empty when the path has none)
pub fn file_name_string<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
