//! Source discovery for core and variant packages.
//!
//! Recursively enumerates compilable implementation units under a source
//! root. The result is lexicographically sorted so that artifact identity is
//! reproducible across runs.

use std::path::{Path, PathBuf};

use ember_common::Language;
use ember_platform::HostContext;

use crate::error::DiscoveryError;

/// Discovers the compilable sources under `root`.
///
/// Files are recognized by extension (assembly, C, C++) and returned in
/// lexicographic order. On hosts that supply their own program entry point
/// (see [`HostContext::supplies_entry_point`]), files matching the
/// case-insensitive `main.c*` pattern are excluded — the platform's entry
/// point would collide with the host-provided one at link time. No other
/// host gets this exclusion.
///
/// A missing root or a root yielding zero sources is a fatal
/// [`DiscoveryError`].
pub fn discover(root: &Path, host: &HostContext) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !root.is_dir() {
        return Err(DiscoveryError::MissingRoot(root.to_path_buf()));
    }

    let exclude_entry_points = host.supplies_entry_point();
    let mut sources = Vec::new();
    walk(root, exclude_entry_points, &mut sources)?;
    sources.sort();

    if sources.is_empty() {
        return Err(DiscoveryError::EmptyTree(root.to_path_buf()));
    }
    Ok(sources)
}

/// Recursively collects source files under `dir`.
fn walk(
    dir: &Path,
    exclude_entry_points: bool,
    sources: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoveryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, exclude_entry_points, sources)?;
        } else if let Some(language) = Language::from_path(&path) {
            if exclude_entry_points && is_entry_point(&path, language) {
                continue;
            }
            sources.push(path);
        }
    }
    Ok(())
}

/// Matches the case-insensitive `main.c*` entry-point naming pattern.
///
/// Assembly files are never entry points under this rule.
fn is_entry_point(path: &Path, language: Language) -> bool {
    if !matches!(language, Language::C | Language::Cpp) {
        return false;
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case("main"))
}
