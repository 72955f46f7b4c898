//! The platform descriptor: known cores and variants with their source roots.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::PlatformError;

/// Read-only registry of a platform's core and variant source packages.
///
/// Populated exactly once, either by [`discover`](Self::discover) over a
/// platform directory tree or programmatically for tests, and consumed
/// read-only by board resolution. A core or variant name not present here is
/// a fatal configuration defect for any board that declares it.
#[derive(Debug, Default)]
pub struct PlatformDescriptor {
    /// Known core names mapped to their source roots.
    cores: BTreeMap<String, PathBuf>,
    /// Known variant names mapped to their source roots.
    variants: BTreeMap<String, PathBuf>,
}

impl PlatformDescriptor {
    /// Creates an empty descriptor for programmatic population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers cores and variants under a platform root directory.
    ///
    /// Expects `<root>/cores/<name>/` and `<root>/variants/<name>/`
    /// subdirectories; each entry name (lowercased) becomes a known core or
    /// variant. Both subdirectories must exist, but either may be empty —
    /// validation against boards happens at resolution time.
    pub fn discover(platform_root: &Path) -> Result<Self, PlatformError> {
        let mut descriptor = Self::new();
        descriptor.cores = scan_packages(&platform_root.join("cores"))?;
        descriptor.variants = scan_packages(&platform_root.join("variants"))?;
        Ok(descriptor)
    }

    /// Registers a core source package.
    pub fn insert_core(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.cores.insert(name.into().to_lowercase(), path.into());
    }

    /// Registers a variant source package.
    pub fn insert_variant(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.variants.insert(name.into().to_lowercase(), path.into());
    }

    /// Returns whether `name` is a known core.
    pub fn has_core(&self, name: &str) -> bool {
        self.cores.contains_key(name)
    }

    /// Returns whether `name` is a known variant.
    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Returns the source root of a known core.
    pub fn core_path(&self, name: &str) -> Option<&Path> {
        self.cores.get(name).map(PathBuf::as_path)
    }

    /// Returns the source root of a known variant.
    pub fn variant_path(&self, name: &str) -> Option<&Path> {
        self.variants.get(name).map(PathBuf::as_path)
    }

    /// Iterates over known core names in sorted order.
    pub fn known_cores(&self) -> impl Iterator<Item = &str> {
        self.cores.keys().map(String::as_str)
    }

    /// Iterates over known variant names in sorted order.
    pub fn known_variants(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}

/// Scans a `cores/` or `variants/` directory for package subdirectories.
fn scan_packages(dir: &Path) -> Result<BTreeMap<String, PathBuf>, PlatformError> {
    if !dir.is_dir() {
        return Err(PlatformError::MissingDirectory(dir.to_path_buf()));
    }
    let mut packages = BTreeMap::new();
    let entries = std::fs::read_dir(dir).map_err(|source| PlatformError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| PlatformError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                packages.insert(name.to_lowercase(), path.clone());
            }
        }
    }
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_platform_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["cores/avr", "cores/megaavr", "variants/standard", "variants/mega"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        // A stray file must not be picked up as a package
        std::fs::write(dir.path().join("cores/README.md"), "docs").unwrap();
        dir
    }

    #[test]
    fn discover_finds_cores_and_variants() {
        let dir = make_platform_tree();
        let descriptor = PlatformDescriptor::discover(dir.path()).unwrap();

        let cores: Vec<_> = descriptor.known_cores().collect();
        assert_eq!(cores, vec!["avr", "megaavr"]);
        let variants: Vec<_> = descriptor.known_variants().collect();
        assert_eq!(variants, vec!["mega", "standard"]);
    }

    #[test]
    fn discover_normalizes_case() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("cores/AVR")).unwrap();
        std::fs::create_dir_all(dir.path().join("variants/Standard")).unwrap();

        let descriptor = PlatformDescriptor::discover(dir.path()).unwrap();
        assert!(descriptor.has_core("avr"));
        assert!(descriptor.has_variant("standard"));
    }

    #[test]
    fn discover_missing_cores_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("variants")).unwrap();

        let err = PlatformDescriptor::discover(dir.path()).unwrap_err();
        assert!(matches!(err, PlatformError::MissingDirectory(_)));
    }

    #[test]
    fn paths_resolve_for_known_names_only() {
        let dir = make_platform_tree();
        let descriptor = PlatformDescriptor::discover(dir.path()).unwrap();

        assert_eq!(
            descriptor.core_path("avr").unwrap(),
            dir.path().join("cores/avr")
        );
        assert!(descriptor.core_path("esp32").is_none());
        assert!(descriptor.variant_path("micro").is_none());
    }

    #[test]
    fn programmatic_population() {
        let mut descriptor = PlatformDescriptor::new();
        descriptor.insert_core("AVR", "/platform/cores/avr");
        descriptor.insert_variant("Standard", "/platform/variants/standard");

        assert!(descriptor.has_core("avr"));
        assert!(descriptor.has_variant("standard"));
        assert!(!descriptor.has_core("AVR"), "lookup is by lowercase name");
    }
}
