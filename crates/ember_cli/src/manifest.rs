//! Project manifest (`ember.toml`) loading and project-root resolution.
//!
//! The manifest names the platform directory and declares firmware targets,
//! each carrying its board ID as an explicit attribute:
//!
//! ```toml
//! [project]
//! name = "blink"
//! platform = "vendor/avr"
//!
//! [firmware.blink]
//! board = "uno"
//! sources = ["src/blink.cpp"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The top-level project manifest parsed from `ember.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectManifest {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// Firmware targets keyed by target name.
    #[serde(default)]
    pub firmware: BTreeMap<String, FirmwareSpec>,
}

/// Core project metadata required in every `ember.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Path to the platform directory, relative to the project root unless
    /// absolute.
    pub platform: String,
}

/// One firmware target declaration.
#[derive(Debug, Deserialize)]
pub struct FirmwareSpec {
    /// The board this firmware builds for.
    pub board: String,
    /// Application source files, relative to the project root.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Loads and validates an `ember.toml` manifest from a project directory.
pub fn load_manifest(project_dir: &Path) -> Result<ProjectManifest, Box<dyn std::error::Error>> {
    let path = project_dir.join("ember.toml");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    load_manifest_from_str(&content)
}

/// Parses and validates an `ember.toml` manifest from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_manifest_from_str(
    content: &str,
) -> Result<ProjectManifest, Box<dyn std::error::Error>> {
    let manifest: ProjectManifest =
        toml::from_str(content).map_err(|e| format!("failed to parse manifest: {e}"))?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validates that required fields are present and consistent.
fn validate_manifest(manifest: &ProjectManifest) -> Result<(), Box<dyn std::error::Error>> {
    if manifest.project.name.is_empty() {
        return Err("missing required field: project.name".into());
    }
    if manifest.project.platform.is_empty() {
        return Err("missing required field: project.platform".into());
    }
    for (name, spec) in &manifest.firmware {
        if spec.board.is_empty() {
            return Err(format!("firmware '{name}': missing board").into());
        }
    }
    Ok(())
}

/// Walks up from `start` looking for the nearest directory containing
/// `ember.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("ember.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find ember.toml in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--manifest` is specified, uses that path (file yields its parent
/// directory). Otherwise walks up from the current directory.
pub fn resolve_project_root(
    global: &crate::GlobalArgs,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref manifest_path) = global.manifest {
        let p = PathBuf::from(manifest_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Resolves the platform directory named by the manifest against the
/// project root.
pub fn platform_dir(project_dir: &Path, manifest: &ProjectManifest) -> PathBuf {
    let platform = Path::new(&manifest.project.platform);
    if platform.is_absolute() {
        platform.to_path_buf()
    } else {
        project_dir.join(platform)
    }
}
