//! Error types for platform discovery and property loading.

use std::path::PathBuf;

/// Errors that can occur while discovering a platform tree or loading its
/// board property file.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// An I/O error occurred while reading the platform tree.
    #[error("platform I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A required platform subdirectory does not exist.
    #[error("platform directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// The `boards.toml` property file could not be parsed.
    #[error("failed to parse board properties: {0}")]
    Parse(String),
}
