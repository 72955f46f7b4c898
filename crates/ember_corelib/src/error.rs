//! Error taxonomy for build-graph generation.
//!
//! Configuration and discovery failures are fatal: they mean the platform or
//! a board definition is defective, and any artifact produced from them
//! would be wrong. They propagate up to the generation driver unretried.
//! An undeclared firmware target is not an error — see
//! [`LinkOutcome::Deferred`](crate::linker::LinkOutcome).

use std::path::PathBuf;

use ember_build::BuildGraphError;
use ember_common::BoardId;

/// A board declares a core or variant the platform does not know, or is
/// missing a required property. Fatal; no artifact is registered.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// A required board property is absent from both layers.
    #[error("board '{board}': missing required property '{key}'")]
    MissingProperty {
        /// The offending board.
        board: BoardId,
        /// The property key that was looked up.
        key: String,
    },

    /// The board's declared core is not a known core.
    #[error("board '{board}': unknown core '{core}'")]
    UnknownCore {
        /// The offending board.
        board: BoardId,
        /// The invalid core name.
        core: String,
    },

    /// The board's declared variant is not a known variant.
    #[error("board '{board}': unknown variant '{variant}'")]
    UnknownVariant {
        /// The offending board.
        board: BoardId,
        /// The invalid variant name.
        variant: String,
    },
}

/// A declared source root is missing or yields no compilable sources.
/// Fatal; an empty core library is a configuration defect, not a degenerate
/// success.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// The source root does not exist or is not a directory.
    #[error("source root does not exist: {0}")]
    MissingRoot(PathBuf),

    /// The source root contains no compilable implementation units.
    #[error("no compilable sources under {0}")]
    EmptyTree(PathBuf),

    /// An I/O error occurred while scanning.
    #[error("I/O error while scanning {path}: {source}")]
    Io {
        /// The directory being scanned.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Any fatal generation error.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// An invalid board configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A source-discovery failure.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A build-graph construction failure.
    #[error(transparent)]
    BuildGraph(#[from] BuildGraphError),
}
