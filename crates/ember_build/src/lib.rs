//! In-memory native build-graph model.
//!
//! This crate is the generator's view of the underlying native build system:
//! an arena of library and executable targets addressed by
//! [`TargetId`](ember_common::TargetId), with the primitives the core
//! generator composes — create targets, attach sources, include directories,
//! per-language compile flags, link flags, and dependency edges. It decides
//! nothing about *what* to build; that is `ember_corelib`'s job.

#![warn(missing_docs)]

pub mod error;
pub mod graph;

pub use error::BuildGraphError;
pub use graph::{BuildGraph, Target, TargetKind};
