//! Shared foundational types for the Ember build generator.
//!
//! This crate provides the board identifier type, the compilation-unit
//! language enum, and opaque ID newtypes for build-graph entities.

#![warn(missing_docs)]

pub mod board;
pub mod ids;
pub mod language;

pub use board::BoardId;
pub use ids::TargetId;
pub use language::Language;
