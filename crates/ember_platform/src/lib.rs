//! Platform model for the Ember build generator.
//!
//! A platform is a directory tree shipping the vendor's runtime sources
//! (`cores/<name>/`, `variants/<name>/`) together with a `boards.toml`
//! property file describing each board. This crate provides the
//! [`PlatformDescriptor`] built once from that tree, the [`PropertyStore`]
//! abstraction over layered board properties, and [`HostContext`] for the
//! host-conditional parts of source discovery.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod host;
pub mod props;

pub use descriptor::PlatformDescriptor;
pub use error::PlatformError;
pub use host::{HostContext, LinuxDistro, OsFamily};
pub use props::{PropertyStore, TomlPropertyStore};
