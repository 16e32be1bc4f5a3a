//! Source resolution.
//!
//! [`PathRegistry`] maps logical names to files through the ordered include
//! directories; [`ManifestBuilder`] drives declarations against it and
//! enforces the manifest invariants (unique names, unique paths, declaration
//! order). Resolution is synchronous and touches the file system only to
//! probe candidate paths.

pub mod builder;
pub mod errors;
pub mod registry;

pub use builder::{BuildState, ManifestBuilder};
pub use errors::ManifestError;
pub use registry::{PathRegistry, Resolution};
