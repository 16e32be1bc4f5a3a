//! srcset - resolve ordered HDL source sets into build manifests
//!
//! This crate turns a declarative list of include directories and logical
//! source names into a deterministic, validated list of file paths for a
//! downstream compiler, linter or simulator.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{
    Directive, IncludeDirectory, Manifest, ResolvedSource, SourceDeclaration, SourceSet,
};

pub use resolver::{ManifestBuilder, ManifestError, PathRegistry, Resolution};
pub use util::context::GlobalContext;
