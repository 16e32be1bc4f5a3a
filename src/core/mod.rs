//! Core data structures for srcset.
//!
//! This module contains the foundational types used throughout srcset:
//! - Include directories and source declarations
//! - Resolved sources and the finalized manifest
//! - The Sources.toml description format

pub mod description;
pub mod manifest;

pub use description::{Directive, SourceSet, DESCRIPTION_NAME};
pub use manifest::{IncludeDirectory, Manifest, ResolvedSource, SourceDeclaration};
