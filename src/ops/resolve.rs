//! Source-set resolution operations.

use std::path::Path;

use anyhow::Result;

use crate::core::{Directive, Manifest, SourceSet};
use crate::resolver::{ManifestBuilder, ManifestError};
use crate::util::GlobalContext;

/// A resolved description, ready to be emitted.
#[derive(Debug, Clone)]
pub struct ResolveResult {
    /// Library name from the description, if any
    pub library: Option<String>,

    /// The finalized manifest
    pub manifest: Manifest,
}

/// Load the description at `path` and resolve it against `ctx.cwd()`.
pub fn resolve_description(ctx: &GlobalContext, path: &Path) -> Result<ResolveResult> {
    let set = SourceSet::load(path)?;
    tracing::debug!("loaded {}", path.display());

    let manifest = build_manifest(ctx.cwd(), &set.directives())?;
    tracing::info!(
        "resolved {} sources from {} include directories",
        manifest.len(),
        manifest.include_directories().len()
    );

    Ok(ResolveResult {
        library: set.name().map(str::to_string),
        manifest,
    })
}

/// Apply `directives` in order and finalize the manifest.
///
/// Runs of consecutive source declarations are declared as one batch so
/// their file-system probes can run in parallel; the registry cannot change
/// within a run, so the result is identical to declaring them one by one.
/// Stops at the first failing declaration.
pub fn build_manifest(base: &Path, directives: &[Directive]) -> Result<Manifest, ManifestError> {
    let mut builder = ManifestBuilder::new(base);
    let mut pending: Vec<&str> = Vec::new();

    for directive in directives {
        match directive {
            Directive::SourceFile(name) => pending.push(name.as_str()),
            Directive::IncludeDirectory(path) => {
                builder.declare_source_files(&pending)?;
                pending.clear();
                builder.declare_include_directory(path.clone())?;
            }
        }
    }
    builder.declare_source_files(&pending)?;

    builder.finalize()
}
