//! Implementation of `srcset init`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::description::generate_description;
use crate::core::DESCRIPTION_NAME;
use crate::util::fs::{glob_files, write_string};

/// File patterns treated as HDL sources.
pub const HDL_PATTERNS: &[&str] = &["*.v", "*.sv", "*.vh", "*.svh"];

/// Options for scaffolding a description.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Library name (defaults to the directory name)
    pub name: Option<String>,

    /// Overwrite an existing Sources.toml
    pub force: bool,
}

/// Result of `srcset init`.
#[derive(Debug, Clone)]
pub struct InitResult {
    /// Path of the written description
    pub path: PathBuf,

    /// Sources listed, in the order written
    pub sources: Vec<String>,
}

/// Write a Sources.toml in `dir` listing every HDL file found there.
///
/// Sources are listed in file-name order; reorder them by hand when the
/// downstream toolchain needs definitions before use.
pub fn init_description(dir: &Path, opts: &InitOptions) -> Result<InitResult> {
    let path = dir.join(DESCRIPTION_NAME);
    if path.exists() && !opts.force {
        bail!(
            "`{}` already exists in `{}`\n\
             \n\
             Use `srcset init --force` to overwrite it.",
            DESCRIPTION_NAME,
            dir.display()
        );
    }

    let name = match &opts.name {
        Some(name) => name.clone(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sources".to_string()),
    };

    let sources: Vec<String> = glob_files(dir, HDL_PATTERNS)?
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    if sources.is_empty() {
        tracing::warn!("no HDL sources found in {}", dir.display());
    }

    write_string(&path, &generate_description(&name, &sources))?;
    tracing::info!("wrote {} with {} sources", path.display(), sources.len());

    Ok(InitResult { path, sources })
}
