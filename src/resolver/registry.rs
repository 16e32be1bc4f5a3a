//! Include-directory search path.
//!
//! Directories are searched in registration order and the first directory
//! holding a regular file with the requested name wins. Directories are not
//! checked when registered; a directory that is missing or not a directory
//! fails the first resolution that has to scan it. Directories after a match
//! are never inspected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{IncludeDirectory, SourceDeclaration};
use crate::resolver::ManifestError;

/// Outcome of looking a logical name up in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The first matching file, as a canonical absolute path.
    Found(PathBuf),
    /// No registered directory holds the name.
    NotFound { searched: Vec<PathBuf> },
}

/// Ordered set of include directories.
#[derive(Debug, Clone)]
pub struct PathRegistry {
    /// Directory that relative include paths are anchored at
    base: PathBuf,

    /// Registered directories, in search order
    directories: Vec<IncludeDirectory>,
}

impl PathRegistry {
    /// Create an empty registry anchoring relative paths at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        PathRegistry {
            base: base.into(),
            directories: Vec::new(),
        }
    }

    /// Append a directory to the end of the search order.
    pub fn add_directory(&mut self, path: impl Into<PathBuf>) {
        let dir = IncludeDirectory::new(path, &self.base);
        tracing::debug!("include directory {}", dir.root.display());
        self.directories.push(dir);
    }

    /// Registered directories, in search order.
    pub fn directories(&self) -> &[IncludeDirectory] {
        &self.directories
    }

    /// Find the first `<dir>/<name>` that is a regular file.
    pub fn resolve(&self, decl: &SourceDeclaration) -> Result<Resolution, ManifestError> {
        let mut searched = Vec::with_capacity(self.directories.len());

        for dir in &self.directories {
            check_directory(&dir.root)?;

            let candidate = dir.root.join(decl.name());
            if is_regular_file(&candidate)? {
                let path = fs::canonicalize(&candidate).map_err(|source| ManifestError::Io {
                    path: candidate.clone(),
                    source,
                })?;
                tracing::debug!("{} -> {}", decl, path.display());
                return Ok(Resolution::Found(path));
            }

            searched.push(dir.root.clone());
        }

        Ok(Resolution::NotFound { searched })
    }
}

fn check_directory(root: &Path) -> Result<(), ManifestError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ManifestError::InvalidDirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ManifestError::InvalidDirectory {
            path: root.to_path_buf(),
        }),
        Err(source) => Err(ManifestError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

// Follows symlinks: a link to a regular file counts as one.
fn is_regular_file(path: &Path) -> Result<bool, ManifestError> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ManifestError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
