//! Manifest data model.
//!
//! A [`Manifest`] is the finalized, ordered list of resolved HDL sources that
//! is handed to a compiler, linter or simulator. Entries appear in exactly the
//! order their declarations succeeded.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::resolver::ManifestError;

/// A directory searched for sources referenced only by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeDirectory {
    /// The path as declared (absolute or relative to the working directory)
    pub path: PathBuf,

    /// The absolute directory that is actually searched
    pub root: PathBuf,
}

impl IncludeDirectory {
    /// Create an include directory, anchoring relative paths at `base`.
    ///
    /// `.` components are dropped from the root; `..` is kept as written.
    pub fn new(path: impl Into<PathBuf>, base: &Path) -> Self {
        let path = path.into();
        let root = base.join(&path).components().collect();
        IncludeDirectory { path, root }
    }
}

/// A logical reference to a source file, without directory information.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceDeclaration {
    name: String,
}

impl SourceDeclaration {
    /// Validate a logical source name.
    ///
    /// The name must be a single, non-empty path component. Both `/` and `\`
    /// are rejected as separators on every platform, so a Unix file name that
    /// contains a backslash cannot be declared.
    pub fn new(name: impl Into<String>) -> Result<Self, ManifestError> {
        let name = name.into();
        let invalid = |reason| ManifestError::InvalidSourceName {
            name: name.clone(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("name is empty"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name must not contain a directory component"));
        }

        let mut components = Path::new(&name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => return Err(invalid("name must be a plain file name")),
        }

        Ok(SourceDeclaration { name })
    }

    /// Get the logical name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SourceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A source declaration bound to the file it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// Logical name as declared
    pub name: String,

    /// Canonical absolute path of the chosen file
    #[serde(rename = "path")]
    pub resolved_path: PathBuf,
}

/// The ordered, de-duplicated, read-only result of a build invocation.
///
/// Cloning is cheap; clones share the same entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    include_directories: Arc<[IncludeDirectory]>,
    sources: Arc<[ResolvedSource]>,
}

impl Manifest {
    pub(crate) fn new(include_directories: Vec<IncludeDirectory>, sources: Vec<ResolvedSource>) -> Self {
        Manifest {
            include_directories: include_directories.into(),
            sources: sources.into(),
        }
    }

    /// Resolved sources, in declaration order.
    pub fn sources(&self) -> &[ResolvedSource] {
        &self.sources
    }

    /// Include directories, in registration order.
    pub fn include_directories(&self) -> &[IncludeDirectory] {
        &self.include_directories
    }

    /// Look up a source by logical name.
    pub fn get(&self, name: &str) -> Option<&ResolvedSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Iterate over resolved paths, in order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(|s| s.resolved_path.as_path())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_directory_anchors_relative_paths() {
        let dir = IncludeDirectory::new("rtl", Path::new("/work/ip"));
        assert_eq!(dir.path, PathBuf::from("rtl"));
        assert_eq!(dir.root, PathBuf::from("/work/ip/rtl"));
    }

    #[test]
    fn test_include_directory_drops_current_dir() {
        let dir = IncludeDirectory::new(".", Path::new("/work/ip"));
        assert_eq!(dir.root, PathBuf::from("/work/ip"));
    }

    #[test]
    fn test_include_directory_keeps_absolute_paths() {
        let dir = IncludeDirectory::new("/opt/ip", Path::new("/work"));
        assert_eq!(dir.root, PathBuf::from("/opt/ip"));
    }

    #[test]
    fn test_source_declaration_accepts_plain_names() {
        let decl = SourceDeclaration::new("rggen_apb_bridge.v").unwrap();
        assert_eq!(decl.name(), "rggen_apb_bridge.v");
    }

    #[test]
    fn test_source_declaration_rejects_directories() {
        for name in ["", "rtl/rggen_mux.v", "..", ".", "/abs.v", "a\\b.v"] {
            let err = SourceDeclaration::new(name).unwrap_err();
            assert!(
                matches!(err, ManifestError::InvalidSourceName { .. }),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_manifest_serializes_sources_in_order() {
        let manifest = Manifest::new(
            vec![IncludeDirectory::new(".", Path::new("/ip"))],
            vec![
                ResolvedSource {
                    name: "b.v".to_string(),
                    resolved_path: PathBuf::from("/ip/b.v"),
                },
                ResolvedSource {
                    name: "a.v".to_string(),
                    resolved_path: PathBuf::from("/ip/a.v"),
                },
            ],
        );

        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["sources"][0]["name"], "b.v");
        assert_eq!(json["sources"][1]["path"], "/ip/a.v");
        assert_eq!(manifest.get("a.v").unwrap().resolved_path, PathBuf::from("/ip/a.v"));
    }
}
