//! Manifest builder.
//!
//! The builder owns the [`PathRegistry`] for one build invocation and turns
//! `include_directory` / `source_file` declarations into a [`Manifest`].
//! Each source declaration is resolved immediately against the directories
//! registered so far, so an include directory only affects sources declared
//! after it.
//!
//! The builder is `Open` until [`ManifestBuilder::finalize`] is called, after
//! which every mutating call fails with [`ManifestError::ManifestFinalized`].

use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::core::{Manifest, ResolvedSource, SourceDeclaration};
use crate::resolver::registry::{PathRegistry, Resolution};
use crate::resolver::ManifestError;

/// Lifecycle state of a builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Open,
    Finalized,
}

/// Accumulates resolved sources in declaration order.
#[derive(Debug)]
pub struct ManifestBuilder {
    registry: PathRegistry,
    sources: Vec<ResolvedSource>,

    /// Logical name -> index into `sources`
    names: HashMap<String, usize>,

    /// Resolved path -> index into `sources`
    paths: HashMap<PathBuf, usize>,

    state: BuildState,
}

impl ManifestBuilder {
    /// Create a builder whose relative include directories are anchored at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        ManifestBuilder::with_registry(PathRegistry::new(base))
    }

    /// Create a builder around an existing registry.
    pub fn with_registry(registry: PathRegistry) -> Self {
        ManifestBuilder {
            registry,
            sources: Vec::new(),
            names: HashMap::new(),
            paths: HashMap::new(),
            state: BuildState::Open,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn registry(&self) -> &PathRegistry {
        &self.registry
    }

    /// Sources accepted so far, in declaration order.
    pub fn sources(&self) -> &[ResolvedSource] {
        &self.sources
    }

    /// Register an include directory for subsequent source declarations.
    pub fn declare_include_directory(
        &mut self,
        path: impl Into<PathBuf>,
    ) -> Result<(), ManifestError> {
        self.ensure_open()?;
        self.registry.add_directory(path);
        Ok(())
    }

    /// Resolve a logical source name and append it to the manifest.
    pub fn declare_source_file(&mut self, name: &str) -> Result<&ResolvedSource, ManifestError> {
        self.ensure_open()?;
        let decl = self.check_declaration(name)?;
        let resolution = self.registry.resolve(&decl)?;
        self.accept(decl, resolution)
    }

    /// Declare several sources at once.
    ///
    /// File-system probing runs in parallel, but declarations are checked and
    /// appended strictly in input order: the result, including which error is
    /// reported, is the same as calling [`declare_source_file`] for each name.
    /// Sources before the first failing name stay in the manifest.
    ///
    /// [`declare_source_file`]: ManifestBuilder::declare_source_file
    pub fn declare_source_files<S>(&mut self, names: &[S]) -> Result<usize, ManifestError>
    where
        S: AsRef<str> + Sync,
    {
        self.ensure_open()?;

        let registry = &self.registry;
        let probes: Vec<_> = names
            .par_iter()
            .map(|name| {
                SourceDeclaration::new(name.as_ref())
                    .ok()
                    .map(|decl| registry.resolve(&decl))
            })
            .collect();

        for (name, probe) in names.iter().zip(probes) {
            let decl = self.check_declaration(name.as_ref())?;
            // A malformed name never reaches this point, so probe is Some.
            let resolution = match probe {
                Some(resolution) => resolution?,
                None => self.registry.resolve(&decl)?,
            };
            self.accept(decl, resolution)?;
        }

        Ok(names.len())
    }

    /// Freeze the builder and hand out the manifest.
    ///
    /// Succeeds exactly once.
    pub fn finalize(&mut self) -> Result<Manifest, ManifestError> {
        self.ensure_open()?;
        self.state = BuildState::Finalized;

        tracing::debug!("finalized manifest with {} sources", self.sources.len());
        Ok(Manifest::new(
            self.registry.directories().to_vec(),
            self.sources.clone(),
        ))
    }

    fn ensure_open(&self) -> Result<(), ManifestError> {
        match self.state {
            BuildState::Open => Ok(()),
            BuildState::Finalized => Err(ManifestError::ManifestFinalized),
        }
    }

    fn check_declaration(&self, name: &str) -> Result<SourceDeclaration, ManifestError> {
        let decl = SourceDeclaration::new(name)?;
        if self.names.contains_key(decl.name()) {
            return Err(ManifestError::DuplicateSource {
                name: decl.name().to_string(),
            });
        }
        Ok(decl)
    }

    fn accept(
        &mut self,
        decl: SourceDeclaration,
        resolution: Resolution,
    ) -> Result<&ResolvedSource, ManifestError> {
        let path = match resolution {
            Resolution::Found(path) => path,
            Resolution::NotFound { searched } => {
                return Err(ManifestError::SourceNotFound {
                    name: decl.name().to_string(),
                    searched,
                });
            }
        };

        if let Some(&index) = self.paths.get(&path) {
            return Err(ManifestError::ResolvedPathCollision {
                name: decl.name().to_string(),
                existing: self.sources[index].name.clone(),
                path,
            });
        }

        let index = self.sources.len();
        self.names.insert(decl.name().to_string(), index);
        self.paths.insert(path.clone(), index);
        self.sources.push(ResolvedSource {
            name: decl.name().to_string(),
            resolved_path: path,
        });

        Ok(&self.sources[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for name in names {
            fs::write(dir.join(name), format!("// {name}\n")).unwrap();
        }
    }

    fn canonical(path: PathBuf) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    fn test_round_trip_two_sources() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.v", "b.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();
        builder.declare_source_file("a.v").unwrap();
        builder.declare_source_file("b.v").unwrap();
        let manifest = builder.finalize().unwrap();

        assert_eq!(
            manifest.sources(),
            &[
                ResolvedSource {
                    name: "a.v".to_string(),
                    resolved_path: canonical(tmp.path().join("a.v")),
                },
                ResolvedSource {
                    name: "b.v".to_string(),
                    resolved_path: canonical(tmp.path().join("b.v")),
                },
            ]
        );
    }

    #[test]
    fn test_no_include_directory_reports_empty_search() {
        let tmp = TempDir::new().unwrap();
        let mut builder = ManifestBuilder::new(tmp.path());

        let err = builder.declare_source_file("x.v").unwrap_err();
        match err {
            ManifestError::SourceNotFound { name, searched } => {
                assert_eq!(name, "x.v");
                assert!(searched.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_names_every_searched_directory() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("d1"), &[]);
        touch(&tmp.path().join("d2"), &[]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory("d1").unwrap();
        builder.declare_include_directory("d2").unwrap();

        let err = builder.declare_source_file("x.v").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::SourceNotFound { searched, .. }
                if searched == vec![tmp.path().join("d1"), tmp.path().join("d2")]
        ));
    }

    #[test]
    fn test_duplicate_name_fails_even_when_paths_differ() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("d1"), &["m.v"]);
        touch(&tmp.path().join("d2"), &["m.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory("d1").unwrap();
        builder.declare_source_file("m.v").unwrap();

        let err = builder.declare_source_file("m.v").unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateSource { name } if name == "m.v"));
        assert_eq!(builder.sources().len(), 1);
    }

    #[test]
    fn test_duplicate_is_reported_before_resolution() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["m.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();
        builder.declare_source_file("m.v").unwrap();
        // Would fail with InvalidDirectory if resolution ran.
        fs::remove_file(tmp.path().join("m.v")).unwrap();
        builder.declare_include_directory("gone").unwrap();

        let err = builder.declare_source_file("m.v").unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateSource { .. }));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["top.v", "Top.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();
        builder.declare_source_file("top.v").unwrap();

        // On case-insensitive filesystems both names are the same file.
        match builder.declare_source_file("Top.v") {
            Ok(_) | Err(ManifestError::ResolvedPathCollision { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_include_directory_only_affects_later_sources() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("late"), &["late.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        let err = builder.declare_source_file("late.v").unwrap_err();
        assert!(matches!(err, ManifestError::SourceNotFound { .. }));

        builder.declare_include_directory("late").unwrap();
        builder.declare_source_file("late.v").unwrap();
        assert_eq!(builder.sources().len(), 1);
    }

    #[test]
    fn test_interleaved_directories_preserve_order() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("common"), &["rggen_mux.v", "rggen_or_reducer.v"]);
        touch(&tmp.path().join("apb"), &["rggen_apb_adapter.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory("common").unwrap();
        builder.declare_source_file("rggen_or_reducer.v").unwrap();
        builder.declare_include_directory("apb").unwrap();
        builder.declare_source_file("rggen_apb_adapter.v").unwrap();
        builder.declare_source_file("rggen_mux.v").unwrap();
        let manifest = builder.finalize().unwrap();

        let names: Vec<_> = manifest.sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["rggen_or_reducer.v", "rggen_apb_adapter.v", "rggen_mux.v"]);
        assert_eq!(manifest.include_directories().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_names_collide() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["real.v"]);
        std::os::unix::fs::symlink(tmp.path().join("real.v"), tmp.path().join("alias.v"))
            .unwrap();

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();
        builder.declare_source_file("real.v").unwrap();

        let err = builder.declare_source_file("alias.v").unwrap_err();
        match err {
            ManifestError::ResolvedPathCollision { name, existing, .. } => {
                assert_eq!(name, "alias.v");
                assert_eq!(existing, "real.v");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(builder.sources().len(), 1);
    }

    #[test]
    fn test_finalize_blocks_further_declarations() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.v", "b.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();
        builder.declare_source_file("a.v").unwrap();
        let manifest = builder.finalize().unwrap();
        assert_eq!(builder.state(), BuildState::Finalized);

        assert!(matches!(
            builder.declare_source_file("b.v"),
            Err(ManifestError::ManifestFinalized)
        ));
        assert!(matches!(
            builder.declare_include_directory("other"),
            Err(ManifestError::ManifestFinalized)
        ));
        assert!(matches!(
            builder.declare_source_files(&["b.v"]),
            Err(ManifestError::ManifestFinalized)
        ));
        assert!(matches!(builder.finalize(), Err(ManifestError::ManifestFinalized)));

        assert_eq!(builder.sources().len(), 1);
        assert_eq!(builder.registry().directories().len(), 1);
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_invalid_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut builder = ManifestBuilder::new(tmp.path());

        let err = builder.declare_source_file("rtl/a.v").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidSourceName { .. }));
    }

    #[test]
    fn test_batch_matches_sequential_declarations() {
        let tmp = TempDir::new().unwrap();
        let names = ["c.v", "a.v", "b.v", "d.v"];
        touch(tmp.path(), &names);

        let mut batch = ManifestBuilder::new(tmp.path());
        batch.declare_include_directory(".").unwrap();
        assert_eq!(batch.declare_source_files(&names).unwrap(), 4);

        let mut sequential = ManifestBuilder::new(tmp.path());
        sequential.declare_include_directory(".").unwrap();
        for name in names {
            sequential.declare_source_file(name).unwrap();
        }

        assert_eq!(batch.finalize().unwrap(), sequential.finalize().unwrap());
    }

    #[test]
    fn test_batch_reports_first_failure_in_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.v", "b.v"]);

        let mut builder = ManifestBuilder::new(tmp.path());
        builder.declare_include_directory(".").unwrap();

        let names = ["a.v", "a.v", "missing.v", "b.v"];
        let err = builder.declare_source_files(&names).unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateSource { name } if name == "a.v"));

        let accepted: Vec<_> = builder.sources().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(accepted, ["a.v"]);
    }
}
