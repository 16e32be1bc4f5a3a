//! Sources.toml parsing and schema.
//!
//! A source-set description lists the directives of one build invocation:
//!
//! ```toml
//! include_directories = ["."]
//! source_files = ["rggen_or_reducer.v", "rggen_mux.v"]
//!
//! directives = [
//!   { include_directory = "vendor" },
//!   { source_file = "vendor_bridge.v" },
//! ]
//!
//! [library]
//! name = "rggen-verilog-rtl"
//! ```
//!
//! `include_directories` and `source_files` are shorthand for registering
//! every directory and then declaring every source. `directives` preserves
//! arbitrary interleaving and is applied after the shorthand lists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Canonical description file name.
pub const DESCRIPTION_NAME: &str = "Sources.toml";

/// A single build directive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    IncludeDirectory(PathBuf),
    SourceFile(String),
}

/// Library metadata from the [library] section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryMetadata {
    /// Library name
    pub name: Option<String>,
}

/// The parsed Sources.toml description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSet {
    #[serde(default)]
    pub library: Option<LibraryMetadata>,

    #[serde(default)]
    pub include_directories: Vec<PathBuf>,

    #[serde(default)]
    pub source_files: Vec<String>,

    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl SourceSet {
    /// Load a description from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content, path)
    }

    /// Parse a description from a string.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Library name, if declared.
    pub fn name(&self) -> Option<&str> {
        self.library.as_ref().and_then(|l| l.name.as_deref())
    }

    /// Expand the description into the ordered directive sequence.
    pub fn directives(&self) -> Vec<Directive> {
        self.include_directories
            .iter()
            .cloned()
            .map(Directive::IncludeDirectory)
            .chain(self.source_files.iter().cloned().map(Directive::SourceFile))
            .chain(self.directives.iter().cloned())
            .collect()
    }
}

/// Generate a Sources.toml listing `sources` from the current directory.
pub fn generate_description(name: &str, sources: &[String]) -> String {
    let mut out = String::from("include_directories = [\".\"]\n\nsource_files = [\n");
    for source in sources {
        out.push_str(&format!("  {},\n", toml_string(source)));
    }
    out.push_str(&format!("]\n\n[library]\nname = {}\n", toml_string(name)));
    out
}

fn toml_string(s: &str) -> String {
    toml::Value::String(s.to_owned()).to_string()
}
