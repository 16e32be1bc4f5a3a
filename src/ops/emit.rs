//! Render a finalized manifest for downstream tools.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{IncludeDirectory, Manifest};
use crate::util::fs::relative_path;

/// Output format for a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One resolved path per line
    #[default]
    Paths,
    /// JSON document with include directories and sources
    Json,
    /// Verilog-style filelist: `+incdir+` lines, then sources
    Filelist,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paths" => Ok(OutputFormat::Paths),
            "json" => Ok(OutputFormat::Json),
            "filelist" | "f" => Ok(OutputFormat::Filelist),
            _ => Err(format!(
                "invalid output format '{}'; expected 'paths', 'json', or 'filelist'",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Paths => write!(f, "paths"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Filelist => write!(f, "filelist"),
        }
    }
}

/// Options controlling how paths are rendered.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions<'a> {
    pub format: OutputFormat,

    /// Render paths relative to this directory
    pub relative_to: Option<&'a Path>,
}

#[derive(Serialize)]
struct JsonManifest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    library: Option<&'a str>,
    include_directories: Vec<String>,
    sources: Vec<JsonSource<'a>>,
}

#[derive(Serialize)]
struct JsonSource<'a> {
    name: &'a str,
    path: String,
}

// Source paths are canonical, so include roots are shown the same way.
// A root that cannot be canonicalized was never scanned and is kept as written.
fn include_root(dir: &IncludeDirectory) -> PathBuf {
    fs::canonicalize(&dir.root).unwrap_or_else(|_| dir.root.clone())
}

/// Render `manifest` as text in the requested format.
pub fn emit(manifest: &Manifest, library: Option<&str>, opts: &EmitOptions<'_>) -> Result<String> {
    let render = |path: &Path| -> String {
        match opts.relative_to {
            Some(base) => match relative_path(base, path) {
                rel if rel.as_os_str().is_empty() => ".".to_string(),
                rel => rel.display().to_string(),
            },
            None => path.display().to_string(),
        }
    };

    let out = match opts.format {
        OutputFormat::Paths => {
            let mut out = String::new();
            for path in manifest.paths() {
                out.push_str(&render(path));
                out.push('\n');
            }
            out
        }

        OutputFormat::Filelist => {
            let mut out = String::new();
            for dir in manifest.include_directories() {
                out.push_str(&format!("+incdir+{}\n", render(&include_root(dir))));
            }
            for path in manifest.paths() {
                out.push_str(&render(path));
                out.push('\n');
            }
            out
        }

        OutputFormat::Json => {
            let doc = JsonManifest {
                library,
                include_directories: manifest
                    .include_directories()
                    .iter()
                    .map(|d| render(&include_root(d)))
                    .collect(),
                sources: manifest
                    .sources()
                    .iter()
                    .map(|s| JsonSource {
                        name: &s.name,
                        path: render(&s.resolved_path),
                    })
                    .collect(),
            };
            let mut out =
                serde_json::to_string_pretty(&doc).context("failed to serialize manifest")?;
            out.push('\n');
            out
        }
    };

    Ok(out)
}
