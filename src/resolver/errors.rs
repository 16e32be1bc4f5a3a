//! Resolution error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised by a single declaration while building a manifest.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error("source file `{name}` not found in any include directory")]
    #[diagnostic(code(srcset::resolve::not_found))]
    SourceNotFound { name: String, searched: Vec<PathBuf> },

    #[error("source file `{name}` is declared more than once")]
    #[diagnostic(code(srcset::resolve::duplicate))]
    DuplicateSource { name: String },

    #[error("`{name}` and `{existing}` resolve to the same file: {}", path.display())]
    #[diagnostic(code(srcset::resolve::collision))]
    ResolvedPathCollision {
        name: String,
        existing: String,
        path: PathBuf,
    },

    #[error("manifest is already finalized")]
    #[diagnostic(code(srcset::manifest::finalized))]
    ManifestFinalized,

    #[error("include directory is not a readable directory: {}", path.display())]
    #[diagnostic(code(srcset::resolve::invalid_directory))]
    InvalidDirectory { path: PathBuf },

    #[error("invalid source name `{name}`: {reason}")]
    #[diagnostic(code(srcset::resolve::invalid_name))]
    InvalidSourceName { name: String, reason: &'static str },

    #[error("failed to inspect {}", path.display())]
    #[diagnostic(code(srcset::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::SourceNotFound { name, searched } => {
                let mut diag = Diagnostic::error(format!(
                    "could not find source file `{}`",
                    name
                ));

                if searched.is_empty() {
                    diag = diag
                        .with_context("no include directories were registered")
                        .with_suggestion(suggestions::NO_INCLUDE_DIRS);
                } else {
                    for dir in searched {
                        diag = diag.with_context(format!("searched {}", dir.display()));
                    }
                    diag = diag
                        .with_suggestion("Check that the file name is spelled correctly")
                        .with_suggestion(
                            "Declare the directory containing it before the source file",
                        );
                }

                diag
            }

            ManifestError::DuplicateSource { name } => {
                Diagnostic::error(format!("source file `{}` is declared twice", name))
                    .with_suggestion(format!("Remove the second declaration of `{}`", name))
            }

            ManifestError::ResolvedPathCollision {
                name,
                existing,
                path,
            } => Diagnostic::error(format!(
                "`{}` resolves to a file already registered as `{}`",
                name, existing
            ))
            .with_location(path)
            .with_context("one of the names is probably a symlink or alias of the other")
            .with_suggestion(format!("Declare only one of `{}` and `{}`", existing, name)),

            ManifestError::ManifestFinalized => {
                Diagnostic::error("manifest is already finalized")
                    .with_context("declarations are only accepted before the manifest is finalized")
            }

            ManifestError::InvalidDirectory { path } => Diagnostic::error(
                "include directory does not exist or is not a directory",
            )
            .with_location(path)
            .with_suggestion(suggestions::CHECK_INCLUDE_DIR),

            ManifestError::InvalidSourceName { name, reason } => {
                Diagnostic::error(format!("invalid source name `{}`", name))
                    .with_context(*reason)
                    .with_suggestion("Declare the containing directory with include_directory")
            }

            ManifestError::Io { path, source } => {
                Diagnostic::error(format!("failed to inspect {}", path.display()))
                    .with_context(source.to_string())
            }
        }
    }
}
