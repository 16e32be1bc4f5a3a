//! User-friendly diagnostic messages.
//!
//! Every error printed by the CLI names the root cause, the state that was
//! inspected (searched directories, conflicting names), and a suggested fix.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no description file is found.
    pub const NO_DESCRIPTION: &str = "help: Run `srcset init` to create a Sources.toml";

    /// Suggestion when a source is declared with no include directories.
    pub const NO_INCLUDE_DIRS: &str =
        "Add `include_directories = [\".\"]` or an `include_directory` directive first";

    /// Suggestion when an include directory is unusable.
    pub const CHECK_INCLUDE_DIR: &str =
        "Check the path, which is relative to the working directory (see `-C`)";
}

/// An error message with optional context and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("could not find source file `rggen_mux.v`")
            .with_context("searched /ip/rtl")
            .with_suggestion("Check that the file name is spelled correctly")
            .with_suggestion("Declare the directory containing it first");

        let output = diag.format(false);
        assert!(output.contains("error: could not find source file"));
        assert!(output.contains("= searched /ip/rtl"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Declare the directory"));
    }

    #[test]
    fn test_error_with_location() {
        let diag = Diagnostic::error("source file `a.v` is declared twice").with_location("/ip/a.v");
        let output = diag.format(false);
        assert!(output.starts_with("error: source file `a.v` is declared twice"));
        assert!(output.contains("--> /ip/a.v"));
        assert!(diag.format(true).contains("\x1b[1;31merror"));
    }
}
