//! Global context for srcset operations.
//!
//! Provides centralized access to the working directory and configuration
//! paths of one invocation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::DESCRIPTION_NAME;
use crate::util::config::{global_config_dir, load_config, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Working directory; relative include directories are anchored here
    cwd: PathBuf,

    /// Home directory for global srcset data (~/.srcset/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext for the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".srcset"));

        GlobalContext { cwd, home }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project-local srcset directory.
    pub fn project_dir(&self) -> PathBuf {
        self.cwd.join(".srcset")
    }

    /// Get the project-local configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.project_dir().join("config.toml")
    }

    /// Load merged global and project configuration.
    pub fn config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }

    /// Resolve a description path, defaulting to `Sources.toml` in the cwd.
    pub fn description_path(&self, file: Option<&Path>) -> PathBuf {
        match file {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.cwd.join(path),
            None => self.cwd.join(DESCRIPTION_NAME),
        }
    }
}
