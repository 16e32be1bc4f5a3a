//! srcset CLI - resolve HDL source sets into build manifests

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use srcset::util::diagnostic::{emit, suggestions};
use srcset::{GlobalContext, ManifestError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ManifestError>() {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("srcset=debug")
    } else {
        EnvFilter::new("srcset=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = match cli.directory {
        Some(ref dir) => {
            let dir = std::env::current_dir()
                .context("failed to get current directory")?
                .join(dir);
            let dir = dir
                .canonicalize()
                .with_context(|| format!("cannot change to directory `{}`", dir.display()))?;
            GlobalContext::with_cwd(dir)
        }
        None => GlobalContext::new()?,
    };

    // Execute command
    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Init(args) => commands::init::execute(args, &ctx),
    }
}

/// Fail with a hint when the description file is missing.
pub(crate) fn require_description(path: &std::path::Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!(
            "could not find `{}`\n\n{}",
            path.display(),
            suggestions::NO_DESCRIPTION
        );
    }
    Ok(())
}
