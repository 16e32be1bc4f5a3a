//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// srcset - resolve ordered HDL source sets into build manifests
#[derive(Parser)]
#[command(name = "srcset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve Sources.toml and print the manifest
    Resolve(ResolveArgs),

    /// Resolve Sources.toml without printing the manifest
    Check(CheckArgs),

    /// Create a Sources.toml from the HDL files in the current directory
    Init(InitArgs),
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Path to the description file (defaults to Sources.toml)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format: paths, json, or filelist
    #[arg(long)]
    pub format: Option<String>,

    /// Print paths relative to the working directory
    #[arg(long)]
    pub relative: bool,

    /// Write the manifest to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the description file (defaults to Sources.toml)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct InitArgs {
    /// Library name (defaults to directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing Sources.toml
    #[arg(long)]
    pub force: bool,
}
