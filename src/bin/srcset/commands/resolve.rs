//! `srcset resolve` command

use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::cli::ResolveArgs;
use crate::require_description;
use srcset::ops::{emit, resolve_description, EmitOptions, OutputFormat};
use srcset::util::fs::write_string;
use srcset::GlobalContext;

pub fn execute(args: ResolveArgs, ctx: &GlobalContext) -> Result<()> {
    let path = ctx.description_path(args.file.as_deref());
    require_description(&path)?;

    let config = ctx.config();

    // Format: CLI > config > default
    let format = match args.format {
        Some(ref f) => f.parse::<OutputFormat>().map_err(|e| anyhow!("{}", e))?,
        None => config.format().unwrap_or_default(),
    };
    let relative = args.relative || config.output.relative;

    let result = resolve_description(ctx, &path)?;

    let opts = EmitOptions {
        format,
        relative_to: relative.then(|| ctx.cwd()),
    };
    let text = emit(&result.manifest, result.library.as_deref(), &opts)?;

    match args.output {
        Some(ref out) => write_string(&ctx.cwd().join(out), &text)?,
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write manifest to stdout")?,
    }

    eprintln!("    Resolved {} sources", result.manifest.len());

    Ok(())
}
