//! `srcset init` command

use anyhow::Result;

use crate::cli::InitArgs;
use srcset::ops::{init_description, InitOptions};
use srcset::GlobalContext;

pub fn execute(args: InitArgs, ctx: &GlobalContext) -> Result<()> {
    let opts = InitOptions {
        name: args.name,
        force: args.force,
    };

    let result = init_description(ctx.cwd(), &opts)?;

    eprintln!(
        "     Created {} ({} sources)",
        result.path.display(),
        result.sources.len()
    );

    Ok(())
}
