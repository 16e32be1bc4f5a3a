//! `srcset check` command

use anyhow::Result;

use crate::cli::CheckArgs;
use crate::require_description;
use srcset::ops::resolve_description;
use srcset::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let path = ctx.description_path(args.file.as_deref());
    require_description(&path)?;

    let result = resolve_description(ctx, &path)?;

    let name = result.library.as_deref().unwrap_or("sources");
    eprintln!(
        "    Checked `{}`: {} sources resolved",
        name,
        result.manifest.len()
    );

    Ok(())
}
