use crate::catalog::MakeCatalog;
use anyhow::{Context, Result};

use super::CommandContext;
use super::utils::print_make_list;

pub fn handle_makes(ctx: &CommandContext, search: Option<String>, json: bool) -> Result<()> {
    let path = ctx.config.makes_path(&ctx.root);
    let catalog = MakeCatalog::load(&path)
        .with_context(|| format!("Failed to load makes from {}", path.display()))?;

    let makes = catalog.search(search.as_deref().unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&makes)?);
    } else {
        print_make_list(&makes);
    }
    Ok(())
}
