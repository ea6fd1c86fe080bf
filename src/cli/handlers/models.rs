use crate::lookup::{VpicClient, models_or_placeholder};
use anyhow::Result;

use super::CommandContext;
use super::utils::print_model_list;

pub fn handle_models(ctx: &CommandContext, make: String, json: bool) -> Result<()> {
    let client = VpicClient::new(&ctx.config.lookup)?;
    let models =
        tokio::runtime::Runtime::new()?.block_on(models_or_placeholder(&client, &make));

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
    } else {
        print_model_list(&make, &models);
    }
    Ok(())
}
