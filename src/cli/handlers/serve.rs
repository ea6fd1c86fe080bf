use crate::graphql::{AppState, build_schema, run_server};
use anyhow::{Context, Result};
use colored::Colorize;

use super::CommandContext;

pub fn handle_serve(mut ctx: CommandContext, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    let state = AppState::from_config(&ctx.config, &ctx.root)
        .context("Failed to initialize server state")?;
    let makes = state.catalog.len();
    let schema = build_schema(state);
    let settings = ctx.config.server;

    println!(
        "{} {}",
        "Starting GraphQL server on".green(),
        settings.endpoint_url().cyan()
    );
    println!("GraphiQL: {}", settings.endpoint_url());
    println!("Loaded {} vehicle makes", makes);

    tokio::runtime::Runtime::new()?.block_on(async { run_server(schema, &settings).await })?;
    Ok(())
}
