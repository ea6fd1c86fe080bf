use anyhow::{Context, Result};
use clap::Parser;

use carledger::cli::handlers::{
    CommandContext, handle_makes, handle_models, handle_mutate, handle_query, handle_serve,
};
use carledger::cli::{Cli, Commands};
use carledger::config::LedgerConfig;
use carledger::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_file = cli
        .log_file
        .clone()
        .and_then(|path| path.or_else(logging::default_log_path));
    logging::init(cli.verbose, log_file);

    let ctx = load_context(&cli)?;

    match cli.command {
        Commands::Serve { host, port } => handle_serve(ctx, host, port),
        Commands::Query {
            query,
            variables,
            endpoint,
        } => handle_query(ctx, query, variables, endpoint),
        Commands::Mutate {
            mutation,
            variables,
            endpoint,
        } => handle_mutate(ctx, mutation, variables, endpoint),
        Commands::Makes { search, json } => handle_makes(&ctx, search, json),
        Commands::Models { make, json } => handle_models(&ctx, make, json),
    }
}

fn load_context(cli: &Cli) -> Result<CommandContext> {
    let (config, root) = match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir()?;
            LedgerConfig::discover(&cwd).context("Failed to load config")?
        }
    };
    tracing::debug!(root = %root.display(), "Loaded configuration");
    Ok(CommandContext::new(config, root))
}
