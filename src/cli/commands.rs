use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "carledger")]
#[command(
    author,
    version,
    about = "An in-memory people and car registry served over GraphQL"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .carledger.yml by default)
    #[arg(long, global = true, env = "CARLEDGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to a file, rotated daily (platform data dir if no path given)
    #[arg(long, global = true, num_args = 0..=1)]
    pub log_file: Option<Option<PathBuf>>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the GraphQL HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Execute a GraphQL query against a running server
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,

        /// GraphQL endpoint (defaults to the configured server)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,

        /// GraphQL endpoint (defaults to the configured server)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List vehicle makes from the catalog
    Makes {
        /// Only show makes whose name contains this text
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up model names for a make
    Models {
        /// Make name, e.g. "honda"
        make: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
