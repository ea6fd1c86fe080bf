mod makes;
mod models;
mod mutate;
mod query;
mod serve;
mod utils;

pub use makes::handle_makes;
pub use models::handle_models;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use serve::handle_serve;

use crate::config::LedgerConfig;
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: LedgerConfig,
    pub root: PathBuf,
}

impl CommandContext {
    pub fn new(config: LedgerConfig, root: PathBuf) -> Self {
        Self { config, root }
    }

    /// The endpoint given on the command line, or the configured server's.
    pub fn endpoint(&self, endpoint: Option<String>) -> String {
        endpoint.unwrap_or_else(|| self.config.server.endpoint_url())
    }
}
