use anyhow::Result;
use tracing::debug;

use super::CommandContext;
use super::utils::{execute_remote, parse_variables, print_response};

pub fn handle_query(
    ctx: CommandContext,
    query: String,
    variables: Option<String>,
    endpoint: Option<String>,
) -> Result<()> {
    let endpoint = ctx.endpoint(endpoint);
    let vars = parse_variables(variables)?;
    debug!(%endpoint, "Sending query");

    let response = execute_remote(&endpoint, &query, vars)?;
    print_response(&response)
}
