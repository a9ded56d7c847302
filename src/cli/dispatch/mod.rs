use crate::cli::{
    actions::{Action, server},
    commands::{ARG_DSN, ARG_MAX_CONNECTIONS, ARG_PORT},
};
use anyhow::{Context, Result};

/// Build the action from parsed arguments.
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server(server::Args {
        port: matches
            .get_one::<u16>(ARG_PORT)
            .copied()
            .context("missing required argument: --port")?,
        dsn: matches
            .get_one::<String>(ARG_DSN)
            .cloned()
            .context("missing required argument: --dsn")?,
        max_connections: matches
            .get_one::<u32>(ARG_MAX_CONNECTIONS)
            .copied()
            .context("missing required argument: --max-connections")?,
    }))
}
