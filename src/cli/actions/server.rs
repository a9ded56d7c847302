use crate::{
    credentials::{CredentialService, SqliteUserStore},
    credo,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub max_connections: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database cannot be opened or initialized, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!("Server args: {:?}", args);

    let store = SqliteUserStore::connect(&args.dsn, args.max_connections)
        .await
        .context("Failed to connect to database")?;

    // Table must exist before the first request is accepted
    store
        .init()
        .await
        .context("Failed to initialize users table")?;

    info!("Database ready");

    let service = Arc::new(CredentialService::new(store));

    credo::new(args.port, service).await
}
