//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the
//! execution logic for each subcommand: server startup and schema
//! bootstrapping.

use anyhow::Result;
use rollcall::{db, server};
use tracing::info;

use super::Cli;

/// Start the registry HTTP API server on the given port.
pub fn run_serve(cli: &Cli, port: u16) -> Result<()> {
    let database_url = require_database_url(cli)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::run(port, &database_url))
}

/// Apply the registry schema so a fresh database is ready to serve.
pub fn run_init_db(cli: &Cli) -> Result<()> {
    let database_url = require_database_url(cli)?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let database = db::Database::connect(&database_url).await?;
        database.apply_schema().await?;
        info!("registry schema applied");
        Ok(())
    })
}

fn require_database_url(cli: &Cli) -> Result<String> {
    cli.database_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required (set via --database-url or env)"))
}
