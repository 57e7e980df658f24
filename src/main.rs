//! # Main — CLI Entry Point
//!
//! Routes CLI subcommands to the server and database bootstrap functions.
//! Handles shared concerns: environment loading, structured logging, and the
//! database connection URL.
//!
//! ## Subcommands
//!
//! - `serve`: start the registry HTTP API server.
//! - `init-db`: apply the registry schema to the configured database.
//!
//! ## Global Options
//!
//! - `--database-url` / `DATABASE_URL`: PostgreSQL connection for voter
//!   storage.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rollcall", about = "Voter-registry record store and HTTP API")]
struct Cli {
    /// PostgreSQL connection URL (or set DATABASE_URL env var)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the registry HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },
    /// Apply the registry schema to the database
    InitDb,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Structured logging: LOG_FORMAT=json for K8s, human-readable otherwise
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt().json().with_target(false).init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { port } => cli::run_serve(&cli, *port),
        Commands::InitDb => cli::run_init_db(&cli),
    }
}
