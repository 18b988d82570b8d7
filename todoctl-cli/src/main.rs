//! todoctl - multi-user todo list REST backend
//!
//! Subcommands:
//! - `serve`: run the HTTP API (applies migrations first)
//! - `migrate`: apply the database schema and exit

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::TodoConfig;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Multi-user todo list REST backend"
)]
struct Cli {
    /// Path to config file (default: configs/config.toml, then ~/.todoctl/config.toml)
    #[arg(long, short = 'c', global = true, env = "TODOCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply database migrations and exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    config::load_dotenv();

    let config = TodoConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, &config).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args, &config).await,
    }
}
