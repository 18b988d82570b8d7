//! Apply the database schema without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::db::{create_pool, migrations};

use crate::config::TodoConfig;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs, config: &TodoConfig) -> Result<()> {
    let database_url = args.database_url.unwrap_or_else(|| config.database_url());

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    Ok(())
}
