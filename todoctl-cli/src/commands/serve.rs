//! HTTP server command
//!
//! Connects to PostgreSQL, applies migrations, and serves the todo API.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::auth::TokenIssuer;
use todoctl_server::db::{create_pool_with_options, migrations};
use todoctl_server::http::{run_server, ServerConfig};

use crate::config::{signing_key, TodoConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: [server] host/port from config)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Do not apply schema migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &TodoConfig) -> Result<()> {
    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config.bind_addr()?,
    };
    let database_url = args.database_url.unwrap_or_else(|| config.database_url());

    let key = signing_key()?;
    let ttl = config.token_ttl()?;
    let tokens = TokenIssuer::new(key.as_bytes(), config.auth.issuer.clone(), ttl)
        .context("Failed to initialise token issuer")?;

    let pool = create_pool_with_options(&database_url, config.db.max_connections)
        .await
        .context("Failed to create database pool")?;

    if !args.skip_migrations {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    tracing::info!("Starting todoctl server on {}", bind_addr);

    // Blocks until shutdown
    run_server(pool, tokens, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
