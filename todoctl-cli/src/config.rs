//! todoctl configuration
//!
//! Non-secret settings come from a TOML file; secrets come from the
//! environment (optionally seeded from `.env`).
//!
//! Lookup order for the file:
//!   1. `--config <path>` (must exist)
//!   2. `./configs/config.toml`
//!   3. `~/.todoctl/config.toml`
//!   4. built-in defaults
//!
//! Environment variables:
//!   DB_PASSWORD            # database password
//!   DATABASE_URL           # full connection string, overrides [db]
//!   TODOCTL_SIGNING_KEY    # HMAC key for bearer tokens (required to serve)

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use todoctl_server::auth::MAX_TOKEN_TTL;
use tracing::debug;

pub const SIGNING_KEY_VAR: &str = "TODOCTL_SIGNING_KEY";
pub const DB_PASSWORD_VAR: &str = "DB_PASSWORD";
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    pub server: ServerSection,
    pub db: DbSection,
    pub auth: AuthSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbSection {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub name: String,
    pub sslmode: String,
    pub max_connections: u32,
}

impl Default for DbSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            name: "postgres".to_string(),
            sslmode: "disable".to_string(),
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub issuer: String,
    pub token_ttl_hours: u64,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            issuer: "todoctl".to_string(),
            token_ttl_hours: 12,
        }
    }
}

impl TodoConfig {
    /// Load config from an explicit path, or the first default location
    /// that exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for path in Self::default_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML")
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("configs/config.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".todoctl/config.toml"));
        }
        paths
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid server address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }

    /// `[auth] token_ttl_hours` as a duration, bounded by `MAX_TOKEN_TTL`.
    pub fn token_ttl(&self) -> Result<Duration> {
        let hours = self.auth.token_ttl_hours;
        let ttl = hours
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .filter(|ttl| hours > 0 && *ttl <= MAX_TOKEN_TTL);

        ttl.with_context(|| {
            format!(
                "[auth] token_ttl_hours must be between 1 and {}, got {}",
                MAX_TOKEN_TTL.as_secs() / 3600,
                hours
            )
        })
    }

    /// `DATABASE_URL` if set, otherwise assembled from `[db]` + `DB_PASSWORD`.
    pub fn database_url(&self) -> String {
        if let Ok(url) = env::var(DATABASE_URL_VAR) {
            return url;
        }
        build_database_url(&self.db, env::var(DB_PASSWORD_VAR).ok().as_deref())
    }
}

/// Assemble a PostgreSQL connection string.
pub fn build_database_url(db: &DbSection, password: Option<&str>) -> String {
    let credentials = match password {
        Some(password) if !password.is_empty() => format!(
            "{}:{}",
            urlencoding::encode(&db.username),
            urlencoding::encode(password)
        ),
        _ => urlencoding::encode(&db.username).into_owned(),
    };

    format!(
        "postgres://{}@{}:{}/{}?sslmode={}",
        credentials, db.host, db.port, db.name, db.sslmode
    )
}

/// Read the token signing key from the environment.
pub fn signing_key() -> Result<String> {
    let key = env::var(SIGNING_KEY_VAR).with_context(|| {
        format!(
            "{} not set. Export it or add it to .env / ~/.todoctl/.env",
            SIGNING_KEY_VAR
        )
    })?;
    if key.is_empty() {
        anyhow::bail!("{} must not be empty", SIGNING_KEY_VAR);
    }
    Ok(key)
}

/// Load `.env` from the current directory, then `~/.todoctl/.env`.
///
/// Existing environment variables are never overwritten.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".todoctl").join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(_) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}
