use core::fmt::Display;
use core::str::FromStr;
use core::time::Duration;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use checkup_structs::SchemaVariant;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_PREDICTOR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Upper bound on pooled database connections
    pub database_max_connections: u32,

    /// Base URL of the prediction service
    pub server_url: String,

    /// Shared secret sent to the prediction service
    pub api_secret_key: String,

    /// Questionnaire collected by this deployment
    pub checkup_schema: SchemaVariant,

    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,

    /// Timeout for a single prediction request
    pub predictor_timeout: Duration,

    /// Optional file that receives a copy of the logs
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables, reading `.env` first.
    ///
    /// Required environment variables:
    /// - `DATABASE_URL`: `PostgreSQL` connection string
    /// - `SERVER_URL`: base URL of the prediction service
    /// - `API_SECRET_KEY`: value sent in the `x-api-key` header
    ///
    /// Optional environment variables:
    /// - `CHECKUP_SCHEMA`: `workplace` (default) or `lifestyle`
    /// - `BIND_ADDRESS`: listen address (default: `0.0.0.0:3000`)
    /// - `PREDICTOR_TIMEOUT_SECS`: prediction request timeout (default: 30)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `NURA_LOG_FILE`: also write logs to this file
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or a
    /// value cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if required keys are missing or a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .with_context(|| format!("{key} environment variable not set"))
        };

        let database_url = required("DATABASE_URL")?;
        let server_url = required("SERVER_URL")?.trim_end_matches('/').to_owned();
        let api_secret_key = required("API_SECRET_KEY")?;

        let checkup_schema = parse_or(&lookup, "CHECKUP_SCHEMA", SchemaVariant::default())?;
        let bind_address = parse_or(
            &lookup,
            "BIND_ADDRESS",
            DEFAULT_BIND_ADDRESS
                .parse::<SocketAddr>()
                .context("default bind address is invalid")?,
        )?;
        let predictor_timeout = Duration::from_secs(non_zero(
            "PREDICTOR_TIMEOUT_SECS",
            parse_or(&lookup, "PREDICTOR_TIMEOUT_SECS", DEFAULT_PREDICTOR_TIMEOUT_SECS)?,
        )?);
        let database_max_connections = non_zero(
            "DATABASE_MAX_CONNECTIONS",
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        )?;
        let log_file = lookup("NURA_LOG_FILE")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            database_max_connections,
            server_url,
            api_secret_key,
            checkup_schema,
            bind_address,
            predictor_timeout,
            log_file,
        })
    }
}

/// Parses an optional key, falling back to `default` when it is unset.
fn parse_or<T>(lookup: impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key).filter(|value| !value.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|err| anyhow!("invalid value '{raw}' for {key}: {err}")),
        None => Ok(default),
    }
}

/// Rejects zero for settings that must be positive.
fn non_zero<T>(key: &str, value: T) -> anyhow::Result<T>
where
    T: Default + PartialEq,
{
    if value == T::default() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}
