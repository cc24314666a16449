//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from `CASCII_*` environment variables, a configuration file or
//! command-line flags, and are validated into typed settings before the
//! server starts.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_SHORT_KEY_MAX_LENGTH, DEFAULT_SHORT_KEY_MIN_LENGTH, KeyLengthPolicy,
    KeyLengthPolicyError,
};
use crate::outbound::persistence::{DEFAULT_POOL_MAX_SIZE, PoolConfig};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CASCII")]
pub struct AppSettings {
    /// Postgres connection string. Required.
    pub database_url: Option<String>,
    /// Socket address the HTTP listener binds to.
    pub bind_address: Option<String>,
    /// Set the `Secure` attribute on the session cookie. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Shortest digest prefix tried when publishing.
    pub short_key_min_length: Option<usize>,
    /// Longest digest prefix tried when publishing.
    pub short_key_max_length: Option<usize>,
    /// Apply embedded migrations before serving. Defaults to `true`.
    pub run_migrations: Option<bool>,
}

/// Configuration rejected at startup.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set CASCII_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind_address `{value}` is not a socket address: {source}")]
    InvalidBindAddress {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("pool_max_size must be at least 1")]
    EmptyPool,
    #[error(transparent)]
    KeyLengths(#[from] KeyLengthPolicyError),
}

/// Validated settings consumed by the server bootstrap.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub cookie_secure: bool,
    pub pool: PoolConfig,
    pub key_lengths: KeyLengthPolicy,
    pub run_migrations: bool,
}

impl AppSettings {
    /// Check every value and apply defaults.
    pub fn validate(&self) -> Result<ServerSettings, SettingsError> {
        let database_url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;

        let raw_bind = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        let bind_addr =
            raw_bind
                .parse()
                .map_err(|source| SettingsError::InvalidBindAddress {
                    value: raw_bind.to_owned(),
                    source,
                })?;

        let max_size = self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE);
        if max_size == 0 {
            return Err(SettingsError::EmptyPool);
        }
        let timeout = self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS);
        let pool = PoolConfig::new(database_url)
            .with_max_size(max_size)
            .with_connection_timeout(Duration::from_secs(timeout));

        let key_lengths = KeyLengthPolicy::new(
            self.short_key_min_length
                .unwrap_or(DEFAULT_SHORT_KEY_MIN_LENGTH),
            self.short_key_max_length
                .unwrap_or(DEFAULT_SHORT_KEY_MAX_LENGTH),
        )?;

        Ok(ServerSettings {
            bind_addr,
            cookie_secure: self.cookie_secure.unwrap_or(true),
            pool,
            key_lengths,
            run_migrations: self.run_migrations.unwrap_or(true),
        })
    }
}
