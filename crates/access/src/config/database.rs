use anyhow::{Context, Result};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::info;

pub type ConnectionPool = Pool<Postgres>;

/// User-store connection settings. Guards do one lookup per tier check, so the pool stays small.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }
}

pub struct ConnectionManager;

impl ConnectionManager {
    pub fn options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs.max(1)))
    }

    pub async fn new_pool(config: &DatabaseConfig) -> Result<ConnectionPool> {
        info!(
            "Connecting to the user store (max {} connections)",
            config.max_connections
        );

        Self::options(config)
            .connect(&config.url)
            .await
            .context("Failed to create database connection pool")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_options_follow_config() {
        let mut config = DatabaseConfig::new("postgres://localhost/portal");
        config.max_connections = 12;
        config.acquire_timeout_secs = 3;

        let options = ConnectionManager::options(&config);
        assert_eq!(options.get_max_connections(), 12);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn zero_values_are_clamped() {
        let mut config = DatabaseConfig::new("postgres://localhost/portal");
        config.max_connections = 0;
        config.acquire_timeout_secs = 0;

        let options = ConnectionManager::options(&config);
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(1));
    }
}
