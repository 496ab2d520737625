use access::config::{DatabaseConfig, RedisConfig};
use anyhow::{Context, Result, anyhow};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Jwt,
    Redis,
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jwt" => Ok(SessionBackend::Jwt),
            "redis" => Ok(SessionBackend::Redis),
            other => Err(anyhow!(
                "SESSION_BACKEND must be 'jwt' or 'redis', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_seconds: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub session_backend: SessionBackend,
    pub session_cookie: String,
    pub redis: RedisConfig,
    pub rate_limit: RateLimitConfig,
    pub dev_mode: bool,
    pub enable_file_log: bool,
    pub otel_endpoint: Option<String>,
}

fn required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing environment variable: {key}"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

fn flag(key: &str) -> bool {
    optional(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

impl Config {
    pub fn init() -> Result<Self> {
        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;
        let mut database = DatabaseConfig::new(required("DATABASE_URL")?);
        database.max_connections = parsed_or("DB_MAX_CONNECTIONS", database.max_connections)?;
        database.acquire_timeout_secs =
            parsed_or("DB_ACQUIRE_TIMEOUT_SECS", database.acquire_timeout_secs)?;
        let jwt_secret = required("JWT_SECRET")?;

        let session_backend = parsed_or("SESSION_BACKEND", SessionBackend::Jwt)?;
        let session_cookie = optional("SESSION_COOKIE").unwrap_or_else(|| "session".into());

        let redis = RedisConfig::new(
            optional("REDIS_HOST").unwrap_or_else(|| "redis".into()),
            parsed_or("REDIS_PORT", 6379u16)?,
            parsed_or("REDIS_DB", 0u8)?,
            optional("REDIS_PASSWORD"),
        );

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: parsed_or("RATE_LIMIT_MAX", defaults.max_requests)?,
            window_seconds: parsed_or("RATE_LIMIT_WINDOW_SECS", defaults.window_seconds)?,
        };

        Ok(Self {
            port,
            database,
            jwt_secret,
            session_backend,
            session_cookie,
            redis,
            rate_limit,
            dev_mode: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
            otel_endpoint: optional("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_backend_parses() {
        assert_eq!("JWT".parse::<SessionBackend>().unwrap(), SessionBackend::Jwt);
        assert_eq!(
            "redis".parse::<SessionBackend>().unwrap(),
            SessionBackend::Redis
        );
        assert!("cookie".parse::<SessionBackend>().is_err());
    }
}
