use deadpool_redis::{PoolError, redis::RedisError};
use thiserror::Error;

/// Identity-provider failures. "No session" is never one of these.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store unavailable: {0}")]
    Pool(#[from] PoolError),

    #[error("Session store error: {0}")]
    Redis(#[from] RedisError),

    #[error("Corrupt session record: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session token error: {0}")]
    Token(String),
}
