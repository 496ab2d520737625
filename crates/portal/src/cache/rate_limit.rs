use crate::abstract_trait::{RateLimitDecision, RateLimitMiddlewareTrait};
use async_trait::async_trait;
use deadpool_redis::{Pool, redis};
use tracing::{debug, warn};

/// Fixed-window request counter kept in Redis.
#[derive(Clone)]
pub struct RateLimiter {
    pool: Pool,
    max_requests: u32,
    window_seconds: u32,
}

impl RateLimiter {
    pub fn new(pool: Pool, max_requests: u32, window_seconds: u32) -> Self {
        Self {
            pool,
            max_requests,
            window_seconds,
        }
    }

    fn allow(&self, current: u32) -> RateLimitDecision {
        RateLimitDecision {
            allowed: true,
            current,
            limit: self.max_requests,
        }
    }
}

#[async_trait]
impl RateLimitMiddlewareTrait for RateLimiter {
    /// Fails open: with Redis unreachable requests keep flowing.
    async fn check_rate_limit(&self, key: &str) -> RateLimitDecision {
        let mut conn = match self.pool.get().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Rate limiter has no Redis connection, allowing request: {:?}", e);
                return self.allow(0);
            }
        };

        let result: redis::RedisResult<(u32, bool)> = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(self.window_seconds)
            .arg("NX")
            .query_async(&mut conn)
            .await;

        match result {
            Ok((current, _)) if current > self.max_requests => {
                debug!("Rate limit exceeded for key: {key}");
                RateLimitDecision {
                    allowed: false,
                    current,
                    limit: self.max_requests,
                }
            }
            Ok((current, _)) => self.allow(current),
            Err(e) => {
                warn!("Rate limiter Redis error, allowing request: {:?}", e);
                self.allow(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadpool_redis::{Config, Runtime};

    #[tokio::test]
    async fn unreachable_redis_fails_open() {
        let pool = Config::from_url("redis://127.0.0.1:1")
            .create_pool(Some(Runtime::Tokio1))
            .unwrap();
        let limiter = RateLimiter::new(pool, 5, 60);

        for _ in 0..10 {
            let decision = limiter.check_rate_limit("rate_limit:10.0.0.1").await;
            assert!(decision.allowed);
            assert_eq!(decision.limit, 5);
        }
    }
}
