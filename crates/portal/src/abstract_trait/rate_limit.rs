use async_trait::async_trait;
use std::sync::Arc;

pub type DynRateLimitMiddleware = Arc<dyn RateLimitMiddlewareTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub current: u32,
    pub limit: u32,
}

#[async_trait]
pub trait RateLimitMiddlewareTrait {
    async fn check_rate_limit(&self, key: &str) -> RateLimitDecision;
}
