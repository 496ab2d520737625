mod rate_limit;

pub use self::rate_limit::{DynRateLimitMiddleware, RateLimitDecision, RateLimitMiddlewareTrait};
