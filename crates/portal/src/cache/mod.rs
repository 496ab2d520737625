mod rate_limit;

pub use self::rate_limit::RateLimiter;
