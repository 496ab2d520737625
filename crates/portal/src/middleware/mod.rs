pub mod guard;
pub mod rate_limit;
pub mod validate;
