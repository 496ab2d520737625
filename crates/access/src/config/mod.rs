mod database;
mod jwt;
mod redis;

pub use self::database::{ConnectionManager, ConnectionPool, DatabaseConfig};
pub use self::jwt::JwtConfig;
pub use self::redis::{RedisClient, RedisConfig};
