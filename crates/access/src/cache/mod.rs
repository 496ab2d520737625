mod session;

pub use self::session::RedisSessionStore;
