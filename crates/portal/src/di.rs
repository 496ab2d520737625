use crate::config::{Config, SessionBackend};
use access::{
    abstract_trait::{DynJwtService, DynSessionResolver, DynUserRecordRepository},
    cache::RedisSessionStore,
    config::{ConnectionPool, JwtConfig},
    repository::UserRecordRepository,
    service::JwtSessionResolver,
};
use deadpool_redis::Pool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct DependenciesInject {
    pub sessions: DynSessionResolver,
    pub users: DynUserRecordRepository,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("sessions", &"DynSessionResolver")
            .field("users", &"DynUserRecordRepository")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(config: &Config, db_pool: ConnectionPool, redis_pool: Pool) -> Self {
        let sessions: DynSessionResolver = match config.session_backend {
            SessionBackend::Jwt => {
                info!("Resolving sessions from signed JWT cookies");
                let jwt = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
                Arc::new(JwtSessionResolver::new(jwt))
            }
            SessionBackend::Redis => {
                info!("Resolving sessions from the Redis session store");
                Arc::new(RedisSessionStore::new(redis_pool))
            }
        };

        let users: DynUserRecordRepository = Arc::new(UserRecordRepository::new(db_pool));

        Self { sessions, users }
    }
}
