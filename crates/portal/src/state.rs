use crate::{
    abstract_trait::DynRateLimitMiddleware,
    cache::RateLimiter,
    config::Config,
    di::DependenciesInject,
};
use access::{
    config::{ConnectionManager, RedisClient},
    service::AuthGuard,
    utils::{Metrics, SystemMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub guard: AuthGuard,
    pub di_container: DependenciesInject,
    pub rate_limit: DynRateLimitMiddleware,
    pub session_cookie: String,
    pub registry: Arc<Mutex<Registry>>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Initializing Redis connection for the portal");
        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;
        redis.ping().await.context("Failed to ping Redis server")?;

        let db_pool = ConnectionManager::new_pool(&config.database)
            .await
            .context("Failed to connect to the user store")?;

        let rate_limit = Arc::new(RateLimiter::new(
            redis.pool.clone(),
            config.rate_limit.max_requests,
            config.rate_limit.window_seconds,
        )) as DynRateLimitMiddleware;

        let di_container = DependenciesInject::new(config, db_pool, redis.pool.clone());

        let state = Self::from_dependencies(di_container, rate_limit, &config.session_cookie);

        let system_metrics = Arc::new(SystemMetrics::new());
        system_metrics.register(&mut *state.registry.lock().await);
        tokio::spawn(run_metrics_collector(system_metrics));

        Ok(state)
    }

    /// Wires the guard from already-built collaborators; no network access.
    pub fn from_dependencies(
        di_container: DependenciesInject,
        rate_limit: DynRateLimitMiddleware,
        session_cookie: &str,
    ) -> Self {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry);

        let guard = AuthGuard::new(
            di_container.sessions.clone(),
            di_container.users.clone(),
            metrics,
        );

        Self {
            guard,
            di_container,
            rate_limit,
            session_cookie: session_cookie.to_string(),
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
