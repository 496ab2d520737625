use crate::{
    abstract_trait::SessionResolverTrait,
    domain::{Credentials, Session},
    errors::SessionError,
};
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use tracing::{debug, error};
use uuid::Uuid;

/// Server-side sessions: the cookie holds an opaque id, Redis holds the session JSON.
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: Pool,
}

impl RedisSessionStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn key(session_id: &str) -> String {
        format!("session:{session_id}")
    }

    async fn get_conn(&self) -> Result<Connection, SessionError> {
        self.pool.get().await.map_err(|e| {
            error!("Failed to get Redis connection from pool: {:?}", e);
            SessionError::from(e)
        })
    }

    /// Stores `session` under a fresh id and returns that id for the cookie.
    pub async fn create_session(
        &self,
        session: &Session,
        ttl: Duration,
    ) -> Result<String, SessionError> {
        let session_id = Uuid::new_v4().to_string();
        let json_data = serde_json::to_string(session)?;
        let mut conn = self.get_conn().await?;

        let _: () = conn
            .set_ex(Self::key(&session_id), json_data, ttl.num_seconds().max(1) as u64)
            .await?;

        debug!("Session created for user_id: {}", session.user_id);
        Ok(session_id)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>, SessionError> {
        let mut conn = self.get_conn().await?;
        let data: Option<String> = conn.get(Self::key(session_id)).await?;

        match data {
            Some(data) => {
                let session = serde_json::from_str::<Session>(&data).map_err(|e| {
                    error!("Failed to deserialize session {}: {:?}", session_id, e);
                    SessionError::from(e)
                })?;
                debug!("Session retrieved for user_id: {}", session.user_id);
                Ok(Some(session))
            }
            None => {
                debug!("Session not found: {}", session_id);
                Ok(None)
            }
        }
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), SessionError> {
        let mut conn = self.get_conn().await?;
        let _: () = conn.del(Self::key(session_id)).await?;
        debug!("Session deleted: {}", session_id);
        Ok(())
    }
}

#[async_trait]
impl SessionResolverTrait for RedisSessionStore {
    async fn resolve_session(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Session>, SessionError> {
        match credentials.session_token() {
            Some(session_id) => self.get_session(session_id).await,
            None => Ok(None),
        }
    }

    async fn revoke_session(&self, credentials: &Credentials) -> Result<(), SessionError> {
        match credentials.session_token() {
            Some(session_id) => self.delete_session(session_id).await,
            None => Ok(()),
        }
    }
}
