use crate::{
    abstract_trait::UserRecordRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{UserRecord, UserRow},
};
use async_trait::async_trait;
use tracing::{debug, error};

pub struct UserRecordRepository {
    db_pool: ConnectionPool,
}

impl UserRecordRepository {
    pub fn new(db_pool: ConnectionPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRecordRepositoryTrait for UserRecordRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let mut conn = self.db_pool.acquire().await.map_err(|e| {
            error!("Failed to acquire DB connection: {}", e);
            RepositoryError::from(e)
        })?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, role, subscription_tier, subscription_status, email_verified
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("Failed to fetch user record {}: {}", user_id, e);
            RepositoryError::from(e)
        })?;

        debug!("User record lookup for {}: found={}", user_id, row.is_some());

        Ok(row.map(UserRecord::from))
    }
}
