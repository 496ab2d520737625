use crate::{errors::RepositoryError, model::UserRecord};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserRecordRepository = Arc<dyn UserRecordRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserRecordRepositoryTrait {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError>;
}
