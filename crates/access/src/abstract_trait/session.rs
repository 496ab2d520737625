use crate::{
    domain::{Credentials, Session},
    errors::SessionError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynSessionResolver = Arc<dyn SessionResolverTrait + Send + Sync>;

#[async_trait]
pub trait SessionResolverTrait {
    /// `Ok(None)` when the request carries no usable session.
    async fn resolve_session(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Session>, SessionError>;

    /// Ends the session behind `credentials`. Stateless backends have nothing to do.
    async fn revoke_session(&self, _credentials: &Credentials) -> Result<(), SessionError> {
        Ok(())
    }
}
