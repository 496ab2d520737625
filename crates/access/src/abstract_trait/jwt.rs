use crate::{
    domain::{Session, SessionClaims},
    errors::ServiceError,
};
use chrono::Duration;
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, session: &Session, ttl: Duration) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str) -> Result<SessionClaims, ServiceError>;
}
