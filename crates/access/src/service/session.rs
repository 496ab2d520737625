use crate::{
    abstract_trait::{DynJwtService, SessionResolverTrait},
    domain::{Credentials, Session},
    errors::{ServiceError, SessionError},
};
use async_trait::async_trait;
use tracing::debug;

/// Stateless sessions carried in a signed token.
#[derive(Clone)]
pub struct JwtSessionResolver {
    jwt: DynJwtService,
}

impl JwtSessionResolver {
    pub fn new(jwt: DynJwtService) -> Self {
        Self { jwt }
    }
}

#[async_trait]
impl SessionResolverTrait for JwtSessionResolver {
    async fn resolve_session(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Session>, SessionError> {
        let Some(token) = credentials.session_token() else {
            return Ok(None);
        };

        match self.jwt.verify_token(token) {
            Ok(claims) => Ok(Some(Session::from(claims))),
            Err(ServiceError::TokenExpired) => {
                debug!("Session token expired");
                Ok(None)
            }
            Err(ServiceError::Jwt(e)) => {
                debug!("Rejected session token: {e}");
                Ok(None)
            }
            Err(other) => Err(SessionError::Token(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::JwtServiceTrait,
        config::JwtConfig,
        model::{Role, Tier},
    };
    use chrono::Duration;
    use std::sync::Arc;

    fn resolver() -> (JwtSessionResolver, Arc<JwtConfig>) {
        let jwt = Arc::new(JwtConfig::new("resolver-secret"));
        (JwtSessionResolver::new(jwt.clone()), jwt)
    }

    #[tokio::test]
    async fn valid_token_resolves() {
        let (resolver, jwt) = resolver();
        let session = Session::new("t1", Role::Tradesperson).with_tier(Tier::Pro);
        let token = jwt.generate_token(&session, Duration::minutes(10)).unwrap();

        let resolved = resolver
            .resolve_session(&Credentials::from_token(token))
            .await
            .unwrap();

        assert_eq!(resolved, Some(session));
    }

    #[tokio::test]
    async fn absent_or_bad_tokens_are_no_session() {
        let (resolver, jwt) = resolver();
        let expired = jwt
            .generate_token(&Session::new("t1", Role::Admin), Duration::minutes(-1))
            .unwrap();

        for creds in [
            Credentials::anonymous(),
            Credentials::from_token("   "),
            Credentials::from_token("not-a-jwt"),
            Credentials::from_token(expired),
        ] {
            assert_eq!(resolver.resolve_session(&creds).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn revoke_is_a_no_op() {
        let (resolver, _) = resolver();
        assert!(
            resolver
                .revoke_session(&Credentials::from_token("whatever"))
                .await
                .is_ok()
        );
    }
}
