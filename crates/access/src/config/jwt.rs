use crate::{
    abstract_trait::JwtServiceTrait,
    domain::{Session, SessionClaims},
    errors::ServiceError,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").field("secret", &"***").finish()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, session: &Session, ttl: Duration) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp().max(0) as usize;
        let exp = (now + ttl).timestamp().max(0) as usize;

        let claims = SessionClaims::for_session(session, iat, exp);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str) -> Result<SessionClaims, ServiceError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    ServiceError::TokenExpired
                } else {
                    ServiceError::Jwt(e)
                }
            })?;

        let current_time = Utc::now().timestamp().max(0) as usize;
        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
