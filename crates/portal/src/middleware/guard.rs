use crate::state::AppState;
use access::{
    domain::{Credentials, Denial, Session},
    errors::{GuardError, HttpError},
    model::{Role, Tier, TierRequirement},
    service::AuthGuard,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::{convert::Infallible, sync::Arc};

/// Session cookie first, then `Authorization: Bearer`.
pub fn extract_credentials(headers: &HeaderMap, cookie_name: &str) -> Credentials {
    let jar = CookieJar::from_headers(headers);

    jar.get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            headers
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .map(Credentials::from_token)
        .unwrap_or_default()
}

/// [`AuthGuard`] bound to the credentials of the current request.
pub struct RequestGuard {
    guard: AuthGuard,
    credentials: Credentials,
}

impl FromRequestParts<Arc<AppState>> for RequestGuard {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self {
            guard: state.guard.clone(),
            credentials: extract_credentials(&parts.headers, &state.session_cookie),
        })
    }
}

impl RequestGuard {
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn optional_session(&self) -> Option<Session> {
        self.guard.optional_session(&self.credentials).await
    }

    pub async fn require_session(&self) -> Result<Session, GuardError> {
        self.guard.require_session(&self.credentials).await
    }

    pub async fn require_any_role(&self, allowed: &[Role]) -> Result<Session, GuardError> {
        self.guard.require_any_role(&self.credentials, allowed).await
    }

    pub async fn require_tier(
        &self,
        requirement: impl Into<TierRequirement>,
    ) -> Result<(Session, Tier), GuardError> {
        self.guard.require_tier(&self.credentials, requirement).await
    }

    pub async fn require_verified_email(&self) -> Result<Session, GuardError> {
        self.guard.require_verified_email(&self.credentials).await
    }

    pub async fn check_tier(
        &self,
        session: Session,
        requirement: impl Into<TierRequirement>,
    ) -> Result<(Session, Tier), GuardError> {
        self.guard.check_tier(session, requirement).await
    }

    /// Stored tier for an already resolved session, without recording a tier decision.
    pub async fn authoritative_tier(&self, session: &Session) -> Result<Tier, GuardError> {
        self.guard.authoritative_tier(session).await
    }

    pub async fn revoke(&self) -> Result<(), GuardError> {
        self.guard
            .sessions()
            .revoke_session(&self.credentials)
            .await
            .map_err(GuardError::from)
    }
}

/// Page-route adapter: denials become redirects, infrastructure errors stay errors.
#[derive(Debug)]
pub struct PageRejection {
    error: GuardError,
    path: &'static str,
}

impl PageRejection {
    pub fn new(error: GuardError, path: &'static str) -> Self {
        Self { error, path }
    }

    pub fn redirect_target(denial: &Denial, path: &str) -> String {
        match denial {
            Denial::Unauthenticated => format!("/login?callbackUrl={path}"),
            Denial::Forbidden { role, .. } => role.dashboard_path().to_string(),
            Denial::ForbiddenTier { required, .. } => format!("/pricing?required={required}"),
            Denial::EmailNotVerified => "/verify-email".to_string(),
        }
    }
}

impl IntoResponse for PageRejection {
    fn into_response(self) -> Response {
        match self.error {
            GuardError::Denied(denial) => {
                Redirect::to(&Self::redirect_target(&denial, self.path)).into_response()
            }
            other => HttpError::from(other).into_response(),
        }
    }
}

/// Binds a page path to guard results so handlers can use `?`.
pub trait OrRedirect<T> {
    fn or_redirect(self, path: &'static str) -> Result<T, PageRejection>;
}

impl<T> OrRedirect<T> for Result<T, GuardError> {
    fn or_redirect(self, path: &'static str) -> Result<T, PageRejection> {
        self.map_err(|e| PageRejection::new(e, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));

        let creds = extract_credentials(&headers, "session");
        assert_eq!(creds.session_token(), Some("abc"));
    }

    #[test]
    fn bearer_is_the_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));

        assert_eq!(
            extract_credentials(&headers, "session").session_token(),
            Some("xyz")
        );
        assert_eq!(
            extract_credentials(&HeaderMap::new(), "session"),
            Credentials::anonymous()
        );
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(
            PageRejection::redirect_target(&Denial::Unauthenticated, "/dashboard/admin"),
            "/login?callbackUrl=/dashboard/admin"
        );
        assert_eq!(
            PageRejection::redirect_target(
                &Denial::Forbidden {
                    role: Role::Customer,
                    allowed: vec![Role::Admin],
                },
                "/dashboard/admin"
            ),
            "/dashboard/customer"
        );
        assert_eq!(
            PageRejection::redirect_target(
                &Denial::ForbiddenTier {
                    required: Tier::Business,
                    actual: Tier::Pro,
                },
                "/dashboard/business"
            ),
            "/pricing?required=business"
        );
    }
}
