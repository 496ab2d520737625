use crate::{
    domain::Denial,
    errors::{
        error::ErrorResponse, guard::GuardError, repository::RepositoryError,
        service::ServiceError,
    },
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    TooManyRequests(String),
    Internal(String),
    Denied(Denial),
}

impl From<GuardError> for HttpError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Denied(denial) => HttpError::Denied(denial),
            GuardError::Session(e) => {
                error!("Session provider failure: {e}");
                HttpError::Internal("Session provider unavailable".into())
            }
            GuardError::Store(e) => {
                error!("User store failure during authorization: {e}");
                HttpError::Internal("User store unavailable".into())
            }
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        error!("Repository failure: {err}");
        HttpError::Internal("Repository error".into())
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {errors:?}"))
            }
            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),
            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),
        }
    }
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Denied(Denial::Unauthenticated) => StatusCode::UNAUTHORIZED,
            HttpError::Denied(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            HttpError::Denied(denial) => {
                let details = match &denial {
                    Denial::ForbiddenTier { required, actual } => Some(json!({
                        "required_tier": required,
                        "current_tier": actual,
                    })),
                    Denial::Forbidden { allowed, .. } => Some(json!({
                        "allowed_roles": allowed,
                    })),
                    _ => None,
                };

                ErrorResponse {
                    status: "fail".into(),
                    message: denial.to_string(),
                    code: Some(denial.code().into()),
                    details,
                }
            }
            HttpError::BadRequest(msg)
            | HttpError::Unauthorized(msg)
            | HttpError::NotFound(msg)
            | HttpError::TooManyRequests(msg) => ErrorResponse::fail(msg),
            HttpError::Internal(msg) => ErrorResponse {
                status: "error".into(),
                message: msg,
                code: None,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
