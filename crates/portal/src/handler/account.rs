use crate::{
    domain::response::{ApiResponse, MeResponse, SessionStatusResponse},
    middleware::guard::RequestGuard,
    state::AppState,
};
use access::errors::HttpError;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};
use utoipa_axum::router::OpenApiRouter;

use crate::middleware::rate_limit::rate_limit_middleware;

pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Portal is up"
        })),
    )
}

#[utoipa::path(
    get,
    path = "/api/session",
    tag = "Account",
    responses(
        (status = 200, description = "Current session, if any", body = ApiResponse<SessionStatusResponse>)
    )
)]
pub async fn get_session_handler(guard: RequestGuard) -> impl IntoResponse {
    let session = guard.optional_session().await;

    Json(ApiResponse::success(
        "Session status",
        SessionStatusResponse {
            authenticated: session.is_some(),
            session,
        },
    ))
}

#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Account",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<MeResponse>),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn get_me_handler(guard: RequestGuard) -> Result<impl IntoResponse, HttpError> {
    let session = guard.require_session().await?;
    let effective_tier = guard.authoritative_tier(&session).await?;

    Ok(Json(ApiResponse::success(
        "Authenticated",
        MeResponse {
            session,
            effective_tier,
        },
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Account",
    responses(
        (status = 200, description = "Session ended and cookie cleared")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    guard: RequestGuard,
    jar: CookieJar,
) -> impl IntoResponse {
    // Cookie is cleared even when revoke fails.
    match guard.revoke().await {
        Ok(()) if guard.credentials().session_token().is_some() => info!("Session revoked"),
        Ok(()) => {}
        Err(e) => error!("Failed to revoke session, clearing cookie anyway: {e}"),
    }

    let jar = jar.remove(Cookie::build((state.session_cookie.clone(), "")).path("/"));

    (
        jar,
        Json(json!({
            "status": "success",
            "message": "Logged out"
        })),
    )
}

pub fn account_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/healthchecker", get(health_checker_handler))
        .route("/api/session", get(get_session_handler))
        .route("/api/me", get(get_me_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ))
        .with_state(app_state)
}
