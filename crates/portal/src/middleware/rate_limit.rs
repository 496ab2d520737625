use crate::state::AppState;
use access::errors::HttpError;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::warn;

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let client_ip = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let key = format!("rate_limit:{client_ip}");
    let decision = state.rate_limit.check_rate_limit(&key).await;

    if !decision.allowed {
        warn!(
            "Rate limit exceeded for IP: {} (requests: {}/{})",
            client_ip, decision.current, decision.limit
        );
        return Err(HttpError::TooManyRequests(
            "Too many requests, please try again later".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
