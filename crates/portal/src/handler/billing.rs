use crate::{
    domain::{
        requests::FeeQuoteRequest,
        response::{AnalyticsResponse, ApiResponse},
    },
    middleware::{
        guard::RequestGuard,
        rate_limit::rate_limit_middleware,
        validate::{SimpleValidatedJson, ValidationRejection},
    },
    state::AppState,
};
use access::{
    errors::HttpError,
    model::{Role, Tier},
    service::{FeeQuote, PlatformFee},
};
use axum::{
    Json, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const TRADE_ROLES: [Role; 3] = [Role::Tradesperson, Role::BusinessOwner, Role::Admin];

#[utoipa::path(
    get,
    path = "/api/tradesperson/analytics",
    tag = "Billing",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Analytics for pro and business subscribers", body = ApiResponse<AnalyticsResponse>),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Wrong role or tier below pro")
    )
)]
pub async fn get_analytics_handler(guard: RequestGuard) -> Result<impl IntoResponse, HttpError> {
    let session = guard.require_any_role(&TRADE_ROLES).await?;
    let (session, tier) = guard.check_tier(session, Tier::Pro).await?;

    Ok(Json(ApiResponse::success(
        "Analytics",
        AnalyticsResponse {
            user_id: session.user_id,
            tier,
            platform_fee_bps: PlatformFee::rate_bps(tier),
        },
    )))
}

#[utoipa::path(
    post,
    path = "/api/fees/quote",
    tag = "Billing",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = FeeQuoteRequest,
    responses(
        (status = 200, description = "Platform fee at the caller's tier", body = ApiResponse<FeeQuote>),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Email not verified")
    )
)]
pub async fn quote_fee_handler(
    guard: RequestGuard,
    body: Result<SimpleValidatedJson<FeeQuoteRequest>, ValidationRejection>,
) -> Result<impl IntoResponse, Response> {
    let session = guard
        .require_verified_email()
        .await
        .map_err(|e| HttpError::from(e).into_response())?;

    // Body is inspected only after the guard has passed.
    let SimpleValidatedJson(body) = body.map_err(IntoResponse::into_response)?;

    let tier = guard
        .authoritative_tier(&session)
        .await
        .map_err(|e| HttpError::from(e).into_response())?;

    let quote =
        PlatformFee::quote(body.amount_pence, tier).map_err(|e| HttpError::from(e).into_response())?;

    Ok(Json(ApiResponse::success("Fee quote", quote)))
}

pub fn billing_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/tradesperson/analytics", get(get_analytics_handler))
        .route("/api/fees/quote", post(quote_fee_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ))
        .with_state(app_state)
}
