use crate::{
    domain::response::ApiResponse, middleware::guard::RequestGuard,
    middleware::rate_limit::rate_limit_middleware, state::AppState,
};
use access::{errors::HttpError, model::Role, model::UserRecord};
use axum::{
    Json,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Persisted user record", body = ApiResponse<UserRecord>),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_record_handler(
    State(state): State<Arc<AppState>>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let admin = guard.require_any_role(&[Role::Admin]).await?;

    let record = state
        .di_container
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("User {id} not found")))?;

    info!("Admin {} viewed user record {}", admin.user_id, id);

    Ok(Json(ApiResponse::success("User record", record)))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admin/users/{id}", get(get_user_record_handler))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            rate_limit_middleware,
        ))
        .with_state(app_state)
}
