use crate::{
    domain::response::{DashboardPage, ListingsPage, ViewerSummary},
    middleware::guard::{OrRedirect, PageRejection, RequestGuard},
    state::AppState,
};
use access::model::{Role, Tier};
use axum::{
    Json,
    response::{IntoResponse, Redirect},
    routing::get,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const DASHBOARD: &str = "/dashboard";
const CUSTOMER: &str = "/dashboard/customer";
const TRADESPERSON: &str = "/dashboard/tradesperson";
const BUSINESS: &str = "/dashboard/business";
const ADMIN: &str = "/dashboard/admin";

async fn role_page(
    guard: &RequestGuard,
    path: &'static str,
    view: &str,
    allowed: &[Role],
    tier: Tier,
) -> Result<Json<DashboardPage>, PageRejection> {
    let session = guard.require_any_role(allowed).await.or_redirect(path)?;
    let (session, effective) = guard.check_tier(session, tier).await.or_redirect(path)?;
    Ok(Json(DashboardPage::new(view, &session, effective)))
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Pages",
    responses((status = 303, description = "Redirect to the caller's dashboard or to login"))
)]
pub async fn dashboard_home(guard: RequestGuard) -> Result<impl IntoResponse, PageRejection> {
    let session = guard.require_session().await.or_redirect(DASHBOARD)?;
    Ok(Redirect::to(session.role.dashboard_path()))
}

#[utoipa::path(
    get,
    path = "/dashboard/customer",
    tag = "Pages",
    responses(
        (status = 200, description = "Customer dashboard model", body = DashboardPage),
        (status = 303, description = "Redirect when not permitted")
    )
)]
pub async fn customer_dashboard(guard: RequestGuard) -> Result<impl IntoResponse, PageRejection> {
    role_page(&guard, CUSTOMER, "customer", &[Role::Customer, Role::Admin], Tier::Basic).await
}

#[utoipa::path(
    get,
    path = "/dashboard/tradesperson",
    tag = "Pages",
    responses(
        (status = 200, description = "Tradesperson dashboard model", body = DashboardPage),
        (status = 303, description = "Redirect when not permitted")
    )
)]
pub async fn tradesperson_dashboard(
    guard: RequestGuard,
) -> Result<impl IntoResponse, PageRejection> {
    role_page(
        &guard,
        TRADESPERSON,
        "tradesperson",
        &[Role::Tradesperson, Role::Admin],
        Tier::Basic,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/dashboard/business",
    tag = "Pages",
    responses(
        (status = 200, description = "Business dashboard model", body = DashboardPage),
        (status = 303, description = "Redirect when not permitted or not on the business tier")
    )
)]
pub async fn business_dashboard(guard: RequestGuard) -> Result<impl IntoResponse, PageRejection> {
    role_page(
        &guard,
        BUSINESS,
        "business",
        &[Role::BusinessOwner, Role::Admin],
        Tier::Business,
    )
    .await
}

#[utoipa::path(
    get,
    path = "/dashboard/admin",
    tag = "Pages",
    responses(
        (status = 200, description = "Admin dashboard model", body = DashboardPage),
        (status = 303, description = "Redirect when not permitted")
    )
)]
pub async fn admin_dashboard(guard: RequestGuard) -> Result<impl IntoResponse, PageRejection> {
    role_page(&guard, ADMIN, "admin", &[Role::Admin], Tier::Basic).await
}

#[utoipa::path(
    get,
    path = "/listings",
    tag = "Pages",
    responses((status = 200, description = "Public listings model", body = ListingsPage))
)]
pub async fn listings_page(guard: RequestGuard) -> impl IntoResponse {
    let viewer = guard.optional_session().await;

    Json(ListingsPage {
        logged_in: viewer.is_some(),
        viewer: viewer.as_ref().map(ViewerSummary::from),
    })
}

pub fn page_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(DASHBOARD, get(dashboard_home))
        .route(CUSTOMER, get(customer_dashboard))
        .route(TRADESPERSON, get(tradesperson_dashboard))
        .route(BUSINESS, get(business_dashboard))
        .route(ADMIN, get(admin_dashboard))
        .route("/listings", get(listings_page))
        .with_state(app_state)
}
