use access::{domain::Session, model::Tier};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub session: Option<Session>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub session: Session,
    pub effective_tier: Tier,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyticsResponse {
    pub user_id: String,
    pub tier: Tier,
    pub platform_fee_bps: i64,
}
