use access::{
    domain::Session,
    model::{Role, Tier},
};
use serde::Serialize;
use utoipa::ToSchema;

/// What a logged-in header or menu needs to know about the viewer.
#[derive(Debug, Serialize, ToSchema)]
pub struct ViewerSummary {
    pub user_id: String,
    pub role: Role,
    pub dashboard: String,
}

impl From<&Session> for ViewerSummary {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            role: session.role,
            dashboard: session.role.dashboard_path().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPage {
    pub view: String,
    pub viewer: ViewerSummary,
    pub tier: Tier,
    pub email_verified: bool,
}

impl DashboardPage {
    pub fn new(view: &str, session: &Session, tier: Tier) -> Self {
        Self {
            view: view.to_string(),
            viewer: ViewerSummary::from(session),
            tier,
            email_verified: session.email_verified,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListingsPage {
    pub logged_in: bool,
    pub viewer: Option<ViewerSummary>,
}
