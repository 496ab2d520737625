use crate::model::{Role, SubscriptionStatus, Tier};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Raw `users` row. Enumerated columns stay as text until converted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub subscription_tier: Option<String>,
    pub subscription_status: Option<String>,
    pub email_verified: bool,
}

/// Persisted user, the source of truth for role and tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Role,
    pub subscription_tier: Option<Tier>,
    pub subscription_status: Option<SubscriptionStatus>,
    pub email_verified: bool,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user_id: row.user_id,
            email: row.email,
            role: Role::parse_lossy(row.role.as_deref()),
            subscription_tier: row
                .subscription_tier
                .as_deref()
                .and_then(|t| t.parse::<Tier>().ok()),
            subscription_status: SubscriptionStatus::parse_lossy(
                row.subscription_status.as_deref(),
            ),
            email_verified: row.email_verified,
        }
    }
}
