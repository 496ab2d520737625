use crate::model::{Role, SubscriptionStatus, Tier, UserRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

/// Identity and claims of the caller, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub role: Role,
    pub email_verified: bool,
    pub tier: Option<Tier>,
    pub subscription_status: Option<SubscriptionStatus>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            role,
            email_verified: false,
            tier: None,
            subscription_status: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>, verified: bool) -> Self {
        self.email = Some(email.into());
        self.email_verified = verified;
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_subscription_status(mut self, status: SubscriptionStatus) -> Self {
        self.subscription_status = Some(status);
        self
    }

    /// Tier carried by the token; may be stale.
    pub fn token_tier(&self) -> Tier {
        self.tier.unwrap_or_default()
    }
}

impl From<UserRecord> for Session {
    fn from(record: UserRecord) -> Self {
        Session {
            user_id: record.user_id,
            email: record.email,
            role: record.role,
            email_verified: record.email_verified,
            tier: record.subscription_tier,
            subscription_status: record.subscription_status,
        }
    }
}

/// Signed session token payload. String claims are parsed leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_status: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

impl SessionClaims {
    pub fn for_session(session: &Session, iat: usize, exp: usize) -> Self {
        Self {
            sub: session.user_id.clone(),
            email: session.email.clone(),
            role: Some(session.role.as_str().to_string()),
            email_verified: session.email_verified,
            subscription_tier: session.tier.map(|t| t.as_str().to_string()),
            subscription_status: session.subscription_status.and_then(|s| {
                serde_json::to_value(s)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_owned))
            }),
            iat,
            exp,
        }
    }
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        let role = match claims.role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => role,
            Some(Err(e)) => {
                warn!("session for {} carries {e}; treating as customer", claims.sub);
                Role::Customer
            }
            None => Role::Customer,
        };

        Session {
            user_id: claims.sub,
            email: claims.email,
            role,
            email_verified: claims.email_verified,
            tier: claims
                .subscription_tier
                .as_deref()
                .and_then(|t| t.parse::<Tier>().ok()),
            subscription_status: SubscriptionStatus::parse_lossy(
                claims.subscription_status.as_deref(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_round_trip_keeps_typed_fields() {
        let session = Session::new("u-42", Role::Tradesperson)
            .with_email("a@b.test", true)
            .with_tier(Tier::Pro)
            .with_subscription_status(SubscriptionStatus::PastDue);

        let claims = SessionClaims::for_session(&session, 1, 2);
        assert_eq!(claims.subscription_status.as_deref(), Some("past_due"));
        assert_eq!(Session::from(claims), session);
    }

    #[test]
    fn unknown_role_claim_becomes_customer() {
        let claims = SessionClaims {
            sub: "u".into(),
            email: None,
            role: Some("owner".into()),
            email_verified: false,
            subscription_tier: Some("gold".into()),
            subscription_status: None,
            iat: 0,
            exp: 0,
        };

        let session = Session::from(claims);
        assert_eq!(session.role, Role::Customer);
        assert_eq!(session.tier, None);
        assert_eq!(session.token_tier(), Tier::Basic);
    }
}
