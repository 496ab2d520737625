use crate::{
    domain::Session,
    model::{Role, Tier, TierRequirement, role_satisfies},
};
use thiserror::Error;

/// Why a guard refused the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role '{role}' is not permitted here")]
    Forbidden { role: Role, allowed: Vec<Role> },

    #[error("Subscription tier '{actual}' is below the required '{required}' tier")]
    ForbiddenTier { required: Tier, actual: Tier },

    #[error("Email address has not been verified")]
    EmailNotVerified,
}

impl Denial {
    pub fn code(&self) -> &'static str {
        match self {
            Denial::Unauthenticated => "unauthenticated",
            Denial::Forbidden { .. } => "forbidden",
            Denial::ForbiddenTier { .. } => "forbidden_tier",
            Denial::EmailNotVerified => "email_not_verified",
        }
    }
}

/// Outcome of one authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Authorized(Session),
    Denied(Denial),
}

impl GuardDecision {
    pub fn for_session(session: Option<Session>) -> Self {
        match session {
            Some(session) => GuardDecision::Authorized(session),
            None => GuardDecision::Denied(Denial::Unauthenticated),
        }
    }

    pub fn for_role(session: Session, allowed: &[Role]) -> Self {
        if role_satisfies(Some(session.role), allowed) {
            GuardDecision::Authorized(session)
        } else {
            GuardDecision::Denied(Denial::Forbidden {
                role: session.role,
                allowed: allowed.to_vec(),
            })
        }
    }

    /// `effective` is whichever tier the caller resolved as authoritative.
    pub fn for_tier(session: Session, effective: Tier, requirement: &TierRequirement) -> Self {
        if requirement.is_met_by(Some(effective)) {
            GuardDecision::Authorized(session)
        } else {
            GuardDecision::Denied(Denial::ForbiddenTier {
                required: requirement.minimum(),
                actual: effective,
            })
        }
    }

    pub fn for_verified_email(session: Session) -> Self {
        if session.email_verified {
            GuardDecision::Authorized(session)
        } else {
            GuardDecision::Denied(Denial::EmailNotVerified)
        }
    }

    pub fn into_result(self) -> Result<Session, Denial> {
        match self {
            GuardDecision::Authorized(session) => Ok(session),
            GuardDecision::Denied(denial) => Err(denial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_is_unauthenticated() {
        assert_eq!(
            GuardDecision::for_session(None),
            GuardDecision::Denied(Denial::Unauthenticated)
        );
    }

    #[test]
    fn customer_is_forbidden_from_trade_routes() {
        let session = Session::new("c1", Role::Customer);
        let decision = GuardDecision::for_role(session, &[Role::Tradesperson, Role::Admin]);

        assert_eq!(
            decision,
            GuardDecision::Denied(Denial::Forbidden {
                role: Role::Customer,
                allowed: vec![Role::Tradesperson, Role::Admin],
            })
        );
    }

    #[test]
    fn admin_passes_when_listed() {
        let session = Session::new("a1", Role::Admin);
        let decision = GuardDecision::for_role(session.clone(), &[Role::Tradesperson, Role::Admin]);
        assert_eq!(decision, GuardDecision::Authorized(session));
    }

    #[test]
    fn tier_denial_reports_required_and_actual() {
        let session = Session::new("p1", Role::Tradesperson).with_tier(Tier::Pro);
        let decision = GuardDecision::for_tier(session, Tier::Pro, &Tier::Business.into());

        assert_eq!(
            decision.into_result(),
            Err(Denial::ForbiddenTier {
                required: Tier::Business,
                actual: Tier::Pro,
            })
        );
    }

    #[test]
    fn decisions_leave_session_untouched() {
        let session = Session::new("b1", Role::BusinessOwner).with_tier(Tier::Basic);
        let decision = GuardDecision::for_tier(session.clone(), Tier::Business, &Tier::Pro.into());

        let authorized = decision.into_result().unwrap();
        assert_eq!(authorized, session);
        assert_eq!(authorized.tier, Some(Tier::Basic));
    }

    #[test]
    fn unverified_email_is_denied() {
        let session = Session::new("c2", Role::Customer).with_email("c2@x.test", false);
        assert_eq!(
            GuardDecision::for_verified_email(session).into_result(),
            Err(Denial::EmailNotVerified)
        );
    }
}
