use crate::{
    abstract_trait::{DynSessionResolver, DynUserRecordRepository},
    domain::{Credentials, Denial, GuardDecision, Session},
    errors::{GuardError, SessionError},
    model::{Role, Tier, TierRequirement},
    utils::{GuardOperation, Metrics, Outcome},
};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

impl From<&Denial> for Outcome {
    fn from(denial: &Denial) -> Self {
        match denial {
            Denial::Unauthenticated => Outcome::Unauthenticated,
            Denial::Forbidden { .. } => Outcome::Forbidden,
            Denial::ForbiddenTier { .. } => Outcome::ForbiddenTier,
            Denial::EmailNotVerified => Outcome::EmailNotVerified,
        }
    }
}

/// The authorization chokepoint shared by page and API routes.
///
/// Every check resolves the session through the injected resolver, applies one of the
/// [`GuardDecision`] rules and hands back either the session or a [`GuardError`]. Choosing a
/// redirect or a status code is left to the caller.
#[derive(Clone)]
pub struct AuthGuard {
    sessions: DynSessionResolver,
    users: DynUserRecordRepository,
    metrics: Metrics,
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard")
            .field("sessions", &"DynSessionResolver")
            .field("users", &"DynUserRecordRepository")
            .finish()
    }
}

impl AuthGuard {
    pub fn new(
        sessions: DynSessionResolver,
        users: DynUserRecordRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            sessions,
            users,
            metrics,
        }
    }

    pub fn sessions(&self) -> &DynSessionResolver {
        &self.sessions
    }

    async fn resolve(&self, credentials: &Credentials) -> Result<Option<Session>, SessionError> {
        let start = Instant::now();
        let result = self.sessions.resolve_session(credentials).await;
        self.metrics
            .observe_resolve(start.elapsed().as_secs_f64());
        result
    }

    fn finish<T>(
        &self,
        operation: GuardOperation,
        result: Result<T, GuardError>,
    ) -> Result<T, GuardError> {
        let outcome = match &result {
            Ok(_) => Outcome::Authorized,
            Err(GuardError::Denied(denial)) => {
                debug!("{:?} denied: {denial}", operation);
                Outcome::from(denial)
            }
            Err(e) => {
                error!("{:?} failed: {e}", operation);
                Outcome::Error
            }
        };
        self.metrics.record(operation, outcome);
        result
    }

    /// Never fails. A resolver outage is logged and the request is treated as anonymous.
    pub async fn optional_session(&self, credentials: &Credentials) -> Option<Session> {
        match self.resolve(credentials).await {
            Ok(Some(session)) => {
                self.metrics
                    .record(GuardOperation::OptionalSession, Outcome::Authorized);
                Some(session)
            }
            Ok(None) => {
                self.metrics
                    .record(GuardOperation::OptionalSession, Outcome::Anonymous);
                None
            }
            Err(e) => {
                warn!("Session lookup failed, continuing anonymously: {e}");
                self.metrics
                    .record(GuardOperation::OptionalSession, Outcome::Error);
                None
            }
        }
    }

    async fn session_or_denial(&self, credentials: &Credentials) -> Result<Session, GuardError> {
        let session = self.resolve(credentials).await?;
        Ok(GuardDecision::for_session(session).into_result()?)
    }

    pub async fn require_session(&self, credentials: &Credentials) -> Result<Session, GuardError> {
        let result = self.session_or_denial(credentials).await;
        self.finish(GuardOperation::RequireSession, result)
    }

    pub async fn require_any_role(
        &self,
        credentials: &Credentials,
        allowed: &[Role],
    ) -> Result<Session, GuardError> {
        let result = match self.session_or_denial(credentials).await {
            Ok(session) => GuardDecision::for_role(session, allowed)
                .into_result()
                .map_err(GuardError::from),
            Err(e) => Err(e),
        };
        self.finish(GuardOperation::RequireAnyRole, result)
    }

    pub async fn require_tier(
        &self,
        credentials: &Credentials,
        requirement: impl Into<TierRequirement>,
    ) -> Result<(Session, Tier), GuardError> {
        let requirement = requirement.into();
        let result = match self.session_or_denial(credentials).await {
            Ok(session) => self.tier_decision(session, &requirement).await,
            Err(e) => Err(e),
        };
        self.finish(GuardOperation::RequireTier, result)
    }

    /// Tier step alone, for callers that already hold a session from another guard.
    pub async fn check_tier(
        &self,
        session: Session,
        requirement: impl Into<TierRequirement>,
    ) -> Result<(Session, Tier), GuardError> {
        let requirement = requirement.into();
        let result = self.tier_decision(session, &requirement).await;
        self.finish(GuardOperation::RequireTier, result)
    }

    async fn tier_decision(
        &self,
        session: Session,
        requirement: &TierRequirement,
    ) -> Result<(Session, Tier), GuardError> {
        let effective = self.authoritative_tier(&session).await?;
        let session = GuardDecision::for_tier(session, effective, requirement).into_result()?;
        Ok((session, effective))
    }

    /// The persisted record wins over the token, which is only refreshed at login.
    /// A missing record falls back to the token; a failing store is an error, not a guess.
    pub async fn authoritative_tier(&self, session: &Session) -> Result<Tier, GuardError> {
        let start = Instant::now();
        let record = self.users.find_by_id(&session.user_id).await;
        self.metrics
            .observe_resolve(start.elapsed().as_secs_f64());

        match record? {
            Some(record) => {
                let tier = record.subscription_tier.unwrap_or_default();
                if session.tier.unwrap_or_default() != tier {
                    info!(
                        "Tier for user {} differs from token ({} -> {})",
                        session.user_id,
                        session.token_tier(),
                        tier
                    );
                }
                Ok(tier)
            }
            None => {
                debug!(
                    "No user record for {}, using token tier",
                    session.user_id
                );
                Ok(session.token_tier())
            }
        }
    }

    pub async fn require_verified_email(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, GuardError> {
        let result = match self.session_or_denial(credentials).await {
            Ok(session) => GuardDecision::for_verified_email(session)
                .into_result()
                .map_err(GuardError::from),
            Err(e) => Err(e),
        };
        self.finish(GuardOperation::RequireVerifiedEmail, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{SessionResolverTrait, UserRecordRepositoryTrait},
        errors::RepositoryError,
        model::UserRecord,
    };
    use async_trait::async_trait;
    use std::{collections::HashMap, sync::Arc};

    struct StaticSessions(HashMap<String, Session>);

    #[async_trait]
    impl SessionResolverTrait for StaticSessions {
        async fn resolve_session(
            &self,
            credentials: &Credentials,
        ) -> Result<Option<Session>, SessionError> {
            Ok(credentials
                .session_token()
                .and_then(|t| self.0.get(t).cloned()))
        }
    }

    struct BrokenSessions;

    #[async_trait]
    impl SessionResolverTrait for BrokenSessions {
        async fn resolve_session(&self, _: &Credentials) -> Result<Option<Session>, SessionError> {
            Err(SessionError::Token("provider offline".into()))
        }
    }

    enum Users {
        Records(HashMap<String, UserRecord>),
        Down,
    }

    #[async_trait]
    impl UserRecordRepositoryTrait for Users {
        async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError> {
            match self {
                Users::Records(map) => Ok(map.get(user_id).cloned()),
                Users::Down => Err(RepositoryError::Custom("connection refused".into())),
            }
        }
    }

    fn record(user_id: &str, role: Role, tier: Option<Tier>) -> UserRecord {
        UserRecord {
            user_id: user_id.into(),
            email: None,
            role,
            subscription_tier: tier,
            subscription_status: None,
            email_verified: true,
        }
    }

    fn guard(sessions: Vec<(&str, Session)>, users: Users) -> AuthGuard {
        let sessions = sessions
            .into_iter()
            .map(|(token, s)| (token.to_string(), s))
            .collect();
        AuthGuard::new(
            Arc::new(StaticSessions(sessions)),
            Arc::new(users),
            Metrics::new(),
        )
    }

    fn no_users() -> Users {
        Users::Records(HashMap::new())
    }

    #[tokio::test]
    async fn require_session_without_session_is_unauthenticated() {
        let guard = guard(vec![], no_users());

        let err = guard
            .require_session(&Credentials::anonymous())
            .await
            .unwrap_err();
        assert_eq!(err.denial(), Some(&Denial::Unauthenticated));

        let err = guard
            .require_session(&Credentials::from_token("unknown"))
            .await
            .unwrap_err();
        assert_eq!(err.denial(), Some(&Denial::Unauthenticated));
    }

    #[tokio::test]
    async fn customer_forbidden_admin_allowed() {
        let guard = guard(
            vec![
                ("c", Session::new("c1", Role::Customer)),
                ("a", Session::new("a1", Role::Admin)),
            ],
            no_users(),
        );
        let allowed = [Role::Tradesperson, Role::Admin];

        let err = guard
            .require_any_role(&Credentials::from_token("c"), &allowed)
            .await
            .unwrap_err();
        assert!(matches!(
            err.denial(),
            Some(Denial::Forbidden {
                role: Role::Customer,
                ..
            })
        ));

        let session = guard
            .require_any_role(&Credentials::from_token("a"), &allowed)
            .await
            .unwrap();
        assert_eq!(session.user_id, "a1");
    }

    #[tokio::test]
    async fn stored_tier_beats_stale_token() {
        let stale = Session::new("u1", Role::Tradesperson).with_tier(Tier::Basic);
        let users = Users::Records(HashMap::from([(
            "u1".to_string(),
            record("u1", Role::Tradesperson, Some(Tier::Business)),
        )]));
        let guard = guard(vec![("t", stale.clone())], users);

        let (session, tier) = guard
            .require_tier(&Credentials::from_token("t"), Tier::Pro)
            .await
            .unwrap();

        assert_eq!(tier, Tier::Business);
        assert_eq!(session, stale);
    }

    #[tokio::test]
    async fn lapsed_subscription_in_store_is_enforced() {
        let token = Session::new("u2", Role::BusinessOwner).with_tier(Tier::Business);
        let users = Users::Records(HashMap::from([(
            "u2".to_string(),
            record("u2", Role::BusinessOwner, None),
        )]));
        let guard = guard(vec![("t", token)], users);

        let err = guard
            .require_tier(&Credentials::from_token("t"), Tier::Pro)
            .await
            .unwrap_err();
        assert_eq!(
            err.denial(),
            Some(&Denial::ForbiddenTier {
                required: Tier::Pro,
                actual: Tier::Basic,
            })
        );
    }

    #[tokio::test]
    async fn pro_user_denied_business() {
        let users = Users::Records(HashMap::from([(
            "p1".to_string(),
            record("p1", Role::Tradesperson, Some(Tier::Pro)),
        )]));
        let guard = guard(vec![("p", Session::new("p1", Role::Tradesperson))], users);

        let err = guard
            .require_tier(&Credentials::from_token("p"), Tier::Business)
            .await
            .unwrap_err();
        assert_eq!(
            err.denial(),
            Some(&Denial::ForbiddenTier {
                required: Tier::Business,
                actual: Tier::Pro,
            })
        );
    }

    #[tokio::test]
    async fn missing_record_falls_back_to_token_tier() {
        let guard = guard(
            vec![("t", Session::new("ghost", Role::Tradesperson).with_tier(Tier::Pro))],
            no_users(),
        );

        let (_, tier) = guard
            .require_tier(&Credentials::from_token("t"), [Tier::Pro, Tier::Business])
            .await
            .unwrap();
        assert_eq!(tier, Tier::Pro);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let guard = guard(
            vec![("t", Session::new("u1", Role::Tradesperson).with_tier(Tier::Business))],
            Users::Down,
        );

        let err = guard
            .require_tier(&Credentials::from_token("t"), Tier::Pro)
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Store(_)));
    }

    #[tokio::test]
    async fn resolver_failure_propagates_from_required_guards() {
        let guard = AuthGuard::new(Arc::new(BrokenSessions), Arc::new(no_users()), Metrics::new());

        let err = guard
            .require_session(&Credentials::from_token("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuardError::Session(_)));
    }

    #[tokio::test]
    async fn optional_session_degrades_to_anonymous() {
        let guard = guard(vec![], no_users());
        assert_eq!(guard.optional_session(&Credentials::anonymous()).await, None);

        let broken = AuthGuard::new(Arc::new(BrokenSessions), Arc::new(no_users()), Metrics::new());
        assert_eq!(
            broken.optional_session(&Credentials::from_token("x")).await,
            None
        );
    }

    #[tokio::test]
    async fn verified_email_guard() {
        let guard = guard(
            vec![
                ("v", Session::new("v1", Role::Customer).with_email("v@x.test", true)),
                ("n", Session::new("n1", Role::Customer).with_email("n@x.test", false)),
            ],
            no_users(),
        );

        assert!(
            guard
                .require_verified_email(&Credentials::from_token("v"))
                .await
                .is_ok()
        );
        let err = guard
            .require_verified_email(&Credentials::from_token("n"))
            .await
            .unwrap_err();
        assert_eq!(err.denial(), Some(&Denial::EmailNotVerified));
    }

    #[tokio::test]
    async fn decisions_are_counted() {
        let metrics = Metrics::new();
        let guard = AuthGuard::new(
            Arc::new(StaticSessions(HashMap::new())),
            Arc::new(no_users()),
            metrics.clone(),
        );

        let _ = guard.require_session(&Credentials::anonymous()).await;

        let count = metrics
            .guard_decisions
            .get_or_create(&crate::utils::GuardLabels {
                operation: GuardOperation::RequireSession,
                outcome: Outcome::Unauthenticated,
            })
            .get();
        assert_eq!(count, 1);
    }

    #[test]
    fn denial_outcomes_match_their_kind() {
        assert_eq!(Outcome::from(&Denial::Unauthenticated), Outcome::Unauthenticated);
        assert_eq!(
            Outcome::from(&Denial::Forbidden {
                role: Role::Customer,
                allowed: vec![Role::Admin],
            }),
            Outcome::Forbidden
        );
        assert_eq!(
            Outcome::from(&Denial::ForbiddenTier {
                required: Tier::Pro,
                actual: Tier::Basic,
            }),
            Outcome::ForbiddenTier
        );
        assert_eq!(Outcome::from(&Denial::EmailNotVerified), Outcome::EmailNotVerified);
    }

    #[tokio::test]
    async fn unreachable_redis_store_is_an_error_not_anonymous() {
        let pool = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .unwrap();
        let guard = AuthGuard::new(
            Arc::new(crate::cache::RedisSessionStore::new(pool)),
            Arc::new(no_users()),
            Metrics::new(),
        );
        let creds = Credentials::from_token("x");

        let err = guard.require_session(&creds).await.unwrap_err();
        assert!(matches!(err, GuardError::Session(SessionError::Pool(_))));
        assert_eq!(err.denial(), None);

        assert_eq!(guard.optional_session(&creds).await, None);
    }
}
