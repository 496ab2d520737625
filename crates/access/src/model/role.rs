use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Tradesperson,
    BusinessOwner,
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Customer,
        Role::Tradesperson,
        Role::BusinessOwner,
        Role::Admin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Tradesperson => "tradesperson",
            Role::BusinessOwner => "business_owner",
            Role::Admin => "admin",
        }
    }

    /// Unknown or missing values become `Customer`, the least privileged role.
    pub fn parse_lossy(value: Option<&str>) -> Role {
        value
            .and_then(|v| v.parse::<Role>().ok())
            .unwrap_or(Role::Customer)
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Customer => "/dashboard/customer",
            Role::Tradesperson => "/dashboard/tradesperson",
            Role::BusinessOwner => "/dashboard/business",
            Role::Admin => "/dashboard/admin",
        }
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "tradesperson" => Ok(Role::Tradesperson),
            "business_owner" => Ok(Role::BusinessOwner),
            "admin" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain allow-list membership. Admin gets no implicit pass.
pub fn role_satisfies(actual: Option<Role>, allowed: &[Role]) -> bool {
    match actual {
        Some(role) => allowed.contains(&role),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_only() {
        let allowed = [Role::Tradesperson, Role::Admin];
        assert!(role_satisfies(Some(Role::Tradesperson), &allowed));
        assert!(role_satisfies(Some(Role::Admin), &allowed));
        assert!(!role_satisfies(Some(Role::Customer), &allowed));
        assert!(!role_satisfies(Some(Role::BusinessOwner), &allowed));
    }

    #[test]
    fn admin_needs_explicit_listing() {
        assert!(!role_satisfies(Some(Role::Admin), &[Role::Customer]));
        assert!(!role_satisfies(Some(Role::Admin), &[]));
    }

    #[test]
    fn missing_role_satisfies_nothing() {
        assert!(!role_satisfies(None, &Role::ALL));
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("business_owner".parse::<Role>(), Ok(Role::BusinessOwner));
        assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::parse_lossy(Some("superuser")), Role::Customer);
        assert_eq!(Role::parse_lossy(None), Role::Customer);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::BusinessOwner).unwrap();
        assert_eq!(json, "\"business_owner\"");
    }
}
