use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Subscription tier. Declaration order is the gating order: basic < pro < business.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Basic,
    Pro,
    Business,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown subscription tier: {0}")]
pub struct ParseTierError(pub String);

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Pro, Tier::Business];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Pro => "pro",
            Tier::Business => "business",
        }
    }

    /// Unknown or missing values land on `Basic`, never on a paid tier.
    pub fn parse_lossy(value: Option<&str>) -> Tier {
        value
            .and_then(|v| v.parse::<Tier>().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Tier::Basic),
            "pro" => Ok(Tier::Pro),
            "business" => Ok(Tier::Business),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff `actual` ranks at or above `required`. A missing tier counts as basic.
pub fn compare_tier(actual: Option<Tier>, required: Tier) -> bool {
    actual.unwrap_or_default() >= required
}

/// One tier or a set of acceptable tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierRequirement {
    tiers: Vec<Tier>,
}

impl TierRequirement {
    pub fn any_of(tiers: impl IntoIterator<Item = Tier>) -> Self {
        let mut tiers: Vec<Tier> = tiers.into_iter().collect();
        tiers.sort();
        tiers.dedup();
        Self { tiers }
    }

    /// The lowest tier that satisfies this requirement. An empty set requires nothing beyond basic.
    pub fn minimum(&self) -> Tier {
        self.tiers.first().copied().unwrap_or_default()
    }

    pub fn is_met_by(&self, actual: Option<Tier>) -> bool {
        if self.tiers.is_empty() {
            return true;
        }
        self.tiers.iter().any(|required| compare_tier(actual, *required))
    }
}

impl From<Tier> for TierRequirement {
    fn from(tier: Tier) -> Self {
        Self { tiers: vec![tier] }
    }
}

impl From<&[Tier]> for TierRequirement {
    fn from(tiers: &[Tier]) -> Self {
        Self::any_of(tiers.iter().copied())
    }
}

impl<const N: usize> From<[Tier; N]> for TierRequirement {
    fn from(tiers: [Tier; N]) -> Self {
        Self::any_of(tiers)
    }
}

/// Billing status as reported by the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    IncompleteExpired,
    Unpaid,
    Paused,
    #[serde(other)]
    Unknown,
}

impl SubscriptionStatus {
    pub fn parse_lossy(value: Option<&str>) -> Option<SubscriptionStatus> {
        let value = value?.trim();
        if value.is_empty() {
            return None;
        }
        let status = match value.to_ascii_lowercase().as_str() {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            "incomplete" => SubscriptionStatus::Incomplete,
            "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
            "unpaid" => SubscriptionStatus::Unpaid,
            "paused" => SubscriptionStatus::Paused,
            _ => SubscriptionStatus::Unknown,
        };
        Some(status)
    }
}
