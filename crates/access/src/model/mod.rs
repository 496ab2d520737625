mod role;
mod tier;
mod user;

pub use self::role::{ParseRoleError, Role, role_satisfies};
pub use self::tier::{ParseTierError, SubscriptionStatus, Tier, TierRequirement, compare_tier};
pub use self::user::{UserRecord, UserRow};
