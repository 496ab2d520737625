use crate::{errors::ServiceError, model::Tier};
use serde::Serialize;
use utoipa::ToSchema;

const BPS_DENOMINATOR: i64 = 10_000;

/// Marketplace commission taken from a job payment, cheaper on higher tiers.
pub struct PlatformFee;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeeQuote {
    pub amount_pence: i64,
    pub fee_pence: i64,
    pub payout_pence: i64,
    pub rate_bps: i64,
    pub tier: Tier,
}

impl PlatformFee {
    pub fn rate_bps(tier: Tier) -> i64 {
        match tier {
            Tier::Basic => 1_000,
            Tier::Pro => 750,
            Tier::Business => 500,
        }
    }

    /// Fee is rounded half up to the nearest penny; the payout takes the remainder.
    pub fn quote(amount_pence: i64, tier: Tier) -> Result<FeeQuote, ServiceError> {
        if amount_pence <= 0 {
            return Err(ServiceError::Validation(vec![
                "amount_pence must be positive".to_string(),
            ]));
        }

        let rate_bps = Self::rate_bps(tier);
        let fee_pence = amount_pence
            .checked_mul(rate_bps)
            .and_then(|scaled| scaled.checked_add(BPS_DENOMINATOR / 2))
            .map(|scaled| scaled / BPS_DENOMINATOR)
            .ok_or_else(|| ServiceError::Validation(vec!["amount_pence is too large".into()]))?;

        Ok(FeeQuote {
            amount_pence,
            fee_pence,
            payout_pence: amount_pence - fee_pence,
            rate_bps,
            tier,
        })
    }
}
