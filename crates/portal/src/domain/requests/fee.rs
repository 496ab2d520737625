use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FeeQuoteRequest {
    #[validate(range(min = 1, message = "Amount must be at least 1 penny"))]
    pub amount_pence: i64,
}
