//! Customer-facing loyalty read handlers.
//!
//! ```text
//! GET /api/v1/customer/loyalty
//! GET /api/v1/customer/transactions
//! GET /api/v1/customer/redemptions
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::ports::{LoyaltyCommand, LoyaltyQuery};
use crate::domain::{CustomerLoyaltyAccount, Tier};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{RedemptionResponse, TransactionResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Loyalty account summary returned to the owning customer.
///
/// `tierMultiplier` is the display-only earn figure shown in marketing copy;
/// the rate actually applied to purchases comes from the governing program.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyAccountResponse {
    pub customer_id: String,
    pub total_points: i64,
    #[schema(value_type = String, example = "silver")]
    pub current_tier: Tier,
    pub tier_multiplier: u32,
    #[schema(value_type = String, example = "310.00")]
    pub lifetime_spent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerLoyaltyAccount> for LoyaltyAccountResponse {
    fn from(account: CustomerLoyaltyAccount) -> Self {
        Self {
            customer_id: account.customer_id.into(),
            total_points: account.total_points,
            current_tier: account.current_tier,
            tier_multiplier: account.current_tier.display_multiplier(),
            lifetime_spent: account.lifetime_spent,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Fetch the caller's loyalty account, creating it on first access.
#[utoipa::path(
    get,
    path = "/api/v1/customer/loyalty",
    responses(
        (status = 200, description = "Loyalty account", body = LoyaltyAccountResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["customer"],
    operation_id = "getLoyaltyAccount"
)]
#[get("/customer/loyalty")]
pub async fn loyalty_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LoyaltyAccountResponse>> {
    let customer_id = session.require_customer_id()?;
    let account = state.loyalty.get_or_create_account(customer_id).await?;
    Ok(web::Json(account.into()))
}

/// List the caller's ledger entries, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/customer/transactions",
    responses(
        (status = 200, description = "Point transactions", body = [TransactionResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["customer"],
    operation_id = "listTransactions"
)]
#[get("/customer/transactions")]
pub async fn transactions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TransactionResponse>>> {
    let customer_id = session.require_customer_id()?;
    let transactions = state.loyalty_query.list_transactions(customer_id).await?;
    Ok(web::Json(
        transactions.into_iter().map(Into::into).collect(),
    ))
}

/// List the caller's reward redemptions, most recent first.
#[utoipa::path(
    get,
    path = "/api/v1/customer/redemptions",
    responses(
        (status = 200, description = "Reward redemptions", body = [RedemptionResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["customer"],
    operation_id = "listRedemptions"
)]
#[get("/customer/redemptions")]
pub async fn redemptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RedemptionResponse>>> {
    let customer_id = session.require_customer_id()?;
    let redemptions = state.loyalty_query.list_redemptions(customer_id).await?;
    Ok(web::Json(redemptions.into_iter().map(Into::into).collect()))
}
