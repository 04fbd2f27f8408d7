//! Purchase recording handler.
//!
//! ```text
//! POST /api/v1/purchase {"amount":"19.99","orderId":"order-7"}
//! ```
//!
//! The checkout flow reports a completed purchase here; the orchestrator
//! awards floored points at the governing program rate and advances the tier
//! in the same atomic commit.

use actix_web::{post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{LoyaltyCommand, RecordPurchaseRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::TransactionResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body for `POST /api/v1/purchase`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// Purchase total as a decimal string; must be positive.
    #[schema(value_type = String, example = "19.99")]
    pub amount: Decimal,
    /// Merchant order reference; a synthetic `order_<uuid>` id is generated
    /// when absent.
    #[serde(default)]
    pub order_id: Option<String>,
}

/// Result of recording a purchase.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub transaction: TransactionResponse,
    pub points_earned: i64,
}

/// Record a purchase and award loyalty points.
#[utoipa::path(
    post,
    path = "/api/v1/purchase",
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Purchase recorded", body = PurchaseResponse),
        (status = 400, description = "Invalid amount", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Concurrent modification", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["customer"],
    operation_id = "recordPurchase"
)]
#[post("/purchase")]
pub async fn record_purchase(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PurchaseRequest>,
) -> ApiResult<web::Json<PurchaseResponse>> {
    let customer_id = session.require_customer_id()?;
    let PurchaseRequest { amount, order_id } = payload.into_inner();

    let response = state
        .loyalty
        .record_purchase(RecordPurchaseRequest {
            customer_id,
            amount,
            order_id,
        })
        .await?;

    Ok(web::Json(PurchaseResponse {
        transaction: response.transaction.into(),
        points_earned: response.points_earned,
    }))
}
