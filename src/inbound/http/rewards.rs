//! Reward catalog and redemption handlers.
//!
//! ```text
//! GET  /api/v1/rewards
//! POST /api/v1/rewards/redeem {"rewardId":"<uuid>"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::ports::{LedgerStore, LoyaltyCommand, RedeemRewardRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{RedemptionResponse, RewardResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Body for `POST /api/v1/rewards/redeem`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    /// Identifier of the reward to claim.
    pub reward_id: String,
}

/// List active rewards, cheapest first. Public: the storefront shows the
/// catalog to anonymous visitors.
#[utoipa::path(
    get,
    path = "/api/v1/rewards",
    responses(
        (status = 200, description = "Active rewards by ascending point cost", body = [RewardResponse]),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["rewards"],
    operation_id = "listActiveRewards",
    security([])
)]
#[get("/rewards")]
pub async fn list_active_rewards(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RewardResponse>>> {
    let rewards = state
        .ledger
        .list_active_rewards()
        .await
        .map_err(Error::from)?;
    Ok(web::Json(rewards.into_iter().map(Into::into).collect()))
}

/// Redeem a reward against the caller's point balance.
#[utoipa::path(
    post,
    path = "/api/v1/rewards/redeem",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Redemption recorded", body = RedemptionResponse),
        (status = 400, description = "Invalid reward id", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Reward not found or inactive", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Insufficient points or concurrent modification", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["rewards"],
    operation_id = "redeemReward"
)]
#[post("/rewards/redeem")]
pub async fn redeem_reward(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RedeemRequest>,
) -> ApiResult<web::Json<RedemptionResponse>> {
    let customer_id = session.require_customer_id()?;
    let reward_id = parse_uuid(&payload.reward_id, FieldName::new("rewardId"))?;

    let redemption = state
        .loyalty
        .redeem_reward(RedeemRewardRequest {
            customer_id,
            reward_id,
        })
        .await?;

    Ok(web::Json(redemption.into()))
}
