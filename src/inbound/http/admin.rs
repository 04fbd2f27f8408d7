//! Admin dashboard handlers: aggregate stats plus the thin program and
//! reward registries.
//!
//! ```text
//! GET  /api/v1/admin/stats
//! GET  /api/v1/admin/programs      POST /api/v1/admin/programs
//! GET  /api/v1/admin/rewards       POST /api/v1/admin/rewards
//! PUT  /api/v1/admin/rewards/{id}
//! ```
//!
//! Gated on an authenticated session only; role separation belongs to the
//! Auth Provider, which decides who receives tokens for these surfaces.

use actix_web::{HttpResponse, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{LedgerStore, LoyaltyQuery};
use crate::domain::{
    DEFAULT_POINTS_PER_DOLLAR, Error, NewLoyaltyProgram, NewReward, ProgramKind, RewardUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{ProgramResponse, RewardResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, double_option, parse_program_kind, parse_reward_kind, parse_uuid, require_non_empty,
    require_positive,
};

/// Aggregate programme figures for the dashboard.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_members: u64,
    /// Sum of earned-kind transaction amounts.
    pub total_points_issued: i64,
    pub total_redemptions: u64,
    /// Sum of lifetime spend across all accounts.
    #[schema(value_type = String, example = "94250.00")]
    pub revenue_impact: Decimal,
}

/// Body for `POST /api/v1/admin/programs`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub name: String,
    /// `points` or `cash`.
    pub kind: String,
    /// Earn rate; defaults to the platform default when absent.
    #[serde(default)]
    pub points_per_dollar: Option<u32>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2.5")]
    pub cash_back_percent: Option<Decimal>,
    /// Stored and exposed but not currently enforced at earn time.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "0")]
    pub minimum_purchase: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Body for `POST /api/v1/admin/rewards`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRewardRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `discount`, `shipping`, `access`, or `product`.
    pub kind: String,
    pub point_cost: i64,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "10.00")]
    pub discount_amount: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "15")]
    pub discount_percent: Option<Decimal>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Body for `PUT /api/v1/admin/rewards/{id}`.
///
/// Absent fields are left untouched; explicit `null` clears the optional
/// ones.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRewardRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub point_cost: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub discount_amount: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub discount_percent: Option<Option<Decimal>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Aggregate programme statistics.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Programme statistics", body = StatsResponse),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "loyaltyStats"
)]
#[get("/admin/stats")]
pub async fn stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsResponse>> {
    session.require_customer_id()?;
    let stats = state.loyalty_query.loyalty_stats().await?;
    Ok(web::Json(StatsResponse {
        total_members: stats.total_members,
        total_points_issued: stats.total_points_issued,
        total_redemptions: stats.total_redemptions,
        revenue_impact: stats.revenue_impact,
    }))
}

/// List all programs, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/admin/programs",
    responses(
        (status = 200, description = "Programs", body = [ProgramResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listPrograms"
)]
#[get("/admin/programs")]
pub async fn list_programs(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProgramResponse>>> {
    session.require_customer_id()?;
    let programs = state.ledger.list_programs().await.map_err(Error::from)?;
    Ok(web::Json(programs.into_iter().map(Into::into).collect()))
}

/// Create a program.
#[utoipa::path(
    post,
    path = "/api/v1/admin/programs",
    request_body = CreateProgramRequest,
    responses(
        (status = 201, description = "Program created", body = ProgramResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createProgram"
)]
#[post("/admin/programs")]
pub async fn create_program(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProgramRequest>,
) -> ApiResult<HttpResponse> {
    session.require_customer_id()?;
    let payload = payload.into_inner();

    let name = require_non_empty(payload.name, FieldName::new("name"))?;
    let kind = parse_program_kind(&payload.kind, FieldName::new("kind"))?;
    let points_per_dollar = payload.points_per_dollar.unwrap_or(DEFAULT_POINTS_PER_DOLLAR);
    if kind == ProgramKind::Points {
        require_positive(i64::from(points_per_dollar), FieldName::new("pointsPerDollar"))?;
    }

    let program = state
        .ledger
        .insert_program(NewLoyaltyProgram {
            name,
            kind,
            points_per_dollar,
            cash_back_percent: payload.cash_back_percent,
            minimum_purchase: payload.minimum_purchase.unwrap_or(Decimal::ZERO),
            is_active: payload.is_active.unwrap_or(true),
        })
        .await
        .map_err(Error::from)?;

    info!(program_id = %program.id, kind = %program.kind, "program created");
    Ok(HttpResponse::Created().json(ProgramResponse::from(program)))
}

/// List all rewards, newest first, active or not.
#[utoipa::path(
    get,
    path = "/api/v1/admin/rewards",
    responses(
        (status = 200, description = "Rewards", body = [RewardResponse]),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listRewards"
)]
#[get("/admin/rewards")]
pub async fn list_rewards(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RewardResponse>>> {
    session.require_customer_id()?;
    let rewards = state.ledger.list_rewards().await.map_err(Error::from)?;
    Ok(web::Json(rewards.into_iter().map(Into::into).collect()))
}

/// Create a reward.
#[utoipa::path(
    post,
    path = "/api/v1/admin/rewards",
    request_body = CreateRewardRequest,
    responses(
        (status = 201, description = "Reward created", body = RewardResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createReward"
)]
#[post("/admin/rewards")]
pub async fn create_reward(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRewardRequest>,
) -> ApiResult<HttpResponse> {
    session.require_customer_id()?;
    let payload = payload.into_inner();

    let name = require_non_empty(payload.name, FieldName::new("name"))?;
    let kind = parse_reward_kind(&payload.kind, FieldName::new("kind"))?;
    let point_cost = require_positive(payload.point_cost, FieldName::new("pointCost"))?;

    let reward = state
        .ledger
        .insert_reward(NewReward {
            name,
            description: payload.description,
            kind,
            point_cost,
            discount_amount: payload.discount_amount,
            discount_percent: payload.discount_percent,
            is_active: payload.is_active.unwrap_or(true),
        })
        .await
        .map_err(Error::from)?;

    info!(reward_id = %reward.id, kind = %reward.kind, "reward created");
    Ok(HttpResponse::Created().json(RewardResponse::from(reward)))
}

/// Apply a partial update to a reward.
#[utoipa::path(
    put,
    path = "/api/v1/admin/rewards/{id}",
    request_body = UpdateRewardRequest,
    params(
        ("id" = String, Path, description = "Reward identifier")
    ),
    responses(
        (status = 200, description = "Reward updated", body = RewardResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Unauthorised", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Reward not found", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Service unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateReward"
)]
#[put("/admin/rewards/{id}")]
pub async fn update_reward(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateRewardRequest>,
) -> ApiResult<web::Json<RewardResponse>> {
    session.require_customer_id()?;
    let reward_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();

    let name = payload
        .name
        .map(|name| require_non_empty(name, FieldName::new("name")))
        .transpose()?;
    let kind = payload
        .kind
        .as_deref()
        .map(|kind| parse_reward_kind(kind, FieldName::new("kind")))
        .transpose()?;
    let point_cost = payload
        .point_cost
        .map(|cost| require_positive(cost, FieldName::new("pointCost")))
        .transpose()?;

    let update = RewardUpdate {
        name,
        description: payload.description,
        kind,
        point_cost,
        discount_amount: payload.discount_amount,
        discount_percent: payload.discount_percent,
        is_active: payload.is_active,
    };

    let reward = state
        .ledger
        .update_reward(&reward_id, update)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::not_found("reward not found"))?;

    Ok(web::Json(reward.into()))
}
