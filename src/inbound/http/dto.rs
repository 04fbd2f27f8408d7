//! Wire representations shared across handler modules.
//!
//! Domain types stay serde-free where they carry internal state (the account
//! version, customer ids on rows returned within an authenticated session);
//! these DTOs define the camelCase JSON the API actually speaks. Monetary
//! fields serialise as decimal strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    LoyaltyProgram, PointTransaction, ProgramKind, RedemptionStatus, Reward, RewardKind,
    RewardRedemption, TransactionKind,
};

/// Ledger entry as returned to the owning customer.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    /// Positive for credits, negative for debits.
    pub amount: i64,
    #[schema(value_type = String, example = "earned")]
    pub kind: TransactionKind,
    pub description: String,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PointTransaction> for TransactionResponse {
    fn from(transaction: PointTransaction) -> Self {
        Self {
            id: transaction.id,
            amount: transaction.amount,
            kind: transaction.kind,
            description: transaction.description,
            order_id: transaction.order_id,
            created_at: transaction.created_at,
        }
    }
}

/// Redemption record as returned to the owning customer.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResponse {
    pub id: Uuid,
    pub reward_id: Uuid,
    pub points_used: i64,
    #[schema(value_type = String, example = "active")]
    pub status: RedemptionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<RewardRedemption> for RedemptionResponse {
    fn from(redemption: RewardRedemption) -> Self {
        Self {
            id: redemption.id,
            reward_id: redemption.reward_id,
            points_used: redemption.points_used,
            status: redemption.status,
            created_at: redemption.created_at,
        }
    }
}

/// Catalog entry as listed publicly and in the admin views.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "discount")]
    pub kind: RewardKind,
    pub point_cost: i64,
    #[schema(value_type = Option<String>, example = "10.00")]
    pub discount_amount: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "15")]
    pub discount_percent: Option<Decimal>,
    pub is_active: bool,
    pub redemption_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reward> for RewardResponse {
    fn from(reward: Reward) -> Self {
        Self {
            id: reward.id,
            name: reward.name,
            description: reward.description,
            kind: reward.kind,
            point_cost: reward.point_cost,
            discount_amount: reward.discount_amount,
            discount_percent: reward.discount_percent,
            is_active: reward.is_active,
            redemption_count: reward.redemption_count,
            created_at: reward.created_at,
            updated_at: reward.updated_at,
        }
    }
}

/// Program configuration as listed in the admin views.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "points")]
    pub kind: ProgramKind,
    pub points_per_dollar: u32,
    #[schema(value_type = Option<String>, example = "2.5")]
    pub cash_back_percent: Option<Decimal>,
    #[schema(value_type = String, example = "0")]
    pub minimum_purchase: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LoyaltyProgram> for ProgramResponse {
    fn from(program: LoyaltyProgram) -> Self {
        Self {
            id: program.id,
            name: program.name,
            kind: program.kind,
            points_per_dollar: program.points_per_dollar,
            cash_back_percent: program.cash_back_percent,
            minimum_purchase: program.minimum_purchase,
            is_active: program.is_active,
            created_at: program.created_at,
            updated_at: program.updated_at,
        }
    }
}
