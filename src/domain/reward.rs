//! Reward catalog entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a reward grants when redeemed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Discount,
    Shipping,
    Access,
    Product,
}

/// Error returned when parsing a reward kind from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRewardKindError;

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discount => f.write_str("discount"),
            Self::Shipping => f.write_str("shipping"),
            Self::Access => f.write_str("access"),
            Self::Product => f.write_str("product"),
        }
    }
}

impl fmt::Display for ParseRewardKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid reward kind")
    }
}

impl std::error::Error for ParseRewardKindError {}

impl FromStr for RewardKind {
    type Err = ParseRewardKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "discount" => Ok(Self::Discount),
            "shipping" => Ok(Self::Shipping),
            "access" => Ok(Self::Access),
            "product" => Ok(Self::Product),
            _ => Err(ParseRewardKindError),
        }
    }
}

/// Catalog entry customers spend points on.
///
/// `redemption_count` is a monotonic counter incremented on each successful
/// redemption; it is bumped inside the same atomic commit as the debit.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: RewardKind,
    pub point_cost: i64,
    pub discount_amount: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub is_active: bool,
    pub redemption_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a reward.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReward {
    pub name: String,
    pub description: Option<String>,
    pub kind: RewardKind,
    pub point_cost: i64,
    pub discount_amount: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub is_active: bool,
}

/// Partial update applied to an existing reward; `None` fields are left
/// untouched. `redemption_count` is deliberately absent — only successful
/// redemptions move it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub kind: Option<RewardKind>,
    pub point_cost: Option<i64>,
    pub discount_amount: Option<Option<Decimal>>,
    pub discount_percent: Option<Option<Decimal>>,
    pub is_active: Option<bool>,
}

impl Reward {
    /// Materialise a catalog entry from creation fields.
    #[must_use]
    pub fn create(fields: NewReward, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            kind: fields.kind,
            point_cost: fields.point_cost,
            discount_amount: fields.discount_amount,
            discount_percent: fields.discount_percent,
            is_active: fields.is_active,
            redemption_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: RewardUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(point_cost) = update.point_cost {
            self.point_cost = point_cost;
        }
        if let Some(discount_amount) = update.discount_amount {
            self.discount_amount = discount_amount;
        }
        if let Some(discount_percent) = update.discount_percent {
            self.discount_percent = discount_percent;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}
