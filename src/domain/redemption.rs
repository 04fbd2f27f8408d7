//! Reward redemption records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::CustomerId;

/// Lifecycle state of a claimed reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    /// Claimed and still usable.
    Active,
    /// Consumed at checkout.
    Used,
    /// Lapsed without being used.
    Expired,
}

/// Error returned when parsing a redemption status from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRedemptionStatusError;

impl fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Used => f.write_str("used"),
            Self::Expired => f.write_str("expired"),
        }
    }
}

impl fmt::Display for ParseRedemptionStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid redemption status")
    }
}

impl std::error::Error for ParseRedemptionStatusError {}

impl FromStr for RedemptionStatus {
    type Err = ParseRedemptionStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "used" => Ok(Self::Used),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseRedemptionStatusError),
        }
    }
}

/// Record of a customer claiming a reward.
///
/// `points_used` captures the reward's cost at redemption time; later catalog
/// price changes never reprice an existing claim. Each redemption is paired
/// 1:1 with a negative ledger entry of the same magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardRedemption {
    pub id: Uuid,
    pub customer_id: CustomerId,
    pub reward_id: Uuid,
    pub points_used: i64,
    pub status: RedemptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RewardRedemption {
    /// Fresh claim in the `active` state.
    #[must_use]
    pub fn claim(
        customer_id: CustomerId,
        reward_id: Uuid,
        points_used: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            reward_id,
            points_used,
            status: RedemptionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}
