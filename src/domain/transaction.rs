//! Immutable point-ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::customer::CustomerId;

/// Category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Points credited by a purchase.
    Earned,
    /// Points debited by a reward redemption.
    Redeemed,
    /// Points credited by a referral campaign.
    Referral,
}

/// Error returned when parsing a transaction kind from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTransactionKindError;

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earned => f.write_str("earned"),
            Self::Redeemed => f.write_str("redeemed"),
            Self::Referral => f.write_str("referral"),
        }
    }
}

impl fmt::Display for ParseTransactionKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid transaction kind")
    }
}

impl std::error::Error for ParseTransactionKindError {}

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earned" => Ok(Self::Earned),
            "redeemed" => Ok(Self::Redeemed),
            "referral" => Ok(Self::Referral),
            _ => Err(ParseTransactionKindError),
        }
    }
}

/// Immutable ledger entry; the source of truth the stored balance must
/// reconcile against. Positive amounts are credits, negative amounts debits.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTransaction {
    pub id: Uuid,
    pub customer_id: CustomerId,
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub order_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PointTransaction {
    /// Credit entry for a purchase award.
    #[must_use]
    pub fn earned(
        customer_id: CustomerId,
        amount: i64,
        description: String,
        order_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            amount,
            kind: TransactionKind::Earned,
            description,
            order_id: Some(order_id),
            created_at: now,
        }
    }

    /// Debit entry pairing a reward redemption; `points_used` is recorded as
    /// a negative amount of the same magnitude.
    #[must_use]
    pub fn redeemed(
        customer_id: CustomerId,
        points_used: i64,
        description: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            amount: -points_used,
            kind: TransactionKind::Redeemed,
            description,
            order_id: None,
            created_at: now,
        }
    }
}
