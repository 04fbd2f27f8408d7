//! Driving port for the mutating loyalty workflows.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{CustomerId, CustomerLoyaltyAccount, Error, PointTransaction, RewardRedemption};

/// Request payload for recording a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPurchaseRequest {
    pub customer_id: CustomerId,
    /// Purchase total in dollars; must be positive.
    pub amount: Decimal,
    /// Storefront order reference; a synthetic one is generated when absent.
    pub order_id: Option<String>,
}

/// Outcome of recording a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPurchaseResponse {
    /// The earned ledger entry appended by the operation.
    pub transaction: PointTransaction,
    pub points_earned: i64,
}

/// Request payload for redeeming a reward.
#[derive(Debug, Clone, PartialEq)]
pub struct RedeemRewardRequest {
    pub customer_id: CustomerId,
    pub reward_id: Uuid,
}

/// Port for the two mutating workflows plus idempotent account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoyaltyCommand: Send + Sync {
    /// Fetch the customer's account, creating it lazily on first access.
    ///
    /// This is the single entry point for lazy initialisation; no other
    /// operation creates accounts as a side effect of a read.
    async fn get_or_create_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerLoyaltyAccount, Error>;

    /// Convert a purchase into a point award and refreshed tier.
    async fn record_purchase(
        &self,
        request: RecordPurchaseRequest,
    ) -> Result<RecordPurchaseResponse, Error>;

    /// Debit the ledger for a reward claim, guarding against overdraw.
    async fn redeem_reward(&self, request: RedeemRewardRequest)
    -> Result<RewardRedemption, Error>;
}
