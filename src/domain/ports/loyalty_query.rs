//! Driving port for loyalty read models.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{CustomerId, Error, PointTransaction, RewardRedemption};

/// Aggregate figures for the admin dashboard. Simple sums and counts only.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyStatsResponse {
    pub total_members: u64,
    pub total_points_issued: i64,
    pub total_redemptions: u64,
    pub revenue_impact: Decimal,
}

/// Port for non-mutating loyalty reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoyaltyQuery: Send + Sync {
    /// A customer's ledger entries, most recent first.
    async fn list_transactions(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PointTransaction>, Error>;

    /// A customer's redemptions, most recent first.
    async fn list_redemptions(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<RewardRedemption>, Error>;

    /// Aggregate counters across the whole programme.
    async fn loyalty_stats(&self) -> Result<LoyaltyStatsResponse, Error>;
}
