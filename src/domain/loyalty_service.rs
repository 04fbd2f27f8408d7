//! Loyalty orchestrator.
//!
//! The only component allowed to produce a consistent before/after state
//! transition across the account, the point ledger, and redemption records.
//! Point arithmetic lives in [`crate::domain::points`], tier derivation in
//! [`crate::domain::tier`]; this service sequences them against the ledger
//! store and owns the retry discipline for optimistic-concurrency conflicts.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::points::{compute_earned_points, validate_redemption};
use crate::domain::ports::{
    AccountMutation, LedgerStore, LedgerStoreError, LoyaltyCommand, LoyaltyQuery,
    LoyaltyStatsResponse, RecordPurchaseRequest, RecordPurchaseResponse, RedeemRewardRequest,
};
use crate::domain::program::DEFAULT_POINTS_PER_DOLLAR;
use crate::domain::{
    CustomerId, CustomerLoyaltyAccount, Error, PointTransaction, PointsComputationError,
    ProgramKind, RewardRedemption, Tier,
};

/// How many times a conflicted commit is retried before the failure surfaces
/// to the caller as transient.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

fn map_points_error(error: PointsComputationError) -> Error {
    match error {
        PointsComputationError::InvalidAmount { .. } => {
            Error::invalid_request("purchase amount must be positive")
        }
        PointsComputationError::AmountOutOfRange { .. } => {
            Error::invalid_request("purchase amount is too large to award points for")
        }
    }
}

/// Loyalty service implementing the command and query driving ports.
#[derive(Clone)]
pub struct LoyaltyService<S> {
    ledger: Arc<S>,
}

impl<S> LoyaltyService<S> {
    /// Create a new service backed by the given ledger store.
    pub fn new(ledger: Arc<S>) -> Self {
        Self { ledger }
    }
}

impl<S> LoyaltyService<S>
where
    S: LedgerStore,
{
    /// Resolve the governing earn rate from the newest active points program,
    /// falling back to the default when none is configured.
    async fn active_points_per_dollar(&self) -> Result<u32, Error> {
        let programs = self
            .ledger
            .list_active_programs()
            .await
            .map_err(Error::from)?;

        Ok(programs
            .into_iter()
            .find(|program| program.kind == ProgramKind::Points)
            .map_or(DEFAULT_POINTS_PER_DOLLAR, |program| {
                program.points_per_dollar
            }))
    }

    async fn load_or_create_account(
        &self,
        customer_id: &CustomerId,
    ) -> Result<CustomerLoyaltyAccount, Error> {
        if let Some(account) = self
            .ledger
            .find_account(customer_id)
            .await
            .map_err(Error::from)?
        {
            return Ok(account);
        }

        self.ledger
            .insert_account_if_absent(CustomerLoyaltyAccount::open(
                customer_id.clone(),
                Utc::now(),
            ))
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<S> LoyaltyCommand for LoyaltyService<S>
where
    S: LedgerStore,
{
    async fn get_or_create_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<CustomerLoyaltyAccount, Error> {
        self.load_or_create_account(&customer_id).await
    }

    async fn record_purchase(
        &self,
        request: RecordPurchaseRequest,
    ) -> Result<RecordPurchaseResponse, Error> {
        let RecordPurchaseRequest {
            customer_id,
            amount,
            order_id,
        } = request;

        let rate = self.active_points_per_dollar().await?;
        let points_earned = compute_earned_points(amount, rate).map_err(map_points_error)?;
        let order_id = order_id.unwrap_or_else(|| format!("order_{}", Uuid::new_v4().simple()));

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let account = self.load_or_create_account(&customer_id).await?;
            let new_lifetime_spent = account.lifetime_spent + amount;
            let mutation = AccountMutation {
                customer_id: customer_id.clone(),
                expected_version: account.version,
                total_points: account.total_points + points_earned,
                current_tier: Tier::for_lifetime_spent(new_lifetime_spent),
                lifetime_spent: new_lifetime_spent,
            };
            let transaction = PointTransaction::earned(
                customer_id.clone(),
                points_earned,
                format!("Purchase of ${amount}"),
                order_id.clone(),
                Utc::now(),
            );

            match self
                .ledger
                .commit_purchase(mutation, transaction.clone())
                .await
            {
                Ok(()) => {
                    info!(
                        customer_id = %customer_id,
                        points_earned,
                        tier = %Tier::for_lifetime_spent(new_lifetime_spent),
                        "purchase recorded"
                    );
                    return Ok(RecordPurchaseResponse {
                        transaction,
                        points_earned,
                    });
                }
                Err(LedgerStoreError::VersionConflict { .. }) if attempt < MAX_COMMIT_ATTEMPTS => {
                    debug!(customer_id = %customer_id, attempt, "purchase commit conflicted; retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        warn!(customer_id = %customer_id, "purchase commit conflicted on every attempt");
        Err(Error::conflict(
            "loyalty account was modified concurrently; please retry",
        ))
    }

    async fn redeem_reward(
        &self,
        request: RedeemRewardRequest,
    ) -> Result<RewardRedemption, Error> {
        let RedeemRewardRequest {
            customer_id,
            reward_id,
        } = request;

        let reward = self
            .ledger
            .find_reward(&reward_id)
            .await
            .map_err(Error::from)?
            .filter(|reward| reward.is_active)
            .ok_or_else(|| Error::not_found("reward not found or inactive"))?;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let account = self
                .ledger
                .find_account(&customer_id)
                .await
                .map_err(Error::from)?
                .ok_or_else(|| Error::not_found("no loyalty account for this customer"))?;

            validate_redemption(account.total_points, reward.point_cost).map_err(|err| {
                Error::insufficient_points(format!(
                    "insufficient points: balance {} is below the reward cost {}",
                    err.balance, err.required
                ))
            })?;

            let now = Utc::now();
            let redemption =
                RewardRedemption::claim(customer_id.clone(), reward.id, reward.point_cost, now);
            let transaction = PointTransaction::redeemed(
                customer_id.clone(),
                reward.point_cost,
                format!("Redeemed {}", reward.name),
                now,
            );
            let mutation = AccountMutation {
                customer_id: customer_id.clone(),
                expected_version: account.version,
                total_points: account.total_points - reward.point_cost,
                // Redemptions never reduce lifetime spend, so the tier is
                // re-derived from the unchanged figure.
                current_tier: Tier::for_lifetime_spent(account.lifetime_spent),
                lifetime_spent: account.lifetime_spent,
            };

            match self
                .ledger
                .commit_redemption(mutation, transaction, redemption.clone())
                .await
            {
                Ok(()) => {
                    info!(
                        customer_id = %customer_id,
                        reward_id = %reward.id,
                        points_used = reward.point_cost,
                        "reward redeemed"
                    );
                    return Ok(redemption);
                }
                Err(LedgerStoreError::VersionConflict { .. }) if attempt < MAX_COMMIT_ATTEMPTS => {
                    debug!(customer_id = %customer_id, attempt, "redemption commit conflicted; retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        warn!(customer_id = %customer_id, "redemption commit conflicted on every attempt");
        Err(Error::conflict(
            "loyalty account was modified concurrently; please retry",
        ))
    }
}

#[async_trait]
impl<S> LoyaltyQuery for LoyaltyService<S>
where
    S: LedgerStore,
{
    async fn list_transactions(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<PointTransaction>, Error> {
        self.ledger
            .list_transactions(&customer_id)
            .await
            .map_err(Error::from)
    }

    async fn list_redemptions(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<RewardRedemption>, Error> {
        self.ledger
            .list_redemptions(&customer_id)
            .await
            .map_err(Error::from)
    }

    async fn loyalty_stats(&self) -> Result<LoyaltyStatsResponse, Error> {
        let stats = self
            .ledger
            .stats_snapshot()
            .await
            .map_err(Error::from)?;

        Ok(LoyaltyStatsResponse {
            total_members: stats.total_members,
            total_points_issued: stats.total_points_issued,
            total_redemptions: stats.total_redemptions,
            revenue_impact: stats.revenue_impact,
        })
    }
}

#[cfg(test)]
#[path = "loyalty_service_tests.rs"]
mod tests;
