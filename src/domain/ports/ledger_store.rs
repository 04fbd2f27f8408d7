//! Driven port for the durable ledger store.
//!
//! The store keeps all five record kinds (accounts, transactions,
//! redemptions, rewards, programs) and exposes plain reads plus two
//! compare-and-swap commit operations. Each commit applies its full write set
//! atomically, but only while the caller's snapshot of the account is still
//! current; otherwise it fails with [`LedgerStoreError::VersionConflict`] and
//! the orchestrator reloads and retries.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    CustomerId, CustomerLoyaltyAccount, LoyaltyProgram, NewLoyaltyProgram, NewReward,
    PointTransaction, Reward, RewardRedemption, RewardUpdate, Tier,
};

/// Errors raised by ledger store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerStoreError {
    /// Store connection could not be established.
    #[error("ledger store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("ledger store query failed: {message}")]
    Query { message: String },
    /// The account changed between snapshot and commit.
    #[error("loyalty account for customer {customer_id} was modified concurrently")]
    VersionConflict { customer_id: String },
}

impl LedgerStoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn version_conflict(customer_id: impl Into<String>) -> Self {
        Self::VersionConflict {
            customer_id: customer_id.into(),
        }
    }
}

impl From<LedgerStoreError> for crate::domain::Error {
    fn from(error: LedgerStoreError) -> Self {
        match error {
            LedgerStoreError::Connection { message } => {
                Self::service_unavailable(format!("ledger store unavailable: {message}"))
            }
            LedgerStoreError::Query { message } => {
                Self::internal(format!("ledger store error: {message}"))
            }
            LedgerStoreError::VersionConflict { .. } => {
                Self::conflict("loyalty account was modified concurrently; please retry")
            }
        }
    }
}

/// Replacement state for an account, guarded by the version observed when the
/// snapshot was read.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountMutation {
    pub customer_id: CustomerId,
    /// Version the caller read; the commit fails if the stored row has moved.
    pub expected_version: u64,
    pub total_points: i64,
    pub current_tier: Tier,
    pub lifetime_spent: Decimal,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerStats {
    pub total_members: u64,
    /// Sum of earned-kind transaction amounts.
    pub total_points_issued: i64,
    pub total_redemptions: u64,
    /// Sum of lifetime spend across all accounts.
    pub revenue_impact: Decimal,
}

/// Port for reading and mutating durable loyalty records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Find the loyalty account for a customer.
    async fn find_account(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<CustomerLoyaltyAccount>, LedgerStoreError>;

    /// Insert a fresh account unless one already exists; returns the stored
    /// row either way, making lazy creation race-free and idempotent.
    async fn insert_account_if_absent(
        &self,
        account: CustomerLoyaltyAccount,
    ) -> Result<CustomerLoyaltyAccount, LedgerStoreError>;

    /// Atomically apply a purchase: the account update plus its earned
    /// transaction, all or nothing.
    async fn commit_purchase(
        &self,
        mutation: AccountMutation,
        transaction: PointTransaction,
    ) -> Result<(), LedgerStoreError>;

    /// Atomically apply a redemption: the account update, the debit
    /// transaction, the redemption row, and the reward's redemption counter,
    /// all or nothing.
    async fn commit_redemption(
        &self,
        mutation: AccountMutation,
        transaction: PointTransaction,
        redemption: RewardRedemption,
    ) -> Result<(), LedgerStoreError>;

    /// Ledger entries for a customer, most recent first.
    async fn list_transactions(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<PointTransaction>, LedgerStoreError>;

    /// Redemptions for a customer, most recent first.
    async fn list_redemptions(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<RewardRedemption>, LedgerStoreError>;

    /// Find a reward by id.
    async fn find_reward(&self, reward_id: &Uuid) -> Result<Option<Reward>, LedgerStoreError>;

    /// All rewards, newest first.
    async fn list_rewards(&self) -> Result<Vec<Reward>, LedgerStoreError>;

    /// Active rewards ordered by ascending point cost.
    async fn list_active_rewards(&self) -> Result<Vec<Reward>, LedgerStoreError>;

    /// Create a reward.
    async fn insert_reward(&self, reward: NewReward) -> Result<Reward, LedgerStoreError>;

    /// Apply a partial update to a reward.
    async fn update_reward(
        &self,
        reward_id: &Uuid,
        update: RewardUpdate,
    ) -> Result<Option<Reward>, LedgerStoreError>;

    /// All programs, newest first.
    async fn list_programs(&self) -> Result<Vec<LoyaltyProgram>, LedgerStoreError>;

    /// Active programs, newest first.
    async fn list_active_programs(&self) -> Result<Vec<LoyaltyProgram>, LedgerStoreError>;

    /// Create a program.
    async fn insert_program(
        &self,
        program: NewLoyaltyProgram,
    ) -> Result<LoyaltyProgram, LedgerStoreError>;

    /// Aggregate counters for the admin dashboard.
    async fn stats_snapshot(&self) -> Result<LedgerStats, LedgerStoreError>;
}
