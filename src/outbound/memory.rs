//! In-memory ledger store.
//!
//! Reference adapter for the [`LedgerStore`] port. All records live behind a
//! single mutex, which makes every commit operation naturally atomic: the
//! account update and its companion rows are applied under one guard or not
//! at all. The optimistic version check still runs first, so concurrent
//! writers observe exactly the semantics a relational adapter would give
//! them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{AccountMutation, LedgerStats, LedgerStore, LedgerStoreError};
use crate::domain::{
    CustomerId, CustomerLoyaltyAccount, LoyaltyProgram, NewLoyaltyProgram, NewReward,
    PointTransaction, Reward, RewardRedemption, RewardUpdate, TransactionKind,
};

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, CustomerLoyaltyAccount>,
    transactions: Vec<PointTransaction>,
    redemptions: Vec<RewardRedemption>,
    rewards: Vec<Reward>,
    programs: Vec<LoyaltyProgram>,
}

impl Inner {
    /// Check the optimistic guard and apply an account mutation.
    ///
    /// Callers must perform every other validation before invoking this so
    /// the overall commit stays all-or-nothing.
    fn apply_account_mutation(
        &mut self,
        mutation: &AccountMutation,
    ) -> Result<(), LedgerStoreError> {
        let account = self
            .accounts
            .get_mut(mutation.customer_id.as_ref())
            .ok_or_else(|| {
                LedgerStoreError::query(format!(
                    "no loyalty account for customer {}",
                    mutation.customer_id
                ))
            })?;

        if account.version != mutation.expected_version {
            return Err(LedgerStoreError::version_conflict(
                mutation.customer_id.as_ref(),
            ));
        }

        account.total_points = mutation.total_points;
        account.current_tier = mutation.current_tier;
        account.lifetime_spent = mutation.lifetime_spent;
        account.version += 1;
        account.updated_at = Utc::now();
        Ok(())
    }
}

/// [`LedgerStore`] adapter keeping all five record kinds in process memory.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: Mutex<Inner>,
}

impl InMemoryLedgerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, LedgerStoreError> {
        self.inner
            .lock()
            .map_err(|_| LedgerStoreError::connection("ledger store mutex poisoned"))
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn find_account(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<CustomerLoyaltyAccount>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner.accounts.get(customer_id.as_ref()).cloned())
    }

    async fn insert_account_if_absent(
        &self,
        account: CustomerLoyaltyAccount,
    ) -> Result<CustomerLoyaltyAccount, LedgerStoreError> {
        let mut inner = self.lock()?;
        let key = account.customer_id.as_ref().to_owned();
        Ok(inner.accounts.entry(key).or_insert(account).clone())
    }

    async fn commit_purchase(
        &self,
        mutation: AccountMutation,
        transaction: PointTransaction,
    ) -> Result<(), LedgerStoreError> {
        let mut inner = self.lock()?;
        inner.apply_account_mutation(&mutation)?;
        inner.transactions.push(transaction);
        Ok(())
    }

    async fn commit_redemption(
        &self,
        mutation: AccountMutation,
        transaction: PointTransaction,
        redemption: RewardRedemption,
    ) -> Result<(), LedgerStoreError> {
        let mut inner = self.lock()?;

        // Referential check up front; nothing may be written if it fails.
        if !inner
            .rewards
            .iter()
            .any(|reward| reward.id == redemption.reward_id)
        {
            return Err(LedgerStoreError::query(format!(
                "no reward {} for redemption",
                redemption.reward_id
            )));
        }

        inner.apply_account_mutation(&mutation)?;

        let reward_id = redemption.reward_id;
        inner.transactions.push(transaction);
        inner.redemptions.push(redemption);
        if let Some(reward) = inner
            .rewards
            .iter_mut()
            .find(|reward| reward.id == reward_id)
        {
            reward.redemption_count += 1;
            reward.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn list_transactions(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<PointTransaction>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .transactions
            .iter()
            .rev()
            .filter(|transaction| &transaction.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_redemptions(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<RewardRedemption>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .redemptions
            .iter()
            .rev()
            .filter(|redemption| &redemption.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn find_reward(&self, reward_id: &Uuid) -> Result<Option<Reward>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .rewards
            .iter()
            .find(|reward| &reward.id == reward_id)
            .cloned())
    }

    async fn list_rewards(&self) -> Result<Vec<Reward>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner.rewards.iter().rev().cloned().collect())
    }

    async fn list_active_rewards(&self) -> Result<Vec<Reward>, LedgerStoreError> {
        let inner = self.lock()?;
        let mut rewards: Vec<Reward> = inner
            .rewards
            .iter()
            .filter(|reward| reward.is_active)
            .cloned()
            .collect();
        rewards.sort_by_key(|reward| reward.point_cost);
        Ok(rewards)
    }

    async fn insert_reward(&self, reward: NewReward) -> Result<Reward, LedgerStoreError> {
        let mut inner = self.lock()?;
        let reward = Reward::create(reward, Utc::now());
        inner.rewards.push(reward.clone());
        Ok(reward)
    }

    async fn update_reward(
        &self,
        reward_id: &Uuid,
        update: RewardUpdate,
    ) -> Result<Option<Reward>, LedgerStoreError> {
        let mut inner = self.lock()?;
        Ok(inner
            .rewards
            .iter_mut()
            .find(|reward| &reward.id == reward_id)
            .map(|reward| {
                reward.apply(update, Utc::now());
                reward.clone()
            }))
    }

    async fn list_programs(&self) -> Result<Vec<LoyaltyProgram>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner.programs.iter().rev().cloned().collect())
    }

    async fn list_active_programs(&self) -> Result<Vec<LoyaltyProgram>, LedgerStoreError> {
        let inner = self.lock()?;
        Ok(inner
            .programs
            .iter()
            .rev()
            .filter(|program| program.is_active)
            .cloned()
            .collect())
    }

    async fn insert_program(
        &self,
        program: NewLoyaltyProgram,
    ) -> Result<LoyaltyProgram, LedgerStoreError> {
        let mut inner = self.lock()?;
        let program = LoyaltyProgram::create(program, Utc::now());
        inner.programs.push(program.clone());
        Ok(program)
    }

    async fn stats_snapshot(&self) -> Result<LedgerStats, LedgerStoreError> {
        let inner = self.lock()?;
        let total_points_issued = inner
            .transactions
            .iter()
            .filter(|transaction| transaction.kind == TransactionKind::Earned)
            .map(|transaction| transaction.amount)
            .sum();
        let revenue_impact = inner
            .accounts
            .values()
            .map(|account| account.lifetime_spent)
            .sum::<Decimal>();

        Ok(LedgerStats {
            total_members: inner.accounts.len() as u64,
            total_points_issued,
            total_redemptions: inner.redemptions.len() as u64,
            revenue_impact,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{RewardKind, Tier};

    fn customer() -> CustomerId {
        CustomerId::new("cust-1").expect("valid id")
    }

    async fn store_with_account(points: i64) -> InMemoryLedgerStore {
        let store = InMemoryLedgerStore::new();
        let mut account = CustomerLoyaltyAccount::open(customer(), Utc::now());
        account.total_points = points;
        store
            .insert_account_if_absent(account)
            .await
            .expect("account inserted");
        store
    }

    fn shipping_reward() -> NewReward {
        NewReward {
            name: "Free Shipping".to_owned(),
            description: None,
            kind: RewardKind::Shipping,
            point_cost: 500,
            discount_amount: None,
            discount_percent: None,
            is_active: true,
        }
    }

    fn mutation(expected_version: u64, total_points: i64) -> AccountMutation {
        AccountMutation {
            customer_id: customer(),
            expected_version,
            total_points,
            current_tier: Tier::Bronze,
            lifetime_spent: dec!(10),
        }
    }

    #[tokio::test]
    async fn insert_account_if_absent_keeps_the_first_row() {
        let store = store_with_account(250).await;
        let duplicate = CustomerLoyaltyAccount::open(customer(), Utc::now());

        let stored = store
            .insert_account_if_absent(duplicate)
            .await
            .expect("idempotent insert");

        assert_eq!(stored.total_points, 250, "existing row wins");
    }

    #[tokio::test]
    async fn commit_purchase_applies_account_and_ledger_together() {
        let store = store_with_account(0).await;
        let transaction = PointTransaction::earned(
            customer(),
            100,
            "Purchase of $10".to_owned(),
            "order-1".to_owned(),
            Utc::now(),
        );

        store
            .commit_purchase(mutation(0, 100), transaction)
            .await
            .expect("commit succeeds");

        let account = store
            .find_account(&customer())
            .await
            .expect("lookup")
            .expect("account present");
        assert_eq!(account.total_points, 100);
        assert_eq!(account.version, 1);
        assert_eq!(
            store.list_transactions(&customer()).await.expect("list").len(),
            1
        );
    }

    #[tokio::test]
    async fn stale_version_commits_are_rejected_without_writes() {
        let store = store_with_account(0).await;
        let transaction = PointTransaction::earned(
            customer(),
            100,
            "Purchase of $10".to_owned(),
            "order-1".to_owned(),
            Utc::now(),
        );

        let err = store
            .commit_purchase(mutation(7, 100), transaction)
            .await
            .expect_err("stale version rejected");

        assert!(matches!(err, LedgerStoreError::VersionConflict { .. }));
        let account = store
            .find_account(&customer())
            .await
            .expect("lookup")
            .expect("account present");
        assert_eq!(account.total_points, 0, "balance untouched");
        assert!(
            store
                .list_transactions(&customer())
                .await
                .expect("list")
                .is_empty(),
            "no ledger entry written"
        );
    }

    #[tokio::test]
    async fn commit_redemption_writes_all_rows_and_bumps_the_counter() {
        let store = store_with_account(1500).await;
        let reward = store
            .insert_reward(shipping_reward())
            .await
            .expect("reward inserted");

        let now = Utc::now();
        let redemption = RewardRedemption::claim(customer(), reward.id, 500, now);
        let transaction =
            PointTransaction::redeemed(customer(), 500, "Redeemed Free Shipping".to_owned(), now);

        store
            .commit_redemption(mutation(0, 1000), transaction, redemption)
            .await
            .expect("commit succeeds");

        let stored_reward = store
            .find_reward(&reward.id)
            .await
            .expect("lookup")
            .expect("reward present");
        assert_eq!(stored_reward.redemption_count, 1);
        assert_eq!(
            store.list_redemptions(&customer()).await.expect("list").len(),
            1
        );
    }

    #[tokio::test]
    async fn commit_redemption_rejects_unknown_rewards_without_writes() {
        let store = store_with_account(1500).await;
        let now = Utc::now();
        let redemption = RewardRedemption::claim(customer(), Uuid::new_v4(), 500, now);
        let transaction =
            PointTransaction::redeemed(customer(), 500, "Redeemed ghost".to_owned(), now);

        let err = store
            .commit_redemption(mutation(0, 1000), transaction, redemption)
            .await
            .expect_err("unknown reward rejected");

        assert!(matches!(err, LedgerStoreError::Query { .. }));
        let account = store
            .find_account(&customer())
            .await
            .expect("lookup")
            .expect("account present");
        assert_eq!(account.total_points, 1500, "balance untouched");
    }

    #[tokio::test]
    async fn transactions_list_most_recent_first() {
        let store = store_with_account(0).await;
        for (index, points) in [10_i64, 20, 30].into_iter().enumerate() {
            let transaction = PointTransaction::earned(
                customer(),
                points,
                format!("Purchase {index}"),
                format!("order-{index}"),
                Utc::now(),
            );
            let version = index as u64;
            store
                .commit_purchase(mutation(version, points), transaction)
                .await
                .expect("commit succeeds");
        }

        let amounts: Vec<i64> = store
            .list_transactions(&customer())
            .await
            .expect("list")
            .into_iter()
            .map(|transaction| transaction.amount)
            .collect();
        assert_eq!(amounts, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn active_rewards_sort_by_ascending_cost() {
        let store = InMemoryLedgerStore::new();
        for (cost, active) in [(2000_i64, true), (500, true), (1000, false)] {
            let mut fields = shipping_reward();
            fields.point_cost = cost;
            fields.is_active = active;
            store.insert_reward(fields).await.expect("reward inserted");
        }

        let costs: Vec<i64> = store
            .list_active_rewards()
            .await
            .expect("list")
            .into_iter()
            .map(|reward| reward.point_cost)
            .collect();
        assert_eq!(costs, vec![500, 2000], "inactive rewards are hidden");
    }

    #[tokio::test]
    async fn stats_count_only_earned_points_as_issued() {
        let store = store_with_account(0).await;
        let earn = PointTransaction::earned(
            customer(),
            300,
            "Purchase of $30".to_owned(),
            "order-1".to_owned(),
            Utc::now(),
        );
        store
            .commit_purchase(
                AccountMutation {
                    customer_id: customer(),
                    expected_version: 0,
                    total_points: 300,
                    current_tier: Tier::Bronze,
                    lifetime_spent: dec!(30),
                },
                earn,
            )
            .await
            .expect("commit succeeds");

        let reward = store
            .insert_reward(shipping_reward())
            .await
            .expect("reward inserted");
        let now = Utc::now();
        store
            .commit_redemption(
                AccountMutation {
                    customer_id: customer(),
                    expected_version: 1,
                    total_points: -200,
                    current_tier: Tier::Bronze,
                    lifetime_spent: dec!(30),
                },
                PointTransaction::redeemed(customer(), 500, "Redeemed".to_owned(), now),
                RewardRedemption::claim(customer(), reward.id, 500, now),
            )
            .await
            .expect("commit succeeds");

        let stats = store.stats_snapshot().await.expect("stats");
        assert_eq!(stats.total_members, 1);
        assert_eq!(stats.total_points_issued, 300, "debits are not issuance");
        assert_eq!(stats.total_redemptions, 1);
        assert_eq!(stats.revenue_impact, dec!(30));
    }
}
