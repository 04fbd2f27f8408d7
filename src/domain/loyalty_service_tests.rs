//! Behaviour coverage for the loyalty orchestrator against a mocked ledger
//! store.

use chrono::Utc;
use mockall::Sequence;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::domain::ports::{LedgerStats, MockLedgerStore};
use crate::domain::{ErrorCode, NewLoyaltyProgram, NewReward, Reward, RewardKind, TransactionKind};

fn customer() -> CustomerId {
    CustomerId::new("cust-1").expect("valid id")
}

fn account_with(points: i64, spent: Decimal, version: u64) -> CustomerLoyaltyAccount {
    let mut account = CustomerLoyaltyAccount::open(customer(), Utc::now());
    account.total_points = points;
    account.lifetime_spent = spent;
    account.current_tier = Tier::for_lifetime_spent(spent);
    account.version = version;
    account
}

fn active_reward(point_cost: i64) -> Reward {
    Reward::create(
        NewReward {
            name: "Free Shipping".to_owned(),
            description: None,
            kind: RewardKind::Shipping,
            point_cost,
            discount_amount: None,
            discount_percent: None,
            is_active: true,
        },
        Utc::now(),
    )
}

fn points_program(points_per_dollar: u32) -> crate::domain::LoyaltyProgram {
    crate::domain::LoyaltyProgram::create(
        NewLoyaltyProgram {
            name: "Standard".to_owned(),
            kind: ProgramKind::Points,
            points_per_dollar,
            cash_back_percent: None,
            minimum_purchase: Decimal::ZERO,
            is_active: true,
        },
        Utc::now(),
    )
}

#[tokio::test]
async fn purchase_awards_floored_points_and_advances_the_tier() {
    let mut store = MockLedgerStore::new();
    store
        .expect_list_active_programs()
        .times(1)
        .returning(|| Ok(vec![points_program(10)]));
    store
        .expect_find_account()
        .times(1)
        .returning(|_| Ok(Some(account_with(100, dec!(290), 3))));
    store
        .expect_commit_purchase()
        .times(1)
        .withf(|mutation, transaction| {
            mutation.expected_version == 3
                && mutation.total_points == 300
                && mutation.lifetime_spent == dec!(310)
                && mutation.current_tier == Tier::Silver
                && transaction.amount == 200
                && transaction.kind == TransactionKind::Earned
        })
        .returning(|_, _| Ok(()));

    let service = LoyaltyService::new(Arc::new(store));
    let response = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount: dec!(20),
            order_id: Some("order-99".to_owned()),
        })
        .await
        .expect("purchase recorded");

    assert_eq!(response.points_earned, 200);
    assert_eq!(response.transaction.order_id.as_deref(), Some("order-99"));
}

#[tokio::test]
async fn purchase_floors_fractional_awards() {
    let mut store = MockLedgerStore::new();
    store
        .expect_list_active_programs()
        .returning(|| Ok(Vec::new()));
    store
        .expect_find_account()
        .returning(|_| Ok(Some(account_with(0, Decimal::ZERO, 0))));
    store
        .expect_commit_purchase()
        .withf(|_, transaction| transaction.amount == 199)
        .returning(|_, _| Ok(()));

    let service = LoyaltyService::new(Arc::new(store));
    let response = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount: dec!(19.99),
            order_id: None,
        })
        .await
        .expect("purchase recorded");

    assert_eq!(response.points_earned, 199);
    assert!(
        response
            .transaction
            .order_id
            .as_deref()
            .is_some_and(|id| id.starts_with("order_")),
        "synthetic order ids keep the order_ prefix"
    );
}

#[rstest]
#[case(dec!(0))]
#[case(dec!(-5))]
#[tokio::test]
async fn purchase_rejects_non_positive_amounts(#[case] amount: Decimal) {
    let mut store = MockLedgerStore::new();
    store
        .expect_list_active_programs()
        .returning(|| Ok(Vec::new()));

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount,
            order_id: None,
        })
        .await
        .expect_err("amount rejected");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn purchase_ignores_cash_programs_when_resolving_the_rate() {
    let mut cash = points_program(99);
    cash.kind = ProgramKind::Cash;

    let mut store = MockLedgerStore::new();
    store
        .expect_list_active_programs()
        .returning(move || Ok(vec![cash.clone()]));
    store
        .expect_find_account()
        .returning(|_| Ok(Some(account_with(0, Decimal::ZERO, 0))));
    store
        .expect_commit_purchase()
        .withf(|_, transaction| transaction.amount == 100)
        .returning(|_, _| Ok(()));

    let service = LoyaltyService::new(Arc::new(store));
    let response = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount: dec!(10),
            order_id: None,
        })
        .await
        .expect("purchase recorded");

    // Default rate of 10, not the cash program's figure.
    assert_eq!(response.points_earned, 100);
}

#[tokio::test]
async fn purchase_retries_once_after_a_version_conflict() {
    let mut store = MockLedgerStore::new();
    let mut seq = Sequence::new();
    store
        .expect_list_active_programs()
        .times(1)
        .returning(|| Ok(Vec::new()));
    store
        .expect_find_account()
        .times(2)
        .returning(|_| Ok(Some(account_with(0, Decimal::ZERO, 1))));
    store
        .expect_commit_purchase()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(LedgerStoreError::version_conflict("cust-1")));
    store
        .expect_commit_purchase()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));

    let service = LoyaltyService::new(Arc::new(store));
    let response = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount: dec!(5),
            order_id: None,
        })
        .await
        .expect("second attempt succeeds");

    assert_eq!(response.points_earned, 50);
}

#[tokio::test]
async fn purchase_surfaces_conflict_after_exhausting_retries() {
    let mut store = MockLedgerStore::new();
    store
        .expect_list_active_programs()
        .returning(|| Ok(Vec::new()));
    store
        .expect_find_account()
        .times(3)
        .returning(|_| Ok(Some(account_with(0, Decimal::ZERO, 1))));
    store
        .expect_commit_purchase()
        .times(3)
        .returning(|_, _| Err(LedgerStoreError::version_conflict("cust-1")));

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .record_purchase(RecordPurchaseRequest {
            customer_id: customer(),
            amount: dec!(5),
            order_id: None,
        })
        .await
        .expect_err("conflict surfaces");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn get_or_create_account_inserts_lazily() {
    let mut store = MockLedgerStore::new();
    let mut seq = Sequence::new();
    store
        .expect_find_account()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(None));
    store
        .expect_insert_account_if_absent()
        .times(1)
        .in_sequence(&mut seq)
        .withf(|account| {
            account.total_points == 0
                && account.current_tier == Tier::Bronze
                && account.lifetime_spent == Decimal::ZERO
        })
        .returning(Ok);

    let service = LoyaltyService::new(Arc::new(store));
    let account = service
        .get_or_create_account(customer())
        .await
        .expect("account created");

    assert_eq!(account.current_tier, Tier::Bronze);
}

#[tokio::test]
async fn redemption_debits_the_balance_atomically() {
    let reward = active_reward(1000);
    let reward_id = reward.id;

    let mut store = MockLedgerStore::new();
    store
        .expect_find_reward()
        .times(1)
        .returning(move |_| Ok(Some(reward.clone())));
    store
        .expect_find_account()
        .times(1)
        .returning(|_| Ok(Some(account_with(1500, dec!(700), 5))));
    store
        .expect_commit_redemption()
        .times(1)
        .withf(move |mutation, transaction, redemption| {
            mutation.expected_version == 5
                && mutation.total_points == 500
                && mutation.lifetime_spent == dec!(700)
                && mutation.current_tier == Tier::Gold
                && transaction.amount == -1000
                && transaction.kind == TransactionKind::Redeemed
                && redemption.reward_id == reward_id
                && redemption.points_used == 1000
        })
        .returning(|_, _, _| Ok(()));

    let service = LoyaltyService::new(Arc::new(store));
    let redemption = service
        .redeem_reward(RedeemRewardRequest {
            customer_id: customer(),
            reward_id,
        })
        .await
        .expect("redemption succeeds");

    assert_eq!(redemption.points_used, 1000);
}

#[tokio::test]
async fn redemption_rejects_insufficient_balances_without_writing() {
    let reward = active_reward(1000);
    let reward_id = reward.id;

    let mut store = MockLedgerStore::new();
    store
        .expect_find_reward()
        .returning(move |_| Ok(Some(reward.clone())));
    store
        .expect_find_account()
        .returning(|_| Ok(Some(account_with(500, dec!(100), 2))));
    // No commit expectation: any write would fail the test.

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .redeem_reward(RedeemRewardRequest {
            customer_id: customer(),
            reward_id,
        })
        .await
        .expect_err("redemption rejected");

    assert_eq!(err.code(), ErrorCode::InsufficientPoints);
}

#[tokio::test]
async fn redemption_rejects_inactive_rewards() {
    let mut reward = active_reward(100);
    reward.is_active = false;
    let reward_id = reward.id;

    let mut store = MockLedgerStore::new();
    store
        .expect_find_reward()
        .returning(move |_| Ok(Some(reward.clone())));

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .redeem_reward(RedeemRewardRequest {
            customer_id: customer(),
            reward_id,
        })
        .await
        .expect_err("inactive reward rejected");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn redemption_requires_an_existing_account() {
    let reward = active_reward(100);
    let reward_id = reward.id;

    let mut store = MockLedgerStore::new();
    store
        .expect_find_reward()
        .returning(move |_| Ok(Some(reward.clone())));
    store.expect_find_account().returning(|_| Ok(None));

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .redeem_reward(RedeemRewardRequest {
            customer_id: customer(),
            reward_id,
        })
        .await
        .expect_err("missing account rejected");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn store_outages_surface_as_service_unavailable() {
    let mut store = MockLedgerStore::new();
    store
        .expect_list_transactions()
        .returning(|_| Err(LedgerStoreError::connection("refused")));

    let service = LoyaltyService::new(Arc::new(store));
    let err = service
        .list_transactions(customer())
        .await
        .expect_err("outage surfaces");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn stats_pass_through_the_ledger_snapshot() {
    let mut store = MockLedgerStore::new();
    store.expect_stats_snapshot().returning(|| {
        Ok(LedgerStats {
            total_members: 4,
            total_points_issued: 12_345,
            total_redemptions: 2,
            revenue_impact: dec!(940.25),
        })
    });

    let service = LoyaltyService::new(Arc::new(store));
    let stats = service.loyalty_stats().await.expect("stats load");

    assert_eq!(stats.total_members, 4);
    assert_eq!(stats.total_points_issued, 12_345);
    assert_eq!(stats.total_redemptions, 2);
    assert_eq!(stats.revenue_impact, dec!(940.25));
}
