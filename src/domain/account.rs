//! Customer loyalty account aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::customer::CustomerId;
use crate::domain::tier::Tier;

/// Per-customer loyalty summary row.
///
/// ## Invariants
/// - `total_points` always equals the sum of the customer's ledger entries.
/// - `current_tier` is always the tier implied by `lifetime_spent`; it is
///   never set independently.
/// - `lifetime_spent` is non-negative and monotonically non-decreasing:
///   purchases add to it and redemptions never reduce it.
///
/// The account is created lazily on first access and mutated only by the
/// loyalty orchestrator through versioned commits.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerLoyaltyAccount {
    pub customer_id: CustomerId,
    pub total_points: i64,
    pub current_tier: Tier,
    pub lifetime_spent: Decimal,
    /// Optimistic-concurrency token; bumped by the ledger store on every
    /// successful commit. Never serialised to clients.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomerLoyaltyAccount {
    /// Fresh account for a customer seen for the first time.
    #[must_use]
    pub fn open(customer_id: CustomerId, now: DateTime<Utc>) -> Self {
        Self {
            customer_id,
            total_points: 0,
            current_tier: Tier::Bronze,
            lifetime_spent: Decimal::ZERO,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
