//! Points accounting engine.
//!
//! Stateless arithmetic for earning and spending points. Balances are never
//! mutated here; debits are expressed as negative ledger entries recorded by
//! the orchestrator.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Errors raised while computing a point award.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointsComputationError {
    /// The purchase amount was zero or negative.
    InvalidAmount { amount: Decimal },
    /// The award does not fit the ledger's integer range.
    AmountOutOfRange { amount: Decimal },
}

impl fmt::Display for PointsComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount { amount } => {
                write!(f, "purchase amount must be positive, got {amount}")
            }
            Self::AmountOutOfRange { amount } => {
                write!(
                    f,
                    "purchase amount {amount} exceeds the representable point range"
                )
            }
        }
    }
}

impl std::error::Error for PointsComputationError {}

/// Error raised when a redemption would overdraw the balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientPointsError {
    /// Balance observed at validation time.
    pub balance: i64,
    /// Points the reward costs.
    pub required: i64,
}

impl fmt::Display for InsufficientPointsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient points: balance {} is below the required {}",
            self.balance, self.required
        )
    }
}

impl std::error::Error for InsufficientPointsError {}

/// Compute the points earned by a purchase.
///
/// The award is `floor(amount × points_per_dollar)`: fractional points always
/// truncate toward zero, never round up. Downstream statements depend on this
/// exact rounding, so 19.99 at 10 points per dollar earns 199 points, not 200.
///
/// # Examples
/// ```
/// use loyalty_backend::domain::compute_earned_points;
/// use rust_decimal::Decimal;
///
/// let earned = compute_earned_points(Decimal::new(1999, 2), 10).unwrap();
/// assert_eq!(earned, 199);
/// ```
pub fn compute_earned_points(
    amount: Decimal,
    points_per_dollar: u32,
) -> Result<i64, PointsComputationError> {
    if amount <= Decimal::ZERO {
        return Err(PointsComputationError::InvalidAmount { amount });
    }

    let raw = amount
        .checked_mul(Decimal::from(points_per_dollar))
        .ok_or(PointsComputationError::AmountOutOfRange { amount })?;

    raw.floor()
        .to_i64()
        .ok_or(PointsComputationError::AmountOutOfRange { amount })
}

/// Check that a balance covers a redemption.
///
/// The check alone is advisory; callers must pair it with a versioned commit
/// so the balance cannot change between validation and debit.
pub fn validate_redemption(
    current_balance: i64,
    point_cost: i64,
) -> Result<(), InsufficientPointsError> {
    if current_balance < point_cost {
        return Err(InsufficientPointsError {
            balance: current_balance,
            required: point_cost,
        });
    }
    Ok(())
}
