//! Tier progression engine.
//!
//! Maps cumulative lifetime spend onto a membership tier under fixed,
//! non-overlapping thresholds. The mapping is always evaluated fresh from the
//! full spend figure; tiers are never advanced incrementally.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifetime spend at which silver membership starts.
pub const SILVER_THRESHOLD: Decimal = Decimal::from_parts(300, 0, 0, false, 0);
/// Lifetime spend at which gold membership starts.
pub const GOLD_THRESHOLD: Decimal = Decimal::from_parts(600, 0, 0, false, 0);
/// Lifetime spend at which platinum membership starts.
pub const PLATINUM_THRESHOLD: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Membership tier implied by cumulative spend.
///
/// Lower bounds are inclusive, upper bounds exclusive: bronze covers
/// `[0, 300)`, silver `[300, 600)`, gold `[600, 1000)`, and platinum
/// `[1000, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Derive the tier for a cumulative lifetime spend figure.
    ///
    /// Deterministic and idempotent; any spend below the silver threshold
    /// (including the degenerate negative case, which cannot arise from
    /// purchases) maps to bronze.
    ///
    /// # Examples
    /// ```
    /// use loyalty_backend::domain::Tier;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Tier::for_lifetime_spent(Decimal::new(29999, 2)), Tier::Bronze);
    /// assert_eq!(Tier::for_lifetime_spent(Decimal::from(300)), Tier::Silver);
    /// ```
    #[must_use]
    pub fn for_lifetime_spent(lifetime_spent: Decimal) -> Self {
        if lifetime_spent >= PLATINUM_THRESHOLD {
            Self::Platinum
        } else if lifetime_spent >= GOLD_THRESHOLD {
            Self::Gold
        } else if lifetime_spent >= SILVER_THRESHOLD {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Display-only earn multiplier (points per dollar) shown to customers.
    ///
    /// Presentation data only: the rate actually applied to a purchase comes
    /// from the governing loyalty program, which may disagree with this
    /// figure. Wiring the multiplier into earning is deliberately not done.
    #[must_use]
    pub const fn display_multiplier(self) -> u32 {
        match self {
            Self::Bronze => 10,
            Self::Silver => 12,
            Self::Gold => 15,
            Self::Platinum => 20,
        }
    }
}

/// Error returned when parsing a tier from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTierError;

impl fmt::Display for ParseTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid membership tier")
    }
}

impl std::error::Error for ParseTierError {}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bronze => f.write_str("bronze"),
            Self::Silver => f.write_str("silver"),
            Self::Gold => f.write_str("gold"),
            Self::Platinum => f.write_str("platinum"),
        }
    }
}

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            _ => Err(ParseTierError),
        }
    }
}
