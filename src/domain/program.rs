//! Loyalty program configuration.
//!
//! Programs are rate-setting records, not transactional entities. The
//! orchestrator resolves the governing points-per-dollar rate from the newest
//! active points program and falls back to [`DEFAULT_POINTS_PER_DOLLAR`]
//! when none exists.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Earn rate applied when no active points program is configured.
pub const DEFAULT_POINTS_PER_DOLLAR: u32 = 10;

/// Earning mechanism a program configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    /// Points per dollar spent.
    Points,
    /// Percentage cash back (configuration only; not applied by this core).
    Cash,
}

/// Error returned when parsing a program kind from string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseProgramKindError;

impl fmt::Display for ProgramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Points => f.write_str("points"),
            Self::Cash => f.write_str("cash"),
        }
    }
}

impl fmt::Display for ParseProgramKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid program kind")
    }
}

impl std::error::Error for ParseProgramKindError {}

impl FromStr for ProgramKind {
    type Err = ParseProgramKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "points" => Ok(Self::Points),
            "cash" => Ok(Self::Cash),
            _ => Err(ParseProgramKindError),
        }
    }
}

/// Loyalty program configuration record.
///
/// `minimum_purchase` is stored and exposed but does not currently gate
/// point-earning eligibility; whether it should is an open product question.
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyProgram {
    pub id: Uuid,
    pub name: String,
    pub kind: ProgramKind,
    pub points_per_dollar: u32,
    pub cash_back_percent: Option<Decimal>,
    pub minimum_purchase: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a program.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoyaltyProgram {
    pub name: String,
    pub kind: ProgramKind,
    pub points_per_dollar: u32,
    pub cash_back_percent: Option<Decimal>,
    pub minimum_purchase: Decimal,
    pub is_active: bool,
}

impl LoyaltyProgram {
    /// Materialise a program from creation fields.
    #[must_use]
    pub fn create(fields: NewLoyaltyProgram, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            kind: fields.kind,
            points_per_dollar: fields.points_per_dollar,
            cash_back_percent: fields.cash_back_percent,
            minimum_purchase: fields.minimum_purchase,
            is_active: fields.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[test]
    fn creation_copies_rate_fields() {
        let program = LoyaltyProgram::create(
            NewLoyaltyProgram {
                name: "Standard".to_owned(),
                kind: ProgramKind::Points,
                points_per_dollar: 12,
                cash_back_percent: None,
                minimum_purchase: Decimal::ZERO,
                is_active: true,
            },
            Utc::now(),
        );
        assert_eq!(program.points_per_dollar, 12);
        assert_eq!(program.kind, ProgramKind::Points);
        assert!(program.is_active);
    }

    #[rstest]
    #[case(ProgramKind::Points, "points")]
    #[case(ProgramKind::Cash, "cash")]
    fn kinds_round_trip_through_strings(#[case] kind: ProgramKind, #[case] text: &str) {
        assert_eq!(kind.to_string(), text);
        assert_eq!(text.parse::<ProgramKind>(), Ok(kind));
    }
}
