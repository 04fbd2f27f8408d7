//! Loyalty domain: entities, pure engines, ports, and the orchestrator.
//!
//! Everything here is transport and storage agnostic. Inbound adapters map
//! domain errors onto HTTP; outbound adapters implement the driven ports.

pub mod account;
pub mod customer;
pub mod error;
pub mod loyalty_service;
pub mod points;
pub mod ports;
pub mod program;
pub mod redemption;
pub mod reward;
pub mod tier;
pub mod transaction;

pub use self::account::CustomerLoyaltyAccount;
pub use self::customer::{CUSTOMER_ID_MAX, CustomerId, CustomerIdValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::loyalty_service::LoyaltyService;
pub use self::points::{
    InsufficientPointsError, PointsComputationError, compute_earned_points, validate_redemption,
};
pub use self::program::{
    DEFAULT_POINTS_PER_DOLLAR, LoyaltyProgram, NewLoyaltyProgram, ParseProgramKindError,
    ProgramKind,
};
pub use self::redemption::{ParseRedemptionStatusError, RedemptionStatus, RewardRedemption};
pub use self::reward::{NewReward, ParseRewardKindError, Reward, RewardKind, RewardUpdate};
pub use self::tier::{ParseTierError, Tier};
pub use self::transaction::{ParseTransactionKindError, PointTransaction, TransactionKind};
