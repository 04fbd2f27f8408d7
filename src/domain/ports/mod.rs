//! Domain ports: the seams between the loyalty core and its collaborators.
//!
//! Driving ports ([`LoyaltyCommand`], [`LoyaltyQuery`]) are implemented by
//! domain services and consumed by inbound adapters. Driven ports
//! ([`LedgerStore`], [`AuthProvider`]) are implemented by outbound adapters.

pub mod auth_provider;
pub mod ledger_store;
pub mod loyalty_command;
pub mod loyalty_query;

pub use self::auth_provider::{AuthProvider, AuthProviderError, FixtureAuthProvider};
pub use self::ledger_store::{AccountMutation, LedgerStats, LedgerStore, LedgerStoreError};
pub use self::loyalty_command::{
    LoyaltyCommand, RecordPurchaseRequest, RecordPurchaseResponse, RedeemRewardRequest,
};
pub use self::loyalty_query::{LoyaltyQuery, LoyaltyStatsResponse};

#[cfg(test)]
pub use self::auth_provider::MockAuthProvider;
#[cfg(test)]
pub use self::ledger_store::MockLedgerStore;
#[cfg(test)]
pub use self::loyalty_command::MockLoyaltyCommand;
#[cfg(test)]
pub use self::loyalty_query::MockLoyaltyQuery;
