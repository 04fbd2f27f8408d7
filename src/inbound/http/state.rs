//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthProvider, LedgerStore, LoyaltyCommand, LoyaltyQuery};

/// Dependency bundle for HTTP handlers.
///
/// `loyalty` and `loyalty_query` are the orchestrator's driving ports;
/// `ledger` gives the thin catalog and program registry handlers direct
/// read/insert access to the store; `auth` is the external token-verification
/// collaborator.
#[derive(Clone)]
pub struct HttpState {
    pub loyalty: Arc<dyn LoyaltyCommand>,
    pub loyalty_query: Arc<dyn LoyaltyQuery>,
    pub ledger: Arc<dyn LedgerStore>,
    pub auth: Arc<dyn AuthProvider>,
}

impl HttpState {
    /// Construct state from the four port implementations.
    pub fn new(
        loyalty: Arc<dyn LoyaltyCommand>,
        loyalty_query: Arc<dyn LoyaltyQuery>,
        ledger: Arc<dyn LedgerStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            loyalty,
            loyalty_query,
            ledger,
            auth,
        }
    }
}
