//! Driven port for the external authentication collaborator.
//!
//! The loyalty core performs no credential checks of its own; it exchanges an
//! opaque bearer token for a verified customer identifier and trusts the
//! provider's answer.

use async_trait::async_trait;

use crate::domain::{CustomerId, CustomerIdValidationError};

/// Errors raised by auth provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthProviderError {
    /// The token was rejected by the provider.
    #[error("authentication token was rejected")]
    TokenRejected,
    /// The provider could not be reached.
    #[error("auth provider unavailable: {message}")]
    Unavailable { message: String },
}

impl AuthProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<AuthProviderError> for crate::domain::Error {
    fn from(error: AuthProviderError) -> Self {
        match error {
            AuthProviderError::TokenRejected => Self::unauthorized("invalid or expired token"),
            AuthProviderError::Unavailable { message } => {
                Self::service_unavailable(format!("auth provider unavailable: {message}"))
            }
        }
    }
}

/// Port for verifying customer-supplied authentication tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify a token and return the customer it identifies.
    async fn verify_token(&self, token: &str) -> Result<CustomerId, AuthProviderError>;
}

/// Development stand-in: accepts any token that is itself a well-formed
/// customer identifier and echoes it back verified.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthProvider;

#[async_trait]
impl AuthProvider for FixtureAuthProvider {
    async fn verify_token(&self, token: &str) -> Result<CustomerId, AuthProviderError> {
        CustomerId::new(token).map_err(|_: CustomerIdValidationError| {
            AuthProviderError::TokenRejected
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[tokio::test]
    async fn fixture_echoes_well_formed_tokens() {
        let provider = FixtureAuthProvider;
        let id = provider
            .verify_token("cust-17")
            .await
            .expect("token accepted");
        assert_eq!(id.as_ref(), "cust-17");
    }

    #[tokio::test]
    async fn fixture_rejects_blank_tokens() {
        let provider = FixtureAuthProvider;
        assert_eq!(
            provider.verify_token("").await,
            Err(AuthProviderError::TokenRejected)
        );
    }
}
