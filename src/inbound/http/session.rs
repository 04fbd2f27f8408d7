//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the verified
//! customer id.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CustomerId, Error};

pub(crate) const CUSTOMER_ID_KEY: &str = "customer_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the verified customer's id in the session cookie.
    pub fn persist_customer(&self, customer_id: &CustomerId) -> Result<(), Error> {
        self.0
            .insert(CUSTOMER_ID_KEY, customer_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current customer id from the session, if present.
    pub fn customer_id(&self) -> Result<Option<CustomerId>, Error> {
        let id = self
            .0
            .get::<String>(CUSTOMER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match CustomerId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid customer id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated customer id or return `401 Unauthorized`.
    pub fn require_customer_id(&self) -> Result<CustomerId, Error> {
        self.customer_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the session, invalidating the cookie.
    pub fn forget(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
