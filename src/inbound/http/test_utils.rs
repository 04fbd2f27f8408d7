//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::test as actix_test;
use serde_json::json;

use crate::domain::ports::{FixtureAuthProvider, LedgerStore};
use crate::domain::{LoyaltyService, NewReward, Reward, RewardKind};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryLedgerStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Full adapter state over an empty in-memory ledger and the fixture auth
/// provider.
pub fn fixture_state() -> HttpState {
    let ledger = Arc::new(InMemoryLedgerStore::new());
    let service = Arc::new(LoyaltyService::new(Arc::clone(&ledger)));
    HttpState::new(
        service.clone(),
        service,
        ledger,
        Arc::new(FixtureAuthProvider),
    )
}

/// Establish a session for `token` and return the cookie.
pub async fn login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    token: &str,
) -> actix_web::cookie::Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/session")
        .set_json(json!({ "token": token }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login must succeed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Insert a shipping reward directly through the state's ledger.
pub async fn seed_reward(state: &HttpState, name: &str, point_cost: i64, active: bool) -> Reward {
    state
        .ledger
        .insert_reward(NewReward {
            name: name.to_owned(),
            description: None,
            kind: RewardKind::Shipping,
            point_cost,
            discount_amount: None,
            discount_percent: None,
            is_active: active,
        })
        .await
        .expect("reward seeded")
}
