//! Registration of every `/api/v1` endpoint.
//!
//! Shared between the production bootstrap and test harnesses so both serve
//! the identical surface.

use actix_web::web;

use crate::inbound::http::{admin, auth, loyalty, purchases, rewards};

/// Register all API handlers on a scope or app.
///
/// The caller owns the surrounding `web::scope("/api/v1")` and session
/// middleware.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::open_session)
        .service(auth::close_session)
        .service(loyalty::loyalty_account)
        .service(loyalty::transactions)
        .service(loyalty::redemptions)
        .service(rewards::list_active_rewards)
        .service(rewards::redeem_reward)
        .service(purchases::record_purchase)
        .service(admin::stats)
        .service(admin::list_programs)
        .service(admin::create_program)
        .service(admin::list_rewards)
        .service(admin::create_reward)
        .service(admin::update_reward);
}
