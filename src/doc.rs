//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for the
//! REST API: all `/api/v1` endpoints plus the health probes, the error
//! schema wrappers, and the session cookie security scheme. Swagger UI serves
//! the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::admin::{
    CreateProgramRequest, CreateRewardRequest, StatsResponse, UpdateRewardRequest,
};
use crate::inbound::http::auth::SessionRequest;
use crate::inbound::http::dto::{
    ProgramResponse, RedemptionResponse, RewardResponse, TransactionResponse,
};
use crate::inbound::http::loyalty::LoyaltyAccountResponse;
use crate::inbound::http::purchases::{PurchaseRequest, PurchaseResponse};
use crate::inbound::http::rewards::RedeemRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/session.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Loyalty backend API",
        description = "Customer loyalty platform: points ledger, tier progression, reward redemption, and the admin registries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::open_session,
        crate::inbound::http::auth::close_session,
        crate::inbound::http::loyalty::loyalty_account,
        crate::inbound::http::loyalty::transactions,
        crate::inbound::http::loyalty::redemptions,
        crate::inbound::http::rewards::list_active_rewards,
        crate::inbound::http::rewards::redeem_reward,
        crate::inbound::http::purchases::record_purchase,
        crate::inbound::http::admin::stats,
        crate::inbound::http::admin::list_programs,
        crate::inbound::http::admin::create_program,
        crate::inbound::http::admin::list_rewards,
        crate::inbound::http::admin::create_reward,
        crate::inbound::http::admin::update_reward,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        SessionRequest,
        LoyaltyAccountResponse,
        TransactionResponse,
        RedemptionResponse,
        RewardResponse,
        ProgramResponse,
        PurchaseRequest,
        PurchaseResponse,
        RedeemRequest,
        StatsResponse,
        CreateProgramRequest,
        CreateRewardRequest,
        UpdateRewardRequest,
    )),
    tags(
        (name = "auth", description = "Session lifecycle"),
        (name = "customer", description = "Customer-facing loyalty operations"),
        (name = "rewards", description = "Reward catalog and redemption"),
        (name = "admin", description = "Dashboard statistics and registries"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
