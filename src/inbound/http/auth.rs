//! Session lifecycle handlers.
//!
//! ```text
//! POST   /api/v1/auth/session {"token":"cust-42"}
//! DELETE /api/v1/auth/session
//! ```
//!
//! The loyalty core never checks credentials itself: the token is exchanged
//! with the Auth Provider port for a verified customer id, which is then
//! persisted in the session cookie.

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Error;
use crate::domain::ports::AuthProvider;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_non_empty};

/// Body for `POST /api/v1/auth/session`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SessionRequest {
    /// Opaque token understood by the Auth Provider.
    pub token: String,
}

/// Exchange an Auth-Provider token for a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/session",
    request_body = SessionRequest,
    responses(
        (status = 204, description = "Session established", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Token rejected", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 503, description = "Auth provider unavailable", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "openSession",
    security([])
)]
#[post("/auth/session")]
pub async fn open_session(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SessionRequest>,
) -> ApiResult<HttpResponse> {
    let token = require_non_empty(payload.into_inner().token, FieldName::new("token"))?;
    let customer_id = state
        .auth
        .verify_token(&token)
        .await
        .map_err(Error::from)?;
    session.persist_customer(&customer_id)?;
    info!(customer_id = %customer_id, "session established");
    Ok(HttpResponse::NoContent().finish())
}

/// Log out by dropping the session.
#[utoipa::path(
    delete,
    path = "/api/v1/auth/session",
    responses(
        (status = 204, description = "Session dropped")
    ),
    tags = ["auth"],
    operation_id = "closeSession",
    security([])
)]
#[delete("/auth/session")]
pub async fn close_session(session: SessionContext) -> ApiResult<HttpResponse> {
    session.forget();
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use super::*;
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(fixture_state()))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(open_session)
                    .service(close_session),
            )
    }

    #[actix_web::test]
    async fn valid_token_sets_a_session_cookie() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/session")
            .set_json(SessionRequest {
                token: "cust-42".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "session cookie issued"
        );
    }

    #[actix_web::test]
    async fn blank_token_is_a_bad_request() {
        let app = actix_test::init_service(test_app()).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/session")
            .set_json(SessionRequest { token: "   ".into() })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value
                .get("details")
                .and_then(|details| details.get("field"))
                .and_then(Value::as_str),
            Some("token")
        );
    }

    #[actix_web::test]
    async fn malformed_token_is_unauthorised() {
        let app = actix_test::init_service(test_app()).await;
        // The fixture provider rejects tokens with surrounding whitespace.
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/auth/session")
            .set_json(SessionRequest {
                token: " cust-42".into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_always_succeeds() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/auth/session")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
