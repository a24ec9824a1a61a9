//! Bearer-credential gate for the authenticated surface (donations,
//! analytics, NGO management).
//!
//! Constant-token comparison; an empty configured token disables the whole
//! surface and answers 404 so the endpoints are not discoverable.

use actix_web::middleware::Next;
use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web, Error, HttpResponse,
};
use tracing::{debug, info};

/// The configured bearer credential, injected as app data.
#[derive(Clone, Debug)]
pub struct ApiToken(pub String);

pub struct AuthMiddleware;

impl AuthMiddleware {
    pub async fn bearer_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        if req.method() == actix_web::http::Method::OPTIONS {
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        let token = req
            .app_data::<web::Data<ApiToken>>()
            .map(|t| t.0.clone())
            .unwrap_or_default();

        if token.is_empty() {
            return Ok(req.into_response(
                HttpResponse::NotFound()
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .body("Not Found"),
            ));
        }

        if let Some(auth_header) = req.headers().get("Authorization") {
            if let Some(auth_bytes) = auth_header.as_bytes().strip_prefix(b"Bearer ") {
                if auth_bytes == token.as_bytes() {
                    debug!("bearer authentication succeeded");
                    return next.call(req).await;
                }
            }
        }

        info!("bearer authentication failed: token mismatch or missing Authorization header");
        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "code": 401,
                    "data": { "error": "Unauthorized: Invalid or missing token" }
                })),
        ))
    }
}
