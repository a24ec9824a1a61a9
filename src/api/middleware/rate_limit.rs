//! Admission-control gate in front of click registration.

use std::sync::Arc;

use actix_web::middleware::Next;
use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web, Error, HttpResponse,
};
use tracing::warn;

use crate::admission::AdmissionControl;
use crate::utils::ip::client_ip;

pub struct RateLimitMiddleware;

impl RateLimitMiddleware {
    pub async fn admit(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let Some(limiter) = req.app_data::<web::Data<Arc<dyn AdmissionControl>>>() else {
            // No limiter wired means nothing to enforce.
            return next.call(req).await;
        };

        let client_key = client_ip(&req.connection_info());
        if let Err(e) = limiter.admit(&client_key).await {
            warn!(client_key = %client_key, "request rejected by admission control");
            return Ok(req.into_response(
                HttpResponse::TooManyRequests()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({
                        "code": 429,
                        "data": { "error": e.message() }
                    })),
            ));
        }

        next.call(req).await
    }
}
