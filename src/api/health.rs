use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use tracing::{error, trace};

use crate::storages::Storage;

#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthApi;

impl HealthApi {
    /// `GET /health` — storage probe plus uptime.
    pub async fn health_check(
        storage: web::Data<Arc<dyn Storage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let started = Instant::now();
        trace!("received health check request");

        let storage_status = match tokio::time::timeout(
            Duration::from_secs(5),
            storage.get_realtime_analytics(),
        )
        .await
        {
            Ok(Ok(counter)) => json!({
                "status": "healthy",
                "backend": storage.get_backend_name().await,
                "totalDonations": counter.total_donations,
            }),
            Ok(Err(e)) => {
                error!("storage health check failed: {}", e);
                json!({ "status": "unhealthy", "error": e.format_simple() })
            }
            Err(_) => {
                error!("storage health check timeout");
                json!({ "status": "unhealthy", "error": "timeout" })
            }
        };

        let now = chrono::Utc::now();
        let uptime_seconds = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = storage_status["status"] == "healthy";

        let status = if is_healthy {
            actix_web::http::StatusCode::OK
        } else {
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(status).json(json!({
            "status": if is_healthy { "healthy" } else { "unhealthy" },
            "timestamp": now.to_rfc3339(),
            "uptime": uptime_seconds,
            "checks": { "storage": storage_status },
            "responseTimeMs": started.elapsed().as_millis(),
        }))
    }
}
