use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::Result;
use crate::services::{AnalyticsQuery, AnalyticsService};

#[derive(Deserialize, Debug)]
pub struct TimeSeriesQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

pub struct AnalyticsApi;

impl AnalyticsApi {
    /// `GET /api/analytics` — aggregate payload for the dashboard.
    pub async fn get_analytics(
        query: web::Query<AnalyticsQuery>,
        service: web::Data<AnalyticsService>,
    ) -> Result<HttpResponse> {
        let response = service.get_analytics(&query).await?;
        Ok(HttpResponse::Ok().json(response))
    }

    /// `GET /api/analytics/time-series?days=N`
    pub async fn time_series(
        query: web::Query<TimeSeriesQuery>,
        service: web::Data<AnalyticsService>,
    ) -> Result<HttpResponse> {
        let series = service.time_series(query.days).await?;
        Ok(HttpResponse::Ok().json(series))
    }
}
