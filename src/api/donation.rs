use actix_web::{web, HttpResponse};

use crate::errors::Result;
use crate::services::{DonationRequest, DonationService};

pub struct DonationApi;

impl DonationApi {
    /// `POST /api/donation` — bearer credential required.
    pub async fn settle(
        payload: web::Json<DonationRequest>,
        service: web::Data<DonationService>,
    ) -> Result<HttpResponse> {
        let response = service.settle(payload.into_inner()).await?;
        Ok(HttpResponse::Ok().json(response))
    }
}
