use actix_web::{web, HttpRequest, HttpResponse};

use crate::errors::Result;
use crate::services::{ClickRequest, ClickService};
use crate::utils::ip::client_ip;

pub struct ClickApi;

impl ClickApi {
    /// `POST /api/click` — rate-limited, unauthenticated.
    pub async fn register(
        req: HttpRequest,
        payload: web::Json<ClickRequest>,
        service: web::Data<ClickService>,
    ) -> Result<HttpResponse> {
        let mut request = payload.into_inner();
        // The transport-level address wins over whatever the widget sent.
        request.ip_address = Some(client_ip(&req.connection_info()));

        let response = service.register_click(request).await?;
        Ok(HttpResponse::Ok().json(response))
    }
}
