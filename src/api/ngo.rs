use actix_web::{web, HttpResponse};

use crate::errors::Result;
use crate::services::{CreateNgoRequest, NgoService, UpdateNgoRequest};

pub struct NgoApi;

impl NgoApi {
    pub async fn create(
        payload: web::Json<CreateNgoRequest>,
        service: web::Data<NgoService>,
    ) -> Result<HttpResponse> {
        let ngo = service.create(payload.into_inner()).await?;
        Ok(HttpResponse::Created().json(ngo))
    }

    pub async fn list(service: web::Data<NgoService>) -> Result<HttpResponse> {
        let ngos = service.list().await?;
        Ok(HttpResponse::Ok().json(ngos))
    }

    pub async fn get(
        path: web::Path<String>,
        service: web::Data<NgoService>,
    ) -> Result<HttpResponse> {
        let ngo = service.get(&path.into_inner()).await?;
        Ok(HttpResponse::Ok().json(ngo))
    }

    pub async fn update(
        path: web::Path<String>,
        payload: web::Json<UpdateNgoRequest>,
        service: web::Data<NgoService>,
    ) -> Result<HttpResponse> {
        let ngo = service.update(&path.into_inner(), payload.into_inner()).await?;
        Ok(HttpResponse::Ok().json(ngo))
    }

    pub async fn delete(
        path: web::Path<String>,
        service: web::Data<NgoService>,
    ) -> Result<HttpResponse> {
        service.delete(&path.into_inner()).await?;
        Ok(HttpResponse::NoContent().finish())
    }
}
