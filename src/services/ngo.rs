//! NGO profile CRUD. Administrative surface; the core protocols only read
//! these records.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{ImpactClickError, Result};
use crate::storages::{Ngo, Storage};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateNgoRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNgoRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

pub struct NgoService {
    storage: Arc<dyn Storage>,
}

impl NgoService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        NgoService { storage }
    }

    pub async fn create(&self, request: CreateNgoRequest) -> Result<Ngo> {
        if request.name.trim().is_empty() {
            return Err(ImpactClickError::validation("name is required"));
        }

        let ngo = Ngo {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            description: request.description,
            website: request.website,
            logo_url: request.logo_url,
        };
        self.storage.save_ngo(ngo.clone()).await?;
        info!(ngo_id = %ngo.id, name = %ngo.name, "NGO created");
        Ok(ngo)
    }

    pub async fn list(&self) -> Result<Vec<Ngo>> {
        self.storage.list_ngos().await
    }

    pub async fn get(&self, ngo_id: &str) -> Result<Ngo> {
        self.storage
            .get_ngo(ngo_id)
            .await?
            .ok_or_else(|| ImpactClickError::not_found(format!("NGO {} not found", ngo_id)))
    }

    pub async fn update(&self, ngo_id: &str, request: UpdateNgoRequest) -> Result<Ngo> {
        let mut ngo = self.get(ngo_id).await?;

        if let Some(name) = request.name {
            if name.trim().is_empty() {
                return Err(ImpactClickError::validation("name must not be empty"));
            }
            ngo.name = name;
        }
        if let Some(description) = request.description {
            ngo.description = description;
        }
        if request.website.is_some() {
            ngo.website = request.website;
        }
        if request.logo_url.is_some() {
            ngo.logo_url = request.logo_url;
        }

        self.storage.save_ngo(ngo.clone()).await?;
        info!(ngo_id = %ngo.id, "NGO updated");
        Ok(ngo)
    }

    pub async fn delete(&self, ngo_id: &str) -> Result<()> {
        self.storage.delete_ngo(ngo_id).await?;
        info!(ngo_id = %ngo_id, "NGO deleted");
        Ok(())
    }
}
