//! JSON-file backend.
//!
//! Keeps the whole document in memory behind a mutex and rewrites the file
//! after every mutation, so a restart picks up where the process left off.
//! Suited to a single instance; anything bigger belongs in a real document
//! store behind the same trait.

use std::env;
use std::fs;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{error, info};

use super::document::StoreDocument;
use super::{Campaign, ClickRecord, ClickStats, DonationRecord, Ngo, RealtimeAnalytics, Storage};
use crate::errors::{ImpactClickError, Result};

#[derive(Debug)]
pub struct FileStorage {
    file_path: String,
    state: Mutex<StoreDocument>,
}

impl FileStorage {
    pub fn new() -> Result<Self> {
        let file_path = env::var("DATA_FILE").unwrap_or_else(|_| "impactclick.json".to_string());
        Self::with_path(file_path)
    }

    pub fn with_path(file_path: impl Into<String>) -> Result<Self> {
        let file_path = file_path.into();
        let document = Self::load_from_file(&file_path)?;
        info!(
            "FileStorage initialized from {}: {} clicks, {} donations, {} campaigns, {} NGOs",
            file_path,
            document.clicks.len(),
            document.donations.len(),
            document.campaigns.len(),
            document.ngos.len()
        );

        Ok(FileStorage {
            file_path,
            state: Mutex::new(document),
        })
    }

    fn load_from_file(path: &str) -> Result<StoreDocument> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                error!("Failed to parse data file {}: {}", path, e);
                ImpactClickError::serialization(format!("failed to parse data file: {}", e))
            }),
            Err(_) => {
                info!("Data file {} does not exist, starting empty", path);
                let empty = StoreDocument::default();
                fs::write(path, serde_json::to_string_pretty(&empty)?).map_err(|e| {
                    ImpactClickError::storage(format!("failed to create data file: {}", e))
                })?;
                Ok(empty)
            }
        }
    }

    /// Persist under the caller's lock so writes hit the file in mutation
    /// order.
    fn persist(&self, document: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn create_click(&self, click: ClickRecord) -> Result<()> {
        let mut state = self.state.lock();
        state.insert_click_checked(click)?;
        self.persist(&state)
    }

    async fn attach_pledge(&self, click_id: &str, pledge_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.attach_pledge(click_id, pledge_id)?;
        self.persist(&state)
    }

    async fn get_click_by_session(
        &self,
        session_id: &str,
        campaign_id: &str,
    ) -> Result<Option<ClickRecord>> {
        Ok(self.state.lock().find_click_by_session(session_id, campaign_id))
    }

    async fn get_click_by_pledge(&self, pledge_id: &str) -> Result<Option<ClickRecord>> {
        Ok(self.state.lock().find_click_by_pledge(pledge_id))
    }

    async fn create_donation(&self, donation: DonationRecord) -> Result<()> {
        let mut state = self.state.lock();
        state.insert_donation_checked(donation)?;
        self.persist(&state)
    }

    async fn get_donation_by_pledge(&self, pledge_id: &str) -> Result<Option<DonationRecord>> {
        Ok(self.state.lock().find_donation_by_pledge(pledge_id))
    }

    async fn get_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>> {
        Ok(self.state.lock().campaigns.get(campaign_id).cloned())
    }

    async fn save_campaign(&self, campaign: Campaign) -> Result<()> {
        let mut state = self.state.lock();
        state.campaigns.insert(campaign.id.clone(), campaign);
        self.persist(&state)
    }

    async fn get_ngo(&self, ngo_id: &str) -> Result<Option<Ngo>> {
        Ok(self.state.lock().ngos.get(ngo_id).cloned())
    }

    async fn list_ngos(&self) -> Result<Vec<Ngo>> {
        let mut ngos: Vec<Ngo> = self.state.lock().ngos.values().cloned().collect();
        ngos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(ngos)
    }

    async fn save_ngo(&self, ngo: Ngo) -> Result<()> {
        let mut state = self.state.lock();
        state.ngos.insert(ngo.id.clone(), ngo);
        self.persist(&state)
    }

    async fn delete_ngo(&self, ngo_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.ngos.remove(ngo_id).is_none() {
            return Err(ImpactClickError::not_found(format!("NGO {} not found", ngo_id)));
        }
        self.persist(&state)
    }

    async fn record_settlement(&self, amount: f64) -> Result<RealtimeAnalytics> {
        let mut state = self.state.lock();
        let counter = state.record_settlement(amount);
        self.persist(&state)?;
        Ok(counter)
    }

    async fn get_realtime_analytics(&self) -> Result<RealtimeAnalytics> {
        Ok(self.state.lock().analytics.clone().unwrap_or_default())
    }

    async fn click_stats(&self, campaign_id: Option<&str>) -> Result<ClickStats> {
        Ok(self.state.lock().click_stats(campaign_id))
    }

    async fn get_backend_name(&self) -> String {
        "file".to_string()
    }
}
