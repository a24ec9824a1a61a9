//! In-memory backend for tests and single-node development.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::document::StoreDocument;
use super::{Campaign, ClickRecord, ClickStats, DonationRecord, Ngo, RealtimeAnalytics, Storage};
use crate::errors::{ImpactClickError, Result};

/// A single mutex over the whole document keeps the conditional inserts and
/// the counter read-modify-write serialized without further coordination.
pub struct MemoryStorage {
    state: Mutex<StoreDocument>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            state: Mutex::new(StoreDocument::default()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_click(&self, click: ClickRecord) -> Result<()> {
        self.state.lock().insert_click_checked(click)
    }

    async fn attach_pledge(&self, click_id: &str, pledge_id: &str) -> Result<()> {
        self.state.lock().attach_pledge(click_id, pledge_id)
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
        self.state.lock().insert_donation_checked(donation)
    }

    async fn get_donation_by_pledge(&self, pledge_id: &str) -> Result<Option<DonationRecord>> {
        Ok(self.state.lock().find_donation_by_pledge(pledge_id))
    }

    async fn get_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>> {
        Ok(self.state.lock().campaigns.get(campaign_id).cloned())
    }

    async fn save_campaign(&self, campaign: Campaign) -> Result<()> {
        self.state.lock().campaigns.insert(campaign.id.clone(), campaign);
        Ok(())
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
        self.state.lock().ngos.insert(ngo.id.clone(), ngo);
        Ok(())
    }

    async fn delete_ngo(&self, ngo_id: &str) -> Result<()> {
        match self.state.lock().ngos.remove(ngo_id) {
            Some(_) => Ok(()),
            None => Err(ImpactClickError::not_found(format!("NGO {} not found", ngo_id))),
        }
    }

    async fn record_settlement(&self, amount: f64) -> Result<RealtimeAnalytics> {
        Ok(self.state.lock().record_settlement(amount))
    }

    async fn get_realtime_analytics(&self) -> Result<RealtimeAnalytics> {
        Ok(self.state.lock().analytics.clone().unwrap_or_default())
    }

    async fn click_stats(&self, campaign_id: Option<&str>) -> Result<ClickStats> {
        Ok(self.state.lock().click_stats(campaign_id))
    }

    async fn get_backend_name(&self) -> String {
        "memory".to_string()
    }
}
