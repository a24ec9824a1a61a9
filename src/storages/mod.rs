//! Persistent record store: clicks, donations, campaigns, NGO profiles and
//! the realtime analytics singleton.
//!
//! Uniqueness of `(session, campaign)` clicks and of one-donation-per-pledge
//! is enforced here with conditional inserts rather than lookup-then-insert,
//! so two concurrent requests cannot both pass the duplicate check.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

mod document;
pub mod file;
pub mod memory;
mod models;

pub use models::{
    Campaign, ClickRecord, ClickStats, DonationRecord, DonationStatus, Ngo, RealtimeAnalytics,
};

#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a click record. Fails with `DuplicateClick` if a record for
    /// the same `(session_id, campaign_id)` already exists. The check and
    /// the insert are atomic.
    async fn create_click(&self, click: ClickRecord) -> Result<()>;

    /// Attach the minted pledge identifier to an existing click record.
    async fn attach_pledge(&self, click_id: &str, pledge_id: &str) -> Result<()>;

    async fn get_click_by_session(
        &self,
        session_id: &str,
        campaign_id: &str,
    ) -> Result<Option<ClickRecord>>;

    async fn get_click_by_pledge(&self, pledge_id: &str) -> Result<Option<ClickRecord>>;

    /// Insert a donation record. Fails with `AlreadySettled` if a donation
    /// for the same pledge identifier already exists. Check and insert are
    /// atomic.
    async fn create_donation(&self, donation: DonationRecord) -> Result<()>;

    async fn get_donation_by_pledge(&self, pledge_id: &str) -> Result<Option<DonationRecord>>;

    async fn get_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>>;
    async fn save_campaign(&self, campaign: Campaign) -> Result<()>;

    async fn get_ngo(&self, ngo_id: &str) -> Result<Option<Ngo>>;
    async fn list_ngos(&self) -> Result<Vec<Ngo>>;
    async fn save_ngo(&self, ngo: Ngo) -> Result<()>;
    async fn delete_ngo(&self, ngo_id: &str) -> Result<()>;

    /// Atomic read-modify-write on the realtime counter: one more donation,
    /// `amount` more total. Returns the updated counter. A blind increment
    /// is not acceptable here; concurrent settlements must serialize.
    async fn record_settlement(&self, amount: f64) -> Result<RealtimeAnalytics>;

    async fn get_realtime_analytics(&self) -> Result<RealtimeAnalytics>;

    async fn click_stats(&self, campaign_id: Option<&str>) -> Result<ClickStats>;

    async fn get_backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub fn create() -> Result<Arc<dyn Storage>> {
        let backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".into());

        let boxed: Box<dyn Storage> = match backend.as_str() {
            "memory" => Box::new(memory::MemoryStorage::new()),
            _ => Box::new(file::FileStorage::new()?),
        };

        Ok(Arc::from(boxed))
    }
}
