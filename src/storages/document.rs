//! Shared in-memory document model used by both storage backends.
//!
//! All mutation helpers run under the caller's lock, which is what makes the
//! conditional inserts and the counter update atomic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::models::{
    Campaign, ClickRecord, ClickStats, DonationRecord, Ngo, RealtimeAnalytics,
};
use crate::errors::{ImpactClickError, Result};

/// The whole store as one document: four collections plus the analytics
/// singleton. Maps are keyed by record id.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(super) struct StoreDocument {
    #[serde(default)]
    pub clicks: HashMap<String, ClickRecord>,
    #[serde(default)]
    pub donations: HashMap<String, DonationRecord>,
    #[serde(default)]
    pub campaigns: HashMap<String, Campaign>,
    #[serde(default)]
    pub ngos: HashMap<String, Ngo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<RealtimeAnalytics>,
}

impl StoreDocument {
    pub fn insert_click_checked(&mut self, click: ClickRecord) -> Result<()> {
        let duplicate = self.clicks.values().any(|c| {
            c.session_id == click.session_id && c.campaign_id == click.campaign_id
        });
        if duplicate {
            return Err(ImpactClickError::duplicate_click(
                "Click already registered for this session",
            ));
        }
        self.clicks.insert(click.id.clone(), click);
        Ok(())
    }

    pub fn attach_pledge(&mut self, click_id: &str, pledge_id: &str) -> Result<()> {
        match self.clicks.get_mut(click_id) {
            Some(click) => {
                click.donation_id = Some(pledge_id.to_string());
                Ok(())
            }
            None => Err(ImpactClickError::storage(format!(
                "click record {} not found",
                click_id
            ))),
        }
    }

    pub fn find_click_by_session(
        &self,
        session_id: &str,
        campaign_id: &str,
    ) -> Option<ClickRecord> {
        self.clicks
            .values()
            .find(|c| c.session_id == session_id && c.campaign_id == campaign_id)
            .cloned()
    }

    pub fn find_click_by_pledge(&self, pledge_id: &str) -> Option<ClickRecord> {
        self.clicks
            .values()
            .find(|c| c.donation_id.as_deref() == Some(pledge_id))
            .cloned()
    }

    pub fn insert_donation_checked(&mut self, donation: DonationRecord) -> Result<()> {
        let settled = self
            .donations
            .values()
            .any(|d| d.donation_id == donation.donation_id);
        if settled {
            return Err(ImpactClickError::already_settled(
                "Donation already processed for this pledge",
            ));
        }
        self.donations.insert(donation.id.clone(), donation);
        Ok(())
    }

    pub fn find_donation_by_pledge(&self, pledge_id: &str) -> Option<DonationRecord> {
        self.donations
            .values()
            .find(|d| d.donation_id == pledge_id)
            .cloned()
    }

    pub fn record_settlement(&mut self, amount: f64) -> RealtimeAnalytics {
        let counter = self.analytics.get_or_insert_with(RealtimeAnalytics::default);
        counter.total_donations += 1;
        counter.total_amount += amount;
        counter.last_updated = chrono::Utc::now();
        counter.clone()
    }

    pub fn click_stats(&self, campaign_id: Option<&str>) -> ClickStats {
        let mut stats = ClickStats::default();
        for click in self.clicks.values() {
            if let Some(id) = campaign_id {
                if click.campaign_id != id {
                    continue;
                }
            }
            stats.total_clicks += 1;
            if click.is_valid {
                stats.valid_clicks += 1;
            }
        }
        stats
    }
}
