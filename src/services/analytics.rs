//! Dashboard read path.
//!
//! Decoupled from the settlement write path: realtime totals and click
//! stats come from the store, the per-campaign/per-NGO breakdowns and the
//! time series are mock data, as in the original platform. Real aggregation
//! is explicitly out of scope.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::storages::Storage;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBreakdown {
    pub id: String,
    pub name: String,
    pub clicks: u64,
    pub donations: u64,
    pub amount: f64,
    pub conversion_rate: f64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NgoBreakdown {
    pub id: String,
    pub name: String,
    pub donations: u64,
    pub amount: f64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub total_clicks: u64,
    pub valid_clicks: u64,
    pub total_donations: u64,
    pub total_amount: f64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
    pub campaigns: Vec<CampaignBreakdown>,
    pub ngos: Vec<NgoBreakdown>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: String,
    pub clicks: u64,
    pub donations: u64,
    pub amount: f64,
}

pub struct AnalyticsService {
    storage: Arc<dyn Storage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        AnalyticsService { storage }
    }

    pub async fn get_analytics(&self, query: &AnalyticsQuery) -> Result<AnalyticsResponse> {
        let counter = self.storage.get_realtime_analytics().await?;
        let clicks = self
            .storage
            .click_stats(query.campaign_id.as_deref())
            .await?;

        // Breakdowns are mocked from the NGO roster; the dashboard charts
        // only need the shape until real aggregation lands.
        let ngos = self
            .storage
            .list_ngos()
            .await?
            .into_iter()
            .map(|ngo| NgoBreakdown {
                id: ngo.id,
                name: ngo.name,
                donations: counter.total_donations,
                amount: counter.total_amount,
            })
            .collect();

        let campaigns = match &query.campaign_id {
            Some(id) => match self.storage.get_campaign(id).await? {
                Some(campaign) => {
                    let conversion_rate = if clicks.total_clicks > 0 {
                        counter.total_donations as f64 / clicks.total_clicks as f64
                    } else {
                        0.0
                    };
                    vec![CampaignBreakdown {
                        id: campaign.id,
                        name: campaign.name,
                        clicks: clicks.total_clicks,
                        donations: counter.total_donations,
                        amount: counter.total_amount,
                        conversion_rate,
                    }]
                }
                None => vec![],
            },
            None => vec![],
        };

        Ok(AnalyticsResponse {
            total_clicks: clicks.total_clicks,
            valid_clicks: clicks.valid_clicks,
            total_donations: counter.total_donations,
            total_amount: counter.total_amount,
            last_updated: counter.last_updated,
            campaigns,
            ngos,
        })
    }

    /// Mock per-day series, one point per day counting back from today.
    pub async fn time_series(&self, days: u32) -> Result<Vec<TimeSeriesPoint>> {
        let days = days.clamp(1, 365);
        let today = chrono::Utc::now().date_naive();

        let series = (0..days)
            .rev()
            .map(|offset| {
                let date = today - chrono::Duration::days(offset as i64);
                TimeSeriesPoint {
                    date: date.format("%Y-%m-%d").to_string(),
                    clicks: rand::random_range(10..60),
                    donations: rand::random_range(5..45),
                    amount: rand::random_range(100..900) as f64,
                }
            })
            .collect();

        Ok(series)
    }
}
