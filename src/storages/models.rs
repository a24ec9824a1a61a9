use serde::{Deserialize, Serialize};

/// One verified, deduplicated user interaction against a campaign.
///
/// At most one record exists per `(session_id, campaign_id)` pair; the
/// storage layer enforces this at insert time.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClickRecord {
    pub id: String,
    pub campaign_id: String,
    pub ngo_id: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub is_valid: bool,
    /// Pledge identifier minted at registration; attached with a second
    /// write, so freshly inserted records carry `None` for a moment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
}

/// A settled transfer. Exactly one per pledge identifier.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub id: String,
    /// Pledge identifier, foreign key to exactly one click record.
    pub donation_id: String,
    pub ngo_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: DonationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Sealed `{amount, currency, ngoId}` payload, confidentiality at rest.
    pub encrypted_data: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Amount pledged per verified click.
    pub donation_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Ngo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Singleton aggregate mutated transactionally by the settlement protocol.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeAnalytics {
    pub total_donations: u64,
    pub total_amount: f64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Default for RealtimeAnalytics {
    fn default() -> Self {
        RealtimeAnalytics {
            total_donations: 0,
            total_amount: 0.0,
            last_updated: chrono::Utc::now(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClickStats {
    pub total_clicks: u64,
    pub valid_clicks: u64,
}

fn default_currency() -> String {
    "DKK".to_string()
}
