//! Click Registration Protocol.
//!
//! Converts an anonymous widget click into a pledge: bot verification,
//! session dedup, reference checks, then click persistence with a freshly
//! minted pledge identifier. Each gate is hard; the first failure wins and
//! nothing before it has side effects.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{ImpactClickError, Result};
use crate::services::verification::BotVerifier;
use crate::storages::{ClickRecord, Storage};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    pub campaign_id: String,
    pub ngo_id: String,
    pub session_id: String,
    pub recaptcha_token: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
}

impl ClickRequest {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("campaignId", &self.campaign_id),
            ("ngoId", &self.ngo_id),
            ("sessionId", &self.session_id),
            ("recaptchaToken", &self.recaptcha_token),
        ] {
            if value.trim().is_empty() {
                return Err(ImpactClickError::validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    pub success: bool,
    /// The pledge identifier the caller must present at settlement time.
    pub donation_id: String,
    pub amount: String,
    pub ngo: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub struct ClickService {
    storage: Arc<dyn Storage>,
    verifier: Arc<dyn BotVerifier>,
    min_score: f64,
}

impl ClickService {
    pub fn new(storage: Arc<dyn Storage>, verifier: Arc<dyn BotVerifier>, min_score: f64) -> Self {
        ClickService {
            storage,
            verifier,
            min_score,
        }
    }

    pub async fn register_click(&self, request: ClickRequest) -> Result<ClickResponse> {
        request.validate()?;

        // Gate 1: bot verification, with the minimum-score cut applied here.
        let verification = self.verifier.verify(&request.recaptcha_token).await?;
        if !verification.success || verification.score < self.min_score {
            warn!(
                session_id = %request.session_id,
                success = verification.success,
                score = verification.score,
                "click rejected by bot verification"
            );
            return Err(ImpactClickError::invalid_verification("Invalid reCAPTCHA token"));
        }

        // Gate 2: early duplicate lookup. The conditional insert below is
        // what actually closes the race; this check just fails the common
        // case before the reference lookups.
        if self
            .storage
            .get_click_by_session(&request.session_id, &request.campaign_id)
            .await?
            .is_some()
        {
            debug!(
                session_id = %request.session_id,
                campaign_id = %request.campaign_id,
                "duplicate click for session"
            );
            return Err(ImpactClickError::duplicate_click(
                "Click already registered for this session",
            ));
        }

        // Gate 3: the campaign and NGO must both exist.
        let campaign = self.storage.get_campaign(&request.campaign_id).await?;
        let ngo = self.storage.get_ngo(&request.ngo_id).await?;
        let (campaign, ngo) = match (campaign, ngo) {
            (Some(campaign), Some(ngo)) => (campaign, ngo),
            _ => return Err(ImpactClickError::invalid_reference("Invalid campaign or NGO")),
        };

        let click = ClickRecord {
            id: Uuid::new_v4().to_string(),
            campaign_id: request.campaign_id.clone(),
            ngo_id: request.ngo_id.clone(),
            session_id: request.session_id.clone(),
            user_agent: request.user_agent,
            ip_address: request.ip_address,
            timestamp: chrono::Utc::now(),
            is_valid: true,
            donation_id: None,
        };
        let click_id = click.id.clone();
        self.storage.create_click(click).await?;

        // Mint the pledge and attach it with a second write.
        let pledge_id = Uuid::new_v4().to_string();
        self.storage.attach_pledge(&click_id, &pledge_id).await?;

        info!(
            campaign_id = %request.campaign_id,
            ngo = %ngo.name,
            pledge_id = %pledge_id,
            "click registered"
        );

        Ok(ClickResponse {
            success: true,
            donation_id: pledge_id,
            amount: format!("{} {}", campaign.currency, campaign.donation_amount),
            ngo: ngo.name.clone(),
            message: format!("Thank you for your donation to {}!", ngo.name),
            timestamp: chrono::Utc::now(),
        })
    }
}
