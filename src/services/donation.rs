//! Donation Settlement Protocol.
//!
//! Converts a pledge into exactly one completed donation record: pledge and
//! NGO validation, payment capture, payload sealing, conditional insert,
//! then the atomic analytics update. A failure before the insert leaves no
//! donation behind; a crash between the insert and the counter update is a
//! known at-least-once gap on the analytics side.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{ImpactClickError, Result};
use crate::services::payment::PaymentProcessor;
use crate::services::sealing::Sealer;
use crate::storages::{DonationRecord, DonationStatus, Storage};

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Pledge identifier handed out at click registration.
    pub donation_id: String,
    pub ngo_id: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl DonationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.donation_id.trim().is_empty() {
            return Err(ImpactClickError::validation("donationId is required"));
        }
        if self.ngo_id.trim().is_empty() {
            return Err(ImpactClickError::validation("ngoId is required"));
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ImpactClickError::validation("amount must be a positive number"));
        }
        Ok(())
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub success: bool,
    pub transaction_id: String,
    pub amount: f64,
    pub currency: String,
    pub ngo: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Sealed before persistence; the donation record never stores this in the
/// clear.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SealedPayload {
    pub amount: f64,
    pub currency: String,
    pub ngo_id: String,
}

pub struct DonationService {
    storage: Arc<dyn Storage>,
    payment: Arc<dyn PaymentProcessor>,
    sealer: Sealer,
    default_currency: String,
}

impl DonationService {
    pub fn new(
        storage: Arc<dyn Storage>,
        payment: Arc<dyn PaymentProcessor>,
        sealer: Sealer,
        default_currency: impl Into<String>,
    ) -> Self {
        DonationService {
            storage,
            payment,
            sealer,
            default_currency: default_currency.into(),
        }
    }

    pub async fn settle(&self, request: DonationRequest) -> Result<DonationResponse> {
        request.validate()?;

        // The pledge must point at a click record that is still valid.
        let click = self.storage.get_click_by_pledge(&request.donation_id).await?;
        match click {
            Some(click) if click.is_valid => {}
            _ => {
                warn!(pledge_id = %request.donation_id, "settlement with unknown or invalid pledge");
                return Err(ImpactClickError::invalid_pledge("Invalid donation ID"));
            }
        }

        let ngo = self
            .storage
            .get_ngo(&request.ngo_id)
            .await?
            .ok_or_else(|| ImpactClickError::invalid_reference("Invalid NGO"))?;

        // Early dedup; the conditional insert below enforces it atomically.
        if self
            .storage
            .get_donation_by_pledge(&request.donation_id)
            .await?
            .is_some()
        {
            return Err(ImpactClickError::already_settled(
                "Donation already processed for this pledge",
            ));
        }

        let currency = request
            .currency
            .clone()
            .unwrap_or_else(|| self.default_currency.clone());

        let transaction_id = self
            .payment
            .capture(request.amount, &currency, &request.ngo_id)
            .await?;

        let payload = SealedPayload {
            amount: request.amount,
            currency: currency.clone(),
            ngo_id: request.ngo_id.clone(),
        };
        let encrypted_data = self.sealer.seal(&serde_json::to_vec(&payload)?)?;

        let donation = DonationRecord {
            id: Uuid::new_v4().to_string(),
            donation_id: request.donation_id.clone(),
            ngo_id: request.ngo_id.clone(),
            amount: request.amount,
            currency: currency.clone(),
            status: DonationStatus::Completed,
            transaction_id: Some(transaction_id.clone()),
            timestamp: chrono::Utc::now(),
            encrypted_data,
        };
        self.storage.create_donation(donation).await?;

        // Read-modify-write on the singleton counter; the storage layer
        // serializes concurrent settlements.
        let counter = self.storage.record_settlement(request.amount).await?;

        info!(
            pledge_id = %request.donation_id,
            transaction_id = %transaction_id,
            total_donations = counter.total_donations,
            "donation settled"
        );

        Ok(DonationResponse {
            success: true,
            transaction_id,
            amount: request.amount,
            currency: currency.clone(),
            ngo: ngo.name.clone(),
            message: format!(
                "Donation of {} {} processed successfully",
                request.amount, currency
            ),
            timestamp: chrono::Utc::now(),
        })
    }
}
