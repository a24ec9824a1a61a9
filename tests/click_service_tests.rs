use std::sync::Arc;

use async_trait::async_trait;
use impactclick::errors::{ImpactClickError, Result};
use impactclick::services::{BotVerifier, ClickRequest, ClickService, Verification};
use impactclick::storages::memory::MemoryStorage;
use impactclick::storages::{Campaign, Ngo, Storage};

/// Verifier returning a fixed outcome, standing in for the reCAPTCHA
/// collaborator.
struct StaticVerifier {
    success: bool,
    score: f64,
}

#[async_trait]
impl BotVerifier for StaticVerifier {
    async fn verify(&self, _token: &str) -> Result<Verification> {
        Ok(Verification {
            success: self.success,
            score: self.score,
        })
    }
}

async fn seeded_storage() -> Arc<dyn Storage> {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage
        .save_campaign(Campaign {
            id: "c1".to_string(),
            name: "Summer Campaign".to_string(),
            description: String::new(),
            donation_amount: 20.0,
            currency: "DKK".to_string(),
        })
        .await
        .unwrap();
    storage
        .save_ngo(Ngo {
            id: "n1".to_string(),
            name: "Test NGO".to_string(),
            description: String::new(),
            website: None,
            logo_url: None,
        })
        .await
        .unwrap();
    storage
}

fn service(storage: Arc<dyn Storage>, success: bool, score: f64) -> ClickService {
    ClickService::new(storage, Arc::new(StaticVerifier { success, score }), 0.5)
}

fn request(session: &str) -> ClickRequest {
    ClickRequest {
        campaign_id: "c1".to_string(),
        ngo_id: "n1".to_string(),
        session_id: session.to_string(),
        recaptcha_token: "tok".to_string(),
        user_agent: Some("Mozilla/5.0".to_string()),
        ip_address: None,
    }
}

#[tokio::test]
async fn test_valid_click_issues_pledge() {
    let storage = seeded_storage().await;
    let service = service(storage.clone(), true, 0.9);

    let response = service.register_click(request("s1")).await.unwrap();

    assert!(response.success);
    assert_eq!(response.amount, "DKK 20");
    assert_eq!(response.ngo, "Test NGO");
    assert!(!response.donation_id.is_empty());
    assert!(response.message.contains("Test NGO"));

    // Exactly one click record, with the pledge attached.
    let click = storage.get_click_by_session("s1", "c1").await.unwrap().unwrap();
    assert!(click.is_valid);
    assert_eq!(click.donation_id.as_deref(), Some(response.donation_id.as_str()));
}

#[tokio::test]
async fn test_duplicate_session_yields_one_success_one_failure() {
    let storage = seeded_storage().await;
    let service = service(storage.clone(), true, 0.9);

    service.register_click(request("s1")).await.unwrap();
    let err = service.register_click(request("s1")).await.unwrap_err();

    assert!(matches!(err, ImpactClickError::DuplicateClick(_)));
    // No second pledge was minted for the session.
    let click = storage.get_click_by_session("s1", "c1").await.unwrap().unwrap();
    assert!(click.donation_id.is_some());
}

#[tokio::test]
async fn test_same_session_different_campaign_allowed() {
    let storage = seeded_storage().await;
    storage
        .save_campaign(Campaign {
            id: "c2".to_string(),
            name: "Holiday Drive".to_string(),
            description: String::new(),
            donation_amount: 10.0,
            currency: "DKK".to_string(),
        })
        .await
        .unwrap();
    let service = service(storage, true, 0.9);

    service.register_click(request("s1")).await.unwrap();

    let mut second = request("s1");
    second.campaign_id = "c2".to_string();
    let response = service.register_click(second).await.unwrap();
    assert_eq!(response.amount, "DKK 10");
}

#[tokio::test]
async fn test_failed_verification_leaves_no_record() {
    let storage = seeded_storage().await;
    let service = service(storage.clone(), false, 0.0);

    let err = service.register_click(request("s1")).await.unwrap_err();

    assert!(matches!(err, ImpactClickError::InvalidVerification(_)));
    assert!(storage.get_click_by_session("s1", "c1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_low_score_rejected_even_when_successful() {
    let storage = seeded_storage().await;
    let service = service(storage.clone(), true, 0.3);

    let err = service.register_click(request("s1")).await.unwrap_err();

    assert!(matches!(err, ImpactClickError::InvalidVerification(_)));
    assert!(storage.get_click_by_session("s1", "c1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_campaign_or_ngo_rejected() {
    let storage = seeded_storage().await;
    let service = service(storage.clone(), true, 0.9);

    let mut unknown_campaign = request("s1");
    unknown_campaign.campaign_id = "missing".to_string();
    let err = service.register_click(unknown_campaign).await.unwrap_err();
    assert!(matches!(err, ImpactClickError::InvalidReference(_)));

    let mut unknown_ngo = request("s2");
    unknown_ngo.ngo_id = "missing".to_string();
    let err = service.register_click(unknown_ngo).await.unwrap_err();
    assert!(matches!(err, ImpactClickError::InvalidReference(_)));

    // Reference failures must not leave click records behind.
    assert!(storage.get_click_by_session("s1", "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let storage = seeded_storage().await;
    let service = service(storage, true, 0.9);

    let mut empty_session = request("");
    empty_session.session_id = String::new();
    let err = service.register_click(empty_session).await.unwrap_err();
    assert!(matches!(err, ImpactClickError::Validation(_)));

    let mut empty_token = request("s1");
    empty_token.recaptcha_token = "  ".to_string();
    let err = service.register_click(empty_token).await.unwrap_err();
    assert!(matches!(err, ImpactClickError::Validation(_)));
}
