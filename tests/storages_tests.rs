use std::sync::Arc;

use impactclick::errors::ImpactClickError;
use impactclick::storages::file::FileStorage;
use impactclick::storages::memory::MemoryStorage;
use impactclick::storages::{Campaign, ClickRecord, DonationRecord, DonationStatus, Ngo, Storage};
use tempfile::TempDir;

fn sample_click(id: &str, session: &str, campaign: &str) -> ClickRecord {
    ClickRecord {
        id: id.to_string(),
        campaign_id: campaign.to_string(),
        ngo_id: "n1".to_string(),
        session_id: session.to_string(),
        user_agent: Some("Mozilla/5.0".to_string()),
        ip_address: Some("203.0.113.7".to_string()),
        timestamp: chrono::Utc::now(),
        is_valid: true,
        donation_id: None,
    }
}

fn sample_donation(id: &str, pledge: &str) -> DonationRecord {
    DonationRecord {
        id: id.to_string(),
        donation_id: pledge.to_string(),
        ngo_id: "n1".to_string(),
        amount: 20.0,
        currency: "DKK".to_string(),
        status: DonationStatus::Completed,
        transaction_id: Some("txn_test".to_string()),
        timestamp: chrono::Utc::now(),
        encrypted_data: "aa:bb".to_string(),
    }
}

fn sample_ngo(id: &str, name: &str) -> Ngo {
    Ngo {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        website: None,
        logo_url: None,
    }
}

mod memory_backend {
    use super::*;

    #[tokio::test]
    async fn test_click_conditional_insert() {
        let storage = MemoryStorage::new();

        storage.create_click(sample_click("c-1", "s1", "camp1")).await.unwrap();

        // Same session + campaign: rejected atomically.
        let err = storage
            .create_click(sample_click("c-2", "s1", "camp1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImpactClickError::DuplicateClick(_)));

        // Same session, different campaign: fine.
        storage.create_click(sample_click("c-3", "s1", "camp2")).await.unwrap();
    }

    #[tokio::test]
    async fn test_attach_pledge_and_lookup() {
        let storage = MemoryStorage::new();
        storage.create_click(sample_click("c-1", "s1", "camp1")).await.unwrap();

        storage.attach_pledge("c-1", "pledge-1").await.unwrap();

        let click = storage.get_click_by_pledge("pledge-1").await.unwrap().unwrap();
        assert_eq!(click.id, "c-1");
        assert_eq!(click.donation_id.as_deref(), Some("pledge-1"));

        let err = storage.attach_pledge("missing", "pledge-2").await.unwrap_err();
        assert!(matches!(err, ImpactClickError::Storage(_)));
    }

    #[tokio::test]
    async fn test_donation_conditional_insert() {
        let storage = MemoryStorage::new();

        storage.create_donation(sample_donation("d-1", "pledge-1")).await.unwrap();

        let err = storage
            .create_donation(sample_donation("d-2", "pledge-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImpactClickError::AlreadySettled(_)));

        let found = storage.get_donation_by_pledge("pledge-1").await.unwrap().unwrap();
        assert_eq!(found.id, "d-1");
    }

    #[tokio::test]
    async fn test_record_settlement_accumulates() {
        let storage = MemoryStorage::new();

        let counter = storage.record_settlement(20.0).await.unwrap();
        assert_eq!(counter.total_donations, 1);
        assert_eq!(counter.total_amount, 20.0);

        let counter = storage.record_settlement(5.5).await.unwrap();
        assert_eq!(counter.total_donations, 2);
        assert_eq!(counter.total_amount, 25.5);

        let read_back = storage.get_realtime_analytics().await.unwrap();
        assert_eq!(read_back.total_donations, 2);
        assert_eq!(read_back.total_amount, 25.5);
    }

    #[tokio::test]
    async fn test_concurrent_settlements_serialize() {
        let storage = Arc::new(MemoryStorage::new());

        let mut handles = Vec::new();
        for _ in 0..50 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                storage.record_settlement(1.0).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let counter = storage.get_realtime_analytics().await.unwrap();
        assert_eq!(counter.total_donations, 50);
        assert_eq!(counter.total_amount, 50.0);
    }

    #[tokio::test]
    async fn test_click_stats_filtering() {
        let storage = MemoryStorage::new();
        storage.create_click(sample_click("c-1", "s1", "camp1")).await.unwrap();
        storage.create_click(sample_click("c-2", "s2", "camp1")).await.unwrap();
        let mut invalid = sample_click("c-3", "s3", "camp2");
        invalid.is_valid = false;
        storage.create_click(invalid).await.unwrap();

        let all = storage.click_stats(None).await.unwrap();
        assert_eq!(all.total_clicks, 3);
        assert_eq!(all.valid_clicks, 2);

        let camp1 = storage.click_stats(Some("camp1")).await.unwrap();
        assert_eq!(camp1.total_clicks, 2);
        assert_eq!(camp1.valid_clicks, 2);
    }

    #[tokio::test]
    async fn test_ngo_crud() {
        let storage = MemoryStorage::new();

        storage.save_ngo(sample_ngo("n1", "Beta")).await.unwrap();
        storage.save_ngo(sample_ngo("n2", "Alpha")).await.unwrap();

        let listed = storage.list_ngos().await.unwrap();
        assert_eq!(listed.len(), 2);
        // Sorted by name.
        assert_eq!(listed[0].name, "Alpha");

        storage.delete_ngo("n1").await.unwrap();
        assert!(storage.get_ngo("n1").await.unwrap().is_none());

        let err = storage.delete_ngo("n1").await.unwrap_err();
        assert!(matches!(err, ImpactClickError::NotFound(_)));
    }
}

mod file_backend {
    use super::*;

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let path_str = path.to_str().unwrap().to_string();

        {
            let storage = FileStorage::with_path(&path_str).unwrap();
            storage.save_ngo(sample_ngo("n1", "Test NGO")).await.unwrap();
            storage
                .save_campaign(Campaign {
                    id: "camp1".to_string(),
                    name: "Summer Campaign".to_string(),
                    description: String::new(),
                    donation_amount: 20.0,
                    currency: "DKK".to_string(),
                })
                .await
                .unwrap();
            storage.create_click(sample_click("c-1", "s1", "camp1")).await.unwrap();
            storage.attach_pledge("c-1", "pledge-1").await.unwrap();
            storage.record_settlement(20.0).await.unwrap();
        }

        let reopened = FileStorage::with_path(&path_str).unwrap();
        assert_eq!(reopened.get_ngo("n1").await.unwrap().unwrap().name, "Test NGO");
        assert_eq!(
            reopened.get_campaign("camp1").await.unwrap().unwrap().donation_amount,
            20.0
        );
        let click = reopened.get_click_by_pledge("pledge-1").await.unwrap().unwrap();
        assert_eq!(click.id, "c-1");
        let counter = reopened.get_realtime_analytics().await.unwrap();
        assert_eq!(counter.total_donations, 1);
        assert_eq!(counter.total_amount, 20.0);
    }

    #[tokio::test]
    async fn test_duplicate_click_rejected_after_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        let path_str = path.to_str().unwrap().to_string();

        {
            let storage = FileStorage::with_path(&path_str).unwrap();
            storage.create_click(sample_click("c-1", "s1", "camp1")).await.unwrap();
        }

        let reopened = FileStorage::with_path(&path_str).unwrap();
        let err = reopened
            .create_click(sample_click("c-2", "s1", "camp1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImpactClickError::DuplicateClick(_)));
    }

    #[tokio::test]
    async fn test_corrupt_data_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStorage::with_path(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ImpactClickError::Serialization(_)));
    }
}
