//! Payment capture collaborator.
//!
//! Real gateway integration is out of scope; settlement goes through the
//! `PaymentProcessor` trait and ships with a mock that has bounded latency
//! and always captures.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Capture a payment, returning the processor's opaque transaction id.
    /// Fire-once: no retries happen above this call.
    async fn capture(&self, amount: f64, currency: &str, ngo_id: &str) -> Result<String>;
}

pub struct MockPaymentProcessor;

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn capture(&self, _amount: f64, _currency: &str, _ngo_id: &str) -> Result<String> {
        // Simulated processor round-trip.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let suffix: String = std::iter::repeat_with(|| {
            const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
            CHARS[rand::random_range(0..CHARS.len())] as char
        })
        .take(9)
        .collect();

        Ok(format!("txn_{}_{}", chrono::Utc::now().timestamp_millis(), suffix))
    }
}
