//! Bot verification collaborator.
//!
//! The click protocol only sees the `BotVerifier` trait; the reCAPTCHA
//! implementation talks to the Google siteverify endpoint, and an
//! unconfigured deployment gets the pass-through verifier (permissive
//! default carried over from the original platform, logged loudly).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, warn};

use crate::errors::Result;

/// Raw collaborator outcome. The minimum-score gate is applied by the click
/// protocol, not here.
#[derive(Clone, Copy, Debug)]
pub struct Verification {
    pub success: bool,
    pub score: f64,
}

#[async_trait]
pub trait BotVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Verification>;
}

const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

pub struct RecaptchaVerifier {
    client: reqwest::Client,
    secret: String,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f64>,
}

impl RecaptchaVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        RecaptchaVerifier {
            client: reqwest::Client::new(),
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl BotVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<Verification> {
        let response = self
            .client
            .post(SITEVERIFY_URL)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await;

        // Fail closed: a transport error counts as a failed verification,
        // not an internal error the caller retries against.
        let body: SiteverifyResponse = match response {
            Ok(resp) => match resp.json().await {
                Ok(body) => body,
                Err(e) => {
                    error!("reCAPTCHA response parse error: {}", e);
                    return Ok(Verification { success: false, score: 0.0 });
                }
            },
            Err(e) => {
                error!("reCAPTCHA verification request failed: {}", e);
                return Ok(Verification { success: false, score: 0.0 });
            }
        };

        Ok(Verification {
            success: body.success,
            score: body.score.unwrap_or(0.0),
        })
    }
}

/// Used when no verification secret is configured: every token passes.
pub struct PassthroughVerifier;

#[async_trait]
impl BotVerifier for PassthroughVerifier {
    async fn verify(&self, _token: &str) -> Result<Verification> {
        warn!("bot verification not configured, accepting token unverified");
        Ok(Verification { success: true, score: 1.0 })
    }
}

/// Select the verifier implementation from configuration.
pub fn verifier_from_secret(secret: Option<&str>) -> std::sync::Arc<dyn BotVerifier> {
    match secret {
        Some(secret) if !secret.is_empty() => {
            std::sync::Arc::new(RecaptchaVerifier::new(secret))
        }
        _ => std::sync::Arc::new(PassthroughVerifier),
    }
}
