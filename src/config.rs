//! Environment-driven configuration.
//!
//! All settings come from environment variables (a `.env` file is loaded by
//! `main` via dotenvy before this runs). Values are read once at startup and
//! handed to the components that need them.

use std::env;

use crate::errors::{ImpactClickError, Result};

pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 10;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;
pub const DEFAULT_RECAPTCHA_MIN_SCORE: f64 = 0.5;
pub const DEFAULT_CURRENCY: &str = "DKK";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Origins allowed by the CORS layer (widget + dashboard hosts).
    pub allowed_origins: Vec<String>,
    /// Bearer credential for the authenticated surface. Empty disables it.
    pub api_token: String,
    /// reCAPTCHA server-side secret. Unset selects the pass-through verifier.
    pub recaptcha_secret: Option<String>,
    /// Minimum verification score accepted by the click protocol.
    pub recaptcha_min_score: f64,
    /// Sealing key, must be exactly 32 bytes.
    pub encryption_key: String,
    pub storage_backend: String,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_secs: u64,
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let encryption_key = env::var("ENCRYPTION_KEY")
            .map_err(|_| ImpactClickError::validation("ENCRYPTION_KEY is not set"))?;
        if encryption_key.len() != 32 {
            return Err(ImpactClickError::validation(format!(
                "ENCRYPTION_KEY must be exactly 32 bytes, got {}",
                encryption_key.len()
            )));
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| ImpactClickError::validation("SERVER_PORT is not a valid port"))?,
            allowed_origins,
            api_token: env::var("API_TOKEN").unwrap_or_default(),
            recaptcha_secret: env::var("RECAPTCHA_SECRET_KEY").ok().filter(|s| !s.is_empty()),
            recaptcha_min_score: env::var("RECAPTCHA_MIN_SCORE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RECAPTCHA_MIN_SCORE),
            encryption_key,
            storage_backend: env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".to_string()),
            rate_limit_max_requests: env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_MAX_REQUESTS),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS),
            default_currency: env::var("DEFAULT_CURRENCY")
                .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string()),
        })
    }
}
