//! Admission control in front of click registration.
//!
//! The entry point only sees the `AdmissionControl` trait; the shipped
//! implementation is a fixed-window counter keyed by client address, held in
//! process memory. Limits are therefore per process — a shared-store
//! implementation behind the same trait is the path to cross-instance
//! limits.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::errors::{ImpactClickError, Result};

#[async_trait]
pub trait AdmissionControl: Send + Sync {
    /// Admit or reject one request for `client_key`. Rejection is
    /// `RateLimited`.
    async fn admit(&self, client_key: &str) -> Result<()>;
}

struct Window {
    count: u32,
    reset_at: Instant,
}

pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        FixedWindowLimiter {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }
}

#[async_trait]
impl AdmissionControl for FixedWindowLimiter {
    async fn admit(&self, client_key: &str) -> Result<()> {
        let now = Instant::now();
        // The entry guard holds the shard lock, so check and increment are
        // atomic per key.
        let mut entry = self
            .windows
            .entry(client_key.to_string())
            .or_insert_with(|| Window {
                count: 0,
                reset_at: now + self.window,
            });

        if now >= entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window;
            return Ok(());
        }

        if entry.count >= self.max_requests {
            debug!(client_key, "request rejected by rate limiter");
            return Err(ImpactClickError::rate_limited(
                "Rate limit exceeded. Please try again later.",
            ));
        }

        entry.count += 1;
        Ok(())
    }
}
