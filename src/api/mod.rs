//! HTTP surface: JSON handlers over the service layer, plus the auth and
//! rate-limit middleware. Route wiring lives in `main.rs`.

pub mod analytics;
pub mod click;
pub mod donation;
pub mod health;
pub mod middleware;
pub mod ngo;

pub use analytics::AnalyticsApi;
pub use click::ClickApi;
pub use donation::DonationApi;
pub use health::{AppStartTime, HealthApi};
pub use ngo::NgoApi;
