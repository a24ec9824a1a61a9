//! ImpactClick - click-to-donate campaign backend
//!
//! This library implements the click-to-donation settlement protocol:
//! verified click registration, pledge issuance, exactly-once donation
//! settlement and realtime analytics counters.
//!
//! # Architecture
//! - `services`: the registration/settlement protocols and their
//!   collaborators (bot verification, payment capture, payload sealing)
//! - `storages`: record store backends and the atomicity contract
//! - `admission`: rate limiting in front of click registration
//! - `api`: HTTP handlers and middleware
//! - `config`: environment-driven configuration
//! - `errors`: crate-wide error taxonomy with HTTP mapping

pub mod admission;
pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storages;
pub mod utils;
