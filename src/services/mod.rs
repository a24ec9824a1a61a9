//! Service layer: the click/settlement protocols and their collaborators,
//! decoupled from the HTTP surface so they can be driven directly by tests.

pub mod analytics;
pub mod click;
pub mod donation;
pub mod ngo;
pub mod payment;
pub mod sealing;
pub mod verification;

pub use analytics::{AnalyticsQuery, AnalyticsService};
pub use click::{ClickRequest, ClickResponse, ClickService};
pub use donation::{DonationRequest, DonationResponse, DonationService, SealedPayload};
pub use ngo::{CreateNgoRequest, NgoService, UpdateNgoRequest};
pub use payment::{MockPaymentProcessor, PaymentProcessor};
pub use sealing::Sealer;
pub use verification::{
    verifier_from_secret, BotVerifier, PassthroughVerifier, RecaptchaVerifier, Verification,
};
