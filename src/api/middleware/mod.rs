pub mod auth;
pub mod rate_limit;

pub use auth::{ApiToken, AuthMiddleware};
pub use rate_limit::RateLimitMiddleware;
