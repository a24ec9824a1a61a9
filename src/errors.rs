use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::fmt;

/// Crate-wide error type covering the click/settlement protocols, the
/// storage layer and the HTTP surface.
#[derive(Debug, Clone)]
pub enum ImpactClickError {
    Validation(String),
    InvalidVerification(String),
    DuplicateClick(String),
    InvalidReference(String),
    InvalidPledge(String),
    AlreadySettled(String),
    RateLimited(String),
    Unauthorized(String),
    NotFound(String),
    Sealing(String),
    Storage(String),
    Serialization(String),
    Internal(String),
}

impl ImpactClickError {
    pub fn code(&self) -> &'static str {
        match self {
            ImpactClickError::Validation(_) => "E001",
            ImpactClickError::InvalidVerification(_) => "E002",
            ImpactClickError::DuplicateClick(_) => "E003",
            ImpactClickError::InvalidReference(_) => "E004",
            ImpactClickError::InvalidPledge(_) => "E005",
            ImpactClickError::AlreadySettled(_) => "E006",
            ImpactClickError::RateLimited(_) => "E007",
            ImpactClickError::Unauthorized(_) => "E008",
            ImpactClickError::NotFound(_) => "E009",
            ImpactClickError::Sealing(_) => "E010",
            ImpactClickError::Storage(_) => "E011",
            ImpactClickError::Serialization(_) => "E012",
            ImpactClickError::Internal(_) => "E013",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ImpactClickError::Validation(_) => "Validation Error",
            ImpactClickError::InvalidVerification(_) => "Bot Verification Failed",
            ImpactClickError::DuplicateClick(_) => "Duplicate Click",
            ImpactClickError::InvalidReference(_) => "Invalid Reference",
            ImpactClickError::InvalidPledge(_) => "Invalid Pledge",
            ImpactClickError::AlreadySettled(_) => "Donation Already Settled",
            ImpactClickError::RateLimited(_) => "Rate Limit Exceeded",
            ImpactClickError::Unauthorized(_) => "Unauthorized",
            ImpactClickError::NotFound(_) => "Resource Not Found",
            ImpactClickError::Sealing(_) => "Sealing Error",
            ImpactClickError::Storage(_) => "Storage Operation Error",
            ImpactClickError::Serialization(_) => "Serialization Error",
            ImpactClickError::Internal(_) => "Internal Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ImpactClickError::Validation(msg)
            | ImpactClickError::InvalidVerification(msg)
            | ImpactClickError::DuplicateClick(msg)
            | ImpactClickError::InvalidReference(msg)
            | ImpactClickError::InvalidPledge(msg)
            | ImpactClickError::AlreadySettled(msg)
            | ImpactClickError::RateLimited(msg)
            | ImpactClickError::Unauthorized(msg)
            | ImpactClickError::NotFound(msg)
            | ImpactClickError::Sealing(msg)
            | ImpactClickError::Storage(msg)
            | ImpactClickError::Serialization(msg)
            | ImpactClickError::Internal(msg) => msg,
        }
    }

    /// HTTP status the error maps to at the protocol boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ImpactClickError::Validation(_)
            | ImpactClickError::InvalidVerification(_)
            | ImpactClickError::DuplicateClick(_)
            | ImpactClickError::InvalidReference(_)
            | ImpactClickError::InvalidPledge(_)
            | ImpactClickError::AlreadySettled(_) => StatusCode::BAD_REQUEST,
            ImpactClickError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            ImpactClickError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ImpactClickError::NotFound(_) => StatusCode::NOT_FOUND,
            ImpactClickError::Sealing(_)
            | ImpactClickError::Storage(_)
            | ImpactClickError::Serialization(_)
            | ImpactClickError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error carries a message safe to hand to the caller.
    /// Server-side failures are reported opaquely.
    pub fn is_public(&self) -> bool {
        self.status_code() != StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ImpactClickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ImpactClickError {}

impl actix_web::ResponseError for ImpactClickError {
    fn status_code(&self) -> StatusCode {
        ImpactClickError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let detail = if self.is_public() {
            self.message().to_string()
        } else {
            "Internal server error".to_string()
        };

        HttpResponse::build(ImpactClickError::status_code(self))
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(serde_json::json!({
                "code": self.status_code().as_u16(),
                "data": { "error": detail }
            }))
    }
}

impl ImpactClickError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Validation(msg.into())
    }

    pub fn invalid_verification<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::InvalidVerification(msg.into())
    }

    pub fn duplicate_click<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::DuplicateClick(msg.into())
    }

    pub fn invalid_reference<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::InvalidReference(msg.into())
    }

    pub fn invalid_pledge<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::InvalidPledge(msg.into())
    }

    pub fn already_settled<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::AlreadySettled(msg.into())
    }

    pub fn rate_limited<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::RateLimited(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::NotFound(msg.into())
    }

    pub fn sealing<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Sealing(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Storage(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Serialization(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        ImpactClickError::Internal(msg.into())
    }
}

impl From<std::io::Error> for ImpactClickError {
    fn from(err: std::io::Error) -> Self {
        ImpactClickError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ImpactClickError {
    fn from(err: serde_json::Error) -> Self {
        ImpactClickError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for ImpactClickError {
    fn from(err: reqwest::Error) -> Self {
        ImpactClickError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImpactClickError>;
