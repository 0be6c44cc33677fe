//! Error handling for CornerClub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Main error type for the CornerClub application
#[derive(Error, Debug)]
pub enum CornerClubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Payment gateway error: {0}")]
    Payment(#[from] PaymentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Booking not found: {booking_id}")]
    BookingNotFound { booking_id: i64 },

    #[error("Profile incomplete: {0}")]
    ProfileIncomplete(String),

    #[error("Event {event_id} is sold out")]
    SoldOut { event_id: i64 },

    #[error("Payment verification failed for order {order_id}")]
    VerificationFailed { order_id: String },

    #[error("Payment captured without seat for event {event_id}: order {order_id}, payment {payment_id}")]
    ReconciliationRequired {
        event_id: i64,
        order_id: String,
        payment_id: String,
    },

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Payment gateway specific errors
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Payment gateway request failed: {0}")]
    RequestFailed(String),

    #[error("Payment gateway timeout")]
    Timeout,

    #[error("Invalid payment gateway response: {0}")]
    InvalidResponse(String),

    #[error("Payment gateway unavailable")]
    ServiceUnavailable,

    #[error("Invalid payment signature")]
    InvalidSignature,
}

/// Result type alias for CornerClub operations
pub type Result<T> = std::result::Result<T, CornerClubError>;

/// Result type alias for payment gateway operations
pub type PaymentResult<T> = std::result::Result<T, PaymentError>;

impl CornerClubError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CornerClubError::Database(_) => false,
            CornerClubError::Migration(_) => false,
            CornerClubError::Payment(_) => true,
            CornerClubError::Config(_) => false,
            CornerClubError::PermissionDenied(_) => false,
            CornerClubError::UserNotFound { .. } => false,
            CornerClubError::EventNotFound { .. } => false,
            CornerClubError::BookingNotFound { .. } => false,
            CornerClubError::ProfileIncomplete(_) => false,
            CornerClubError::SoldOut { .. } => false,
            CornerClubError::VerificationFailed { .. } => false,
            CornerClubError::ReconciliationRequired { .. } => false,
            CornerClubError::Redis(_) => true,
            CornerClubError::Http(_) => true,
            CornerClubError::Serialization(_) => false,
            CornerClubError::Io(_) => true,
            CornerClubError::Authentication(_) => false,
            CornerClubError::RateLimitExceeded => true,
            CornerClubError::InvalidInput(_) => false,
            CornerClubError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CornerClubError::Database(_) => ErrorSeverity::Critical,
            CornerClubError::Migration(_) => ErrorSeverity::Critical,
            CornerClubError::Config(_) => ErrorSeverity::Critical,
            CornerClubError::ReconciliationRequired { .. } => ErrorSeverity::Critical,
            CornerClubError::PermissionDenied(_) => ErrorSeverity::Warning,
            CornerClubError::Authentication(_) => ErrorSeverity::Warning,
            CornerClubError::RateLimitExceeded => ErrorSeverity::Warning,
            CornerClubError::InvalidInput(_) => ErrorSeverity::Info,
            CornerClubError::ProfileIncomplete(_) => ErrorSeverity::Info,
            CornerClubError::SoldOut { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status code this error maps to on the API surface
    pub fn status_code(&self) -> StatusCode {
        match self {
            CornerClubError::UserNotFound { .. }
            | CornerClubError::EventNotFound { .. }
            | CornerClubError::BookingNotFound { .. } => StatusCode::NOT_FOUND,
            CornerClubError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CornerClubError::ProfileIncomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CornerClubError::SoldOut { .. } => StatusCode::CONFLICT,
            CornerClubError::ReconciliationRequired { .. } => StatusCode::CONFLICT,
            CornerClubError::Payment(_) => StatusCode::PAYMENT_REQUIRED,
            CornerClubError::VerificationFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            CornerClubError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CornerClubError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            CornerClubError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            CornerClubError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message. Infrastructure details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            CornerClubError::Database(_)
            | CornerClubError::Migration(_)
            | CornerClubError::Redis(_)
            | CornerClubError::Http(_)
            | CornerClubError::Serialization(_)
            | CornerClubError::Io(_)
            | CornerClubError::Config(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for CornerClubError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
        }

        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
