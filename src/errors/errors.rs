use axum::response::{IntoResponse, Response};
use std::fmt;

use crate::controllayer::helper::responses::Envelope;

/// Main error type for the reference data service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    // Request validation: malformed, missing or forbidden input
    ValidationError(String),

    // Database Errors
    DatabaseError(String),
    DatabaseConnectionError,

    // Internal Errors
    InternalServerError(String),
    ConfigurationError(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Validator and store messages reach the client verbatim
            ServiceError::ValidationError(msg) => write!(f, "{}", msg),
            ServiceError::DatabaseError(msg) => write!(f, "{}", msg),
            ServiceError::DatabaseConnectionError => write!(f, "Failed to connect to database"),

            ServiceError::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
            ServiceError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Get the error code string used in logs and metrics
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::ValidationError(_) => "VALIDATION_ERROR",
            ServiceError::DatabaseError(_) => "DATABASE_ERROR",
            ServiceError::DatabaseConnectionError => "DATABASE_CONNECTION_ERROR",
            ServiceError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ServiceError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Validation failures are caught before any store call
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::ValidationError(_))
    }
}

/// Every error becomes an error envelope; the HTTP status stays 200.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        Envelope::error(self.to_string()).into_response()
    }
}

/// Conversion from sqlx errors
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ServiceError::DatabaseConnectionError
            }
            _ => ServiceError::DatabaseError(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for ServiceError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ServiceError::DatabaseError(format!("Migration failed: {}", err))
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
