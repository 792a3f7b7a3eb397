//! Error types for Fixly.

use thiserror::Error;

/// Result type alias for Fixly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Fixly operations.
///
/// SLA evaluation never produces one of these; they come from the access,
/// storage and configuration layers.
#[derive(Error, Debug)]
pub enum Error {
    // Lookup errors
    #[error("Ticket not found: {0}")]
    TicketNotFound(u64),

    #[error("Category not found: {0}")]
    CategoryNotFound(u64),

    #[error("Contractor not found: {0}")]
    ContractorNotFound(u64),

    #[error("Contractor {0} is not active")]
    ContractorInactive(u64),

    #[error("No pending assignment for ticket {0}")]
    AssignmentNotFound(u64),

    // Access errors
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    // Input errors
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an `InvalidValue` error for an unrecognised enum string.
    pub fn invalid(kind: &'static str, value: &str) -> Self {
        Error::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}
