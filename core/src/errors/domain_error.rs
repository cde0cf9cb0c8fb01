//! Domain-specific error types
//!
//! The `Display` impl of every variant is safe to forward to a client:
//! configuration and transport failures render as generic notices and
//! keep their detail in a field that only reaches the logs.

use thiserror::Error;

/// Result alias used throughout the core services
pub type DomainResult<T> = Result<T, DomainError>;

/// Error taxonomy for the flow and relay services
#[derive(Error, Debug)]
pub enum DomainError {
    /// Local field-level rejection; never triggers a notification
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Gateway-level denial
    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: u64 },

    /// Missing server-side credentials; detail is operator-actionable only
    #[error("Server configuration error")]
    Configuration { message: String },

    /// Outbound call failure or non-success acknowledgement
    #[error("Failed to send message")]
    Transport { message: String },

    /// Unknown or cleared flow session token
    #[error("Unknown or expired session")]
    SessionNotFound,

    /// Catch-all for unexpected internal failures
    #[error("Internal server error")]
    Internal { message: String },
}

impl DomainError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            DomainError::Configuration { .. } => "CONFIGURATION_ERROR",
            DomainError::Transport { .. } => "TRANSPORT_ERROR",
            DomainError::SessionNotFound => "SESSION_NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Internal detail for logging; `None` when the display text
    /// already carries everything there is to say
    pub fn internal_detail(&self) -> Option<&str> {
        match self {
            DomainError::Configuration { message }
            | DomainError::Transport { message }
            | DomainError::Internal { message } => Some(message),
            _ => None,
        }
    }
}
