//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Standard API response wrapper
///
/// Every endpoint answers with this envelope: a `success` flag, a
/// short human-readable message, and an optional data payload that is
/// flattened into the body when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T = serde_json::Value> {
    /// Whether the request was successful
    pub success: bool,

    /// Short, client-safe message
    pub message: String,

    /// Response data (present on success when the endpoint has more to say)
    #[serde(flatten)]
    pub data: Option<T>,
}

impl ApiResponse<serde_json::Value> {
    /// Create a successful response with just a message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Create a failure response with just a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying a data payload
    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a failure response carrying a data payload
    pub fn error_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Some(data),
        }
    }
}
