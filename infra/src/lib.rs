//! # Infrastructure Layer
//!
//! Concrete implementations of the trait seams `fg_core` defines:
//!
//! - **Notify**: the bot-API webhook client and its test-mode mock
//! - **Rate limit**: the in-memory sliding-window limiter
//! - **Session**: in-memory session token and flow state stores
//!
//! Everything here is replaceable behind the core traits; the api
//! crate wires the concrete types at startup.

/// Notification delivery - bot API webhook and mock
pub mod notify;

/// Request admission - sliding-window rate limiter
pub mod ratelimit;

/// Session and flow state persistence
pub mod session;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for the outbound webhook
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Notification delivery error
    #[error("Notify error: {0}")]
    Notify(String),
}
