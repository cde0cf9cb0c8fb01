//! Trait seam for the outbound notification service

use async_trait::async_trait;

/// Trait for relaying one formatted message to the destination channel
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a message; returns a provider message id on acknowledgement.
    ///
    /// The error string is internal detail for logging and must never
    /// be forwarded to a client.
    async fn notify(&self, message: &str) -> Result<String, String>;
}
