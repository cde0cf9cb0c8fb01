//! Rate limiting trait for the request gateway

use async_trait::async_trait;

/// Per-client-key request admission
///
/// A denial is a normal outcome, not an error, and must not itself be
/// recorded against the client's window.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check and record one inbound request for the client key;
    /// `false` means the request must be refused
    async fn allow(&self, client_key: &str) -> bool;

    /// Seconds a denied client should wait before retrying
    fn retry_after_secs(&self) -> u64;
}
