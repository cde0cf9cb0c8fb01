//! Trait seam for server-side flow state persistence

use async_trait::async_trait;

use crate::domain::flow::FlowState;
use crate::domain::session::SessionId;

/// Storage for per-session flow state
///
/// The error string is infrastructure detail for logging; callers wrap
/// it into `DomainError::Internal`.
#[async_trait]
pub trait FlowStore: Send + Sync {
    /// Load the flow state for a session token
    async fn load(&self, session_id: &SessionId) -> Result<Option<FlowState>, String>;

    /// Persist the flow state, replacing any previous value
    async fn save(&self, state: FlowState) -> Result<(), String>;

    /// Remove the flow state for a session token
    async fn clear(&self, session_id: &SessionId) -> Result<(), String>;
}
