//! Route handlers and shared application state

use std::sync::Arc;

use fg_core::domain::session::SessionStore;
use fg_core::services::flow::FlowService;
use fg_core::services::notify::Notifier;

pub mod flow;
pub mod health;
pub mod relay;

/// Dependencies shared by every handler
pub struct AppState {
    /// The step flow state machine
    pub flow: FlowService,
    /// Session token assignment per client
    pub sessions: Arc<dyn SessionStore>,
    /// Outbound notifier used by the relay endpoint
    pub notifier: Arc<dyn Notifier>,
    /// Whether the notifier has usable credentials; when false the
    /// relay-backed endpoints answer with a configuration error
    pub notifier_ready: bool,
}
