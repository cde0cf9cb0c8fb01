//! Notification delivery implementations
//!
//! Live delivery goes through [`bot_api::BotApiNotifier`]; setting
//! `TEST_MODE` swaps in [`mock::MockNotifier`], which records messages
//! and simulates network latency without touching the wire.

use std::sync::Arc;

use fg_core::services::notify::Notifier;
use fg_shared::config::NotifierConfig;

use crate::InfrastructureError;

pub mod bot_api;
pub mod mock;

pub use bot_api::BotApiNotifier;
pub use mock::MockNotifier;

/// Build the notifier the configuration asks for
///
/// Test mode always wins; otherwise the live webhook client is built,
/// failing fast when the credentials are absent.
pub fn build_notifier(config: &NotifierConfig) -> Result<Arc<dyn Notifier>, InfrastructureError> {
    if config.test_mode {
        tracing::warn!(
            event = "notifier_mock_selected",
            "TEST_MODE set; notifications will not leave the process"
        );
        return Ok(Arc::new(MockNotifier::new()));
    }
    Ok(Arc::new(BotApiNotifier::new(config)?))
}
