//! Mock notifier for development and testing
//!
//! Records messages in memory instead of sending them, and sleeps for
//! a fixed interval so submission pacing behaves like it does against
//! the live webhook.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use fg_core::services::notify::Notifier;

/// Simulated webhook round-trip time
const SIMULATED_DELAY_MS: u64 = 500;

/// In-memory notifier
///
/// This implementation:
/// - Logs each message instead of delivering it
/// - Tracks delivered messages and a counter for assertions
/// - Can be told to simulate delivery failures
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
    message_count: AtomicU64,
    simulate_failure: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            message_count: AtomicU64::new(0),
            simulate_failure: AtomicBool::new(false),
        }
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Total number of messages accepted
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Copy of every accepted message, in order
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str) -> Result<String, String> {
        tokio::time::sleep(Duration::from_millis(SIMULATED_DELAY_MS)).await;

        if self.simulate_failure.load(Ordering::SeqCst) {
            tracing::warn!(event = "mock_notify_failure", "Simulating delivery failure");
            return Err("simulated delivery failure".to_string());
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(
            count,
            event = "mock_notify",
            "Mock notifier accepted message:\n{message}"
        );
        self.messages.lock().unwrap().push(message.to_string());
        Ok(format!("mock-{count}"))
    }
}
