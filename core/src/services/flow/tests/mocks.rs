//! Mock implementations of the flow service's trait seams

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::flow::FlowState;
use crate::domain::session::SessionId;
use crate::services::flow::store::FlowStore;
use crate::services::notify::Notifier;

/// Notifier that records every message and can be told to fail
pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// The last delivered verification code, scraped from the delivery
    /// message
    pub fn last_delivered_code(&self) -> Option<String> {
        self.sent()
            .iter()
            .rev()
            .find(|m| m.contains("VERIFICATION CODE"))
            .and_then(|m| {
                let start = m.rfind("<code>")? + "<code>".len();
                let end = m.rfind("</code>")?;
                Some(m[start..end].to_string())
            })
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str) -> Result<String, String> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("simulated notify failure".to_string());
        }
        let mut messages = self.messages.lock().unwrap();
        messages.push(message.to_string());
        Ok(format!("mock-msg-{}", messages.len()))
    }
}

/// In-memory flow store
pub struct MockFlowStore {
    states: Mutex<HashMap<SessionId, FlowState>>,
}

impl MockFlowStore {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl FlowStore for MockFlowStore {
    async fn load(&self, session_id: &SessionId) -> Result<Option<FlowState>, String> {
        Ok(self.states.lock().unwrap().get(session_id).cloned())
    }

    async fn save(&self, state: FlowState) -> Result<(), String> {
        self.states
            .lock()
            .unwrap()
            .insert(state.session_id.clone(), state);
        Ok(())
    }

    async fn clear(&self, session_id: &SessionId) -> Result<(), String> {
        self.states.lock().unwrap().remove(session_id);
        Ok(())
    }
}
