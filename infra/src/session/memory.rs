//! In-memory stores for session tokens and flow state
//!
//! Process-local maps behind a mutex. State does not survive a
//! restart; a restarted server sees every session as new, which the
//! flow treats as a fresh start at the intake step.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use fg_core::domain::flow::FlowState;
use fg_core::domain::session::{SessionId, SessionStore};
use fg_core::services::flow::FlowStore;

/// One session token per client context key
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, SessionId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, context_key: &str) -> SessionId {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(existing) = sessions.get(context_key) {
            return existing.clone();
        }
        let id = SessionId::generate();
        tracing::info!(
            session = %id,
            event = "session_created",
            "New session token issued"
        );
        sessions.insert(context_key.to_string(), id.clone());
        id
    }

    async fn get(&self, context_key: &str) -> Option<SessionId> {
        self.sessions.lock().unwrap().get(context_key).cloned()
    }

    async fn clear(&self, context_key: &str) {
        self.sessions.lock().unwrap().remove(context_key);
    }
}

/// Flow state keyed by session token
pub struct InMemoryFlowStore {
    states: Mutex<HashMap<SessionId, FlowState>>,
}

impl InMemoryFlowStore {
    pub fn new() -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFlowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowStore for InMemoryFlowStore {
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
